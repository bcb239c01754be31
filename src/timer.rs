//! A `CountDown` timer with no hardware behind it.
//!
//! Each call to `wait` burns at most one microsecond of busy-wait loop and
//! reports `WouldBlock` until the whole period has been spent, so callers can
//! interleave polling with other work (`nb::block!`, `block_timeout!`). Time
//! only passes while `wait` is being called.

use core::time::Duration;

use crate::hal;

use crate::clocks::{Bcm2837, Calibration};
use crate::delay::{self, Nop, Spin, SpinDelay};


// - SpinCountDown ------------------------------------------------------------

pub struct SpinCountDown<C = Bcm2837, S = Nop> {
    delay: SpinDelay<C, S>,
    period: u32,
    remaining: u32,
}

impl SpinCountDown {
    pub fn new() -> Self {
        Self::with_delay(SpinDelay::new())
    }
}

impl Default for SpinCountDown {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, S> SpinCountDown<C, S>
where
    C: Calibration,
    S: Spin,
{
    pub fn with_delay(delay: SpinDelay<C, S>) -> Self {
        Self {
            delay,
            period: 0,
            remaining: 0,
        }
    }

    pub fn release(self) -> SpinDelay<C, S> {
        self.delay
    }

    /// Loop iterations left in the current period.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn period_for(timeout: Duration) -> u32 {
        let us = u32::try_from(timeout.as_micros()).unwrap_or(u32::MAX);
        match delay::iterations::<C>(us) {
            Ok(count) => count,
            Err(_) => {
                log::warn!("countdown period {:?} clamped to {}us", timeout, C::MAX_MICROSECONDS);
                C::MAX_MICROSECONDS * C::CYCLES_PER_MICROSECOND
            }
        }
    }
}


// - embedded_hal::timer::CountDown -------------------------------------------

impl<C: Calibration, S: Spin> hal::timer::Periodic for SpinCountDown<C, S> {}

impl<C: Calibration, S: Spin> hal::timer::CountDown for SpinCountDown<C, S> {
    type Time = Duration;

    fn start<T>(&mut self, timeout: T)
    where
        T: Into<Duration>,
    {
        self.period = Self::period_for(timeout.into());
        self.remaining = self.period;
    }

    fn wait(&mut self) -> nb::Result<(), void::Void> {
        if self.remaining == 0 {
            // reload for the next period
            self.remaining = self.period;
            return Ok(());
        }

        let step = self.remaining.min(C::CYCLES_PER_MICROSECOND);
        self.delay.spin_for(step);
        self.remaining -= step;

        Err(nb::Error::WouldBlock)
    }
}
