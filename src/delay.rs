//! Calibrated busy-wait delays.
//!
//! Accuracy drifts with clock changes, pipeline and cache effects and with
//! whatever the optimizer does to the loop. That is expected: this is a
//! blink-an-LED delay, not a timebase.

use core::marker::PhantomData;
use core::time::Duration;

use crate::hal::blocking::delay::{DelayMs, DelayUs};

use crate::asm;
use crate::clocks::{Bcm2837, Calibration};
use crate::error::{Error, Result};


// - Spin ---------------------------------------------------------------------

/// One iteration of the busy-wait loop.
pub trait Spin {
    fn spin(&mut self);

    /// Runs `count` iterations back to back.
    #[inline(never)]
    fn spin_many(&mut self, count: u32) {
        for _ in 0..count {
            self.spin();
        }
    }
}

/// Executes a single architecture `nop`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nop;

impl Spin for Nop {
    #[inline(always)]
    fn spin(&mut self) {
        asm::nop();
    }
}

impl<S: Spin + ?Sized> Spin for &mut S {
    #[inline(always)]
    fn spin(&mut self) {
        (**self).spin();
    }

    #[inline(always)]
    fn spin_many(&mut self, count: u32) {
        (**self).spin_many(count);
    }
}


// - conversions --------------------------------------------------------------

/// Loop iterations for a delay of `us` microseconds.
pub const fn iterations<C: Calibration>(us: u32) -> Result<u32> {
    match us.checked_mul(C::CYCLES_PER_MICROSECOND) {
        Some(n) => Ok(n),
        None => Err(Error::DurationOverflow),
    }
}

/// Microseconds in `ms` milliseconds.
pub const fn millis_to_micros(ms: u32) -> Result<u32> {
    match ms.checked_mul(1_000) {
        Some(us) => Ok(us),
        None => Err(Error::DurationOverflow),
    }
}


// - SpinDelay ----------------------------------------------------------------

/// Busy-wait delay provider.
///
/// `C` supplies the iterations-per-microsecond constant, `S` the loop body.
pub struct SpinDelay<C = Bcm2837, S = Nop> {
    spin: S,
    _calibration: PhantomData<fn() -> C>,
}

impl SpinDelay {
    pub const fn new() -> Self {
        SpinDelay {
            spin: Nop,
            _calibration: PhantomData,
        }
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Calibration> SpinDelay<C, Nop> {
    pub const fn calibrated() -> Self {
        SpinDelay {
            spin: Nop,
            _calibration: PhantomData,
        }
    }
}

impl<C, S> SpinDelay<C, S>
where
    C: Calibration,
    S: Spin,
{
    /// Builds a delay whose loop body is `spin` instead of a bare `nop`.
    pub fn with_spin(spin: S) -> Self {
        SpinDelay {
            spin,
            _calibration: PhantomData,
        }
    }

    pub fn release(self) -> S {
        self.spin
    }

    /// Busy-waits for `us` microseconds.
    ///
    /// Fails with `DurationOverflow` above `C::MAX_MICROSECONDS`.
    pub fn sleep_microseconds(&mut self, us: u32) -> Result<()> {
        let count = iterations::<C>(us)?;
        self.spin_for(count);
        Ok(())
    }

    /// Busy-waits for `ms` milliseconds.
    ///
    /// Fails with `DurationOverflow` above `C::MAX_MILLISECONDS`.
    pub fn sleep_milliseconds(&mut self, ms: u32) -> Result<()> {
        self.sleep_microseconds(millis_to_micros(ms)?)
    }

    /// Busy-waits for `duration`, truncated to whole microseconds.
    pub fn sleep(&mut self, duration: Duration) -> Result<()> {
        let us = u32::try_from(duration.as_micros()).map_err(|_| Error::DurationOverflow)?;
        self.sleep_microseconds(us)
    }

    #[inline(always)]
    pub(crate) fn spin_for(&mut self, count: u32) {
        self.spin.spin_many(count);
    }

    /// Sleeps for any `u32` microsecond count by splitting it into chunks
    /// that fit the counter.
    fn sleep_microseconds_chunked(&mut self, mut us: u32) {
        while us > 0 {
            let chunk = us.min(C::MAX_MICROSECONDS);
            self.spin_for(chunk * C::CYCLES_PER_MICROSECOND);
            us -= chunk;
        }
    }
}


// - embedded_hal::blocking::delay --------------------------------------------

impl<C: Calibration, S: Spin> DelayUs<u32> for SpinDelay<C, S> {
    fn delay_us(&mut self, us: u32) {
        self.sleep_microseconds_chunked(us);
    }
}

impl<C: Calibration, S: Spin> DelayUs<u16> for SpinDelay<C, S> {
    fn delay_us(&mut self, us: u16) {
        self.sleep_microseconds_chunked(u32::from(us));
    }
}

impl<C: Calibration, S: Spin> DelayUs<u8> for SpinDelay<C, S> {
    fn delay_us(&mut self, us: u8) {
        self.sleep_microseconds_chunked(u32::from(us));
    }
}

impl<C: Calibration, S: Spin> DelayMs<u32> for SpinDelay<C, S> {
    fn delay_ms(&mut self, mut ms: u32) {
        while ms > 0 {
            let chunk = ms.min(C::MAX_MILLISECONDS.max(1));
            self.sleep_microseconds_chunked(chunk * 1_000);
            ms -= chunk;
        }
    }
}

impl<C: Calibration, S: Spin> DelayMs<u16> for SpinDelay<C, S> {
    fn delay_ms(&mut self, ms: u16) {
        DelayMs::<u32>::delay_ms(self, u32::from(ms));
    }
}

impl<C: Calibration, S: Spin> DelayMs<u8> for SpinDelay<C, S> {
    fn delay_ms(&mut self, ms: u8) {
        DelayMs::<u32>::delay_ms(self, u32::from(ms));
    }
}
