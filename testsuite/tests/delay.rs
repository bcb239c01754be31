use core::time::Duration;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::timer::CountDown;
use embedded_timeout_macros::{block_timeout, TimeoutError};

use rpi_blinky as rpi;
use rpi::clocks::{Bcm2837, Calibration};
use rpi::delay::{self, SpinDelay};
use rpi::{Error, SpinCountDown};

use testsuite::CountingSpin;


struct Slow;

impl Calibration for Slow {
    const CYCLES_PER_MICROSECOND: u32 = 2;
}

const K: u64 = Bcm2837::CYCLES_PER_MICROSECOND as u64;

fn counting<C: Calibration>(spin: &mut CountingSpin) -> SpinDelay<C, &mut CountingSpin> {
    testsuite::init();
    SpinDelay::with_spin(spin)
}


// - sleep_microseconds -------------------------------------------------------

#[test]
fn zero_microseconds_spins_zero_times() {
    let mut spin = CountingSpin::default();
    counting::<Bcm2837>(&mut spin).sleep_microseconds(0).unwrap();
    assert_eq!(spin.count, 0);
}

#[test]
fn microseconds_scale_by_calibration() {
    let mut spin = CountingSpin::default();
    counting::<Bcm2837>(&mut spin).sleep_microseconds(1_234).unwrap();
    assert_eq!(spin.count, 1_234 * K);

    let mut spin = CountingSpin::default();
    counting::<Slow>(&mut spin).sleep_microseconds(1_234).unwrap();
    assert_eq!(spin.count, 1_234 * 2);
}

#[test]
fn microseconds_past_maximum_overflow() {
    let mut spin = CountingSpin::default();
    let mut delay = counting::<Bcm2837>(&mut spin);

    assert_eq!(delay.sleep_microseconds(Bcm2837::MAX_MICROSECONDS + 1), Err(Error::DurationOverflow));
    assert_eq!(delay.sleep_microseconds(u32::MAX), Err(Error::DurationOverflow));
    drop(delay);
    assert_eq!(spin.count, 0);
}


// - sleep_milliseconds -------------------------------------------------------

#[test]
fn milliseconds_scale_linearly() {
    for n in [0u32, 1, 2, 17, 250] {
        let mut spin = CountingSpin::default();
        counting::<Bcm2837>(&mut spin).sleep_milliseconds(n).unwrap();
        assert_eq!(spin.count, u64::from(n) * 1_000 * K);
    }
}

#[test]
fn milliseconds_at_maximum_fit() {
    assert_eq!(
        delay::iterations::<Bcm2837>(Bcm2837::MAX_MILLISECONDS * 1_000),
        Ok(Bcm2837::MAX_MILLISECONDS * 1_000 * 6),
    );
}

#[test]
fn milliseconds_past_maximum_overflow() {
    let mut spin = CountingSpin::default();
    let mut delay = counting::<Bcm2837>(&mut spin);

    assert_eq!(delay.sleep_milliseconds(Bcm2837::MAX_MILLISECONDS + 1), Err(Error::DurationOverflow));
    // 1000 * ms itself overflows here
    assert_eq!(delay.sleep_milliseconds(u32::MAX / 999), Err(Error::DurationOverflow));
    drop(delay);
    assert_eq!(spin.count, 0);
}

#[test]
fn duration_overflow_error_message() {
    assert_eq!(
        Error::DurationOverflow.to_string(),
        "delay duration overflows the iteration counter",
    );
}

#[test]
fn sleep_truncates_to_microseconds() {
    let mut spin = CountingSpin::default();
    counting::<Bcm2837>(&mut spin).sleep(Duration::from_nanos(3_999)).unwrap();
    assert_eq!(spin.count, 3 * K);

    let mut spin = CountingSpin::default();
    let result = counting::<Bcm2837>(&mut spin).sleep(Duration::from_secs(10_000));
    assert_eq!(result, Err(Error::DurationOverflow));
}

#[test]
fn real_nop_loop_returns() {
    let mut delay = SpinDelay::new();
    delay.sleep_microseconds(10).unwrap();
    delay.sleep_milliseconds(1).unwrap();
}


// - embedded_hal::blocking::delay --------------------------------------------

#[test]
fn blocking_delay_traits_match_inherent_api() {
    let mut spin = CountingSpin::default();
    let mut delay = counting::<Bcm2837>(&mut spin);
    DelayUs::<u32>::delay_us(&mut delay, 40);
    DelayUs::<u8>::delay_us(&mut delay, 2);
    DelayMs::<u16>::delay_ms(&mut delay, 3);
    drop(delay);
    assert_eq!(spin.count, (40 + 2 + 3_000) * K);
}

struct Huge;

impl Calibration for Huge {
    const CYCLES_PER_MICROSECOND: u32 = 1 << 30;
}

#[test]
fn blocking_delay_splits_long_microsecond_requests() {
    const K: u32 = Huge::CYCLES_PER_MICROSECOND;
    assert_eq!(Huge::MAX_MICROSECONDS, 3);

    let mut spin = CountingSpin::default();
    DelayUs::<u32>::delay_us(&mut counting::<Huge>(&mut spin), 10);

    assert_eq!(spin.chunks, [3 * K, 3 * K, 3 * K, K]);
    assert_eq!(spin.count, 10 * u64::from(K));
}

#[test]
fn blocking_delay_splits_long_millisecond_requests() {
    const K: u32 = Huge::CYCLES_PER_MICROSECOND;
    assert_eq!(Huge::MAX_MILLISECONDS, 0);

    let mut spin = CountingSpin::default();
    DelayMs::<u32>::delay_ms(&mut counting::<Huge>(&mut spin), 2);

    // each millisecond is 333 full chunks and one of a single microsecond
    assert_eq!(spin.chunks.len(), 2 * 334);
    assert!(spin.chunks.iter().all(|&chunk| chunk == 3 * K || chunk == K));
    assert_eq!(spin.count, 2_000 * u64::from(K));
}

#[test]
fn spin_without_bulk_runs_every_iteration() {
    #[derive(Default)]
    struct Steps(u32);

    impl delay::Spin for Steps {
        fn spin(&mut self) {
            self.0 += 1;
        }
    }

    let mut steps = Steps::default();
    SpinDelay::<Bcm2837, _>::with_spin(&mut steps).sleep_microseconds(7).unwrap();
    assert_eq!(steps.0, 7 * Bcm2837::CYCLES_PER_MICROSECOND);
}


// - SpinCountDown ------------------------------------------------------------

#[test]
fn countdown_blocks_until_period_spent() {
    let mut spin = CountingSpin::default();
    let mut timer = SpinCountDown::with_delay(counting::<Bcm2837>(&mut spin));

    timer.start(Duration::from_micros(5));
    let mut polls = 0;
    while let Err(nb::Error::WouldBlock) = timer.wait() {
        polls += 1;
    }
    assert_eq!(polls, 5);
    assert_eq!(timer.remaining(), 5 * Bcm2837::CYCLES_PER_MICROSECOND);

    drop(timer);
    assert_eq!(spin.count, 5 * K);
}

#[test]
fn countdown_is_periodic() {
    let mut spin = CountingSpin::default();
    let mut timer = SpinCountDown::with_delay(counting::<Bcm2837>(&mut spin));

    timer.start(Duration::from_micros(3));
    for _ in 0..4 {
        nb::block!(timer.wait()).unwrap();
    }
    drop(timer);
    assert_eq!(spin.count, 4 * 3 * K);
}

#[test]
fn countdown_clamps_long_periods() {
    let mut spin = CountingSpin::default();
    let mut timer = SpinCountDown::with_delay(counting::<Bcm2837>(&mut spin));

    timer.start(Duration::from_secs(3_600));
    assert_eq!(timer.remaining(), Bcm2837::MAX_MICROSECONDS * Bcm2837::CYCLES_PER_MICROSECOND);
}

#[test]
fn countdown_bounds_block_timeout() {
    let mut spin = CountingSpin::default();
    let mut timer = SpinCountDown::with_delay(counting::<Bcm2837>(&mut spin));

    timer.start(Duration::from_micros(20));
    let result: Result<(), TimeoutError<()>> = block_timeout!(
        &mut timer,
        Err(nb::Error::WouldBlock)
    );
    assert!(matches!(result, Err(TimeoutError::Timeout)));

    timer.start(Duration::from_micros(20));
    let mut attempts = 0;
    let result: Result<u32, TimeoutError<()>> = block_timeout!(
        &mut timer,
        {
            attempts += 1;
            if attempts == 3 { Ok(attempts) } else { Err(nb::Error::WouldBlock) }
        }
    );
    assert!(matches!(result, Ok(3)));
}
