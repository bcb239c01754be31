//! Busy-wait calibration.
//!
//! The delay service has no timer to read, so it converts durations into
//! loop iterations using a fixed iterations-per-microsecond constant. That
//! constant depends on the core clock, the cache state and on exactly what
//! the compiler emitted for the loop body, so it is only ever right for one
//! board, clock configuration and build profile. Re-measure it (scope a pin
//! toggled around a long delay) when any of those change.


// - types --------------------------------------------------------------------

pub trait Calibration {
    /// Loop iterations per microsecond.
    ///
    /// The default has no derivation behind it. It is a placeholder that
    /// gives a visible blink on a Pi 3 at firmware clocks with caches off.
    const CYCLES_PER_MICROSECOND: u32 = 6;

    /// Longest delay, in microseconds, whose iteration count fits in a `u32`.
    const MAX_MICROSECONDS: u32 = u32::MAX / Self::CYCLES_PER_MICROSECOND;

    /// Longest delay, in milliseconds, whose iteration count fits in a `u32`.
    const MAX_MILLISECONDS: u32 = Self::MAX_MICROSECONDS / 1_000;
}

/// Calibration of the reference board.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bcm2837;

impl Calibration for Bcm2837 {}


// - tests --------------------------------------------------------------------
