use core::fmt;


// - Error --------------------------------------------------------------------

/// Contract violations caught at the boundary, when a `Pin` or a delay
/// iteration count is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Pin identifier outside `0..=Pin::MAX` for the selected chip.
    InvalidPin(u8),
    /// Requested delay does not fit in the iteration counter after unit
    /// conversion.
    DurationOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPin(pin) => write!(f, "invalid gpio pin: {}", pin),
            Error::DurationOverflow => f.write_str("delay duration overflows the iteration counter"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
