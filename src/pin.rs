use crate::error::{Error, Result};
use crate::gpio::map;
use crate::mmio::Register;


// - Pin ----------------------------------------------------------------------

/// A GPIO line number that is known to exist on the selected chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(u8);

impl Pin {
    #[cfg(feature = "bcm2711")]
    pub const MAX: u8 = 57;
    #[cfg(not(feature = "bcm2711"))]
    pub const MAX: u8 = 53;

    pub const fn new(number: u8) -> Result<Self> {
        if number <= Self::MAX {
            Ok(Pin(number))
        } else {
            Err(Error::InvalidPin(number))
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// All pins of the chip, in order.
    pub fn all() -> impl Iterator<Item = Pin> {
        (0..=Self::MAX).map(Pin)
    }
}

impl TryFrom<u8> for Pin {
    type Error = Error;

    fn try_from(number: u8) -> Result<Self> {
        Pin::new(number)
    }
}

impl From<Pin> for u8 {
    fn from(pin: Pin) -> u8 {
        pin.0
    }
}


// - Mode ---------------------------------------------------------------------

/// Pin function, encoded as in the GPFSELn 3-bit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    Input = 0b000,
    Output = 0b001,
    Alt0 = 0b100,
    Alt1 = 0b101,
    Alt2 = 0b110,
    Alt3 = 0b111,
    Alt4 = 0b011,
    Alt5 = 0b010,
}

impl Mode {
    pub const MASK: u32 = 0b111;

    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Decodes the low three bits of `field`. Every 3-bit value is a mode.
    pub const fn from_bits(field: u32) -> Self {
        match field & Self::MASK {
            0b000 => Mode::Input,
            0b001 => Mode::Output,
            0b100 => Mode::Alt0,
            0b101 => Mode::Alt1,
            0b110 => Mode::Alt2,
            0b111 => Mode::Alt3,
            0b011 => Mode::Alt4,
            _ => Mode::Alt5,
        }
    }
}


// - Pull ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    Off,
    Down,
    Up,
}

impl Pull {
    /// GPPUD control value (BCM2835 / BCM2837).
    pub const fn gppud_bits(self) -> u32 {
        match self {
            Pull::Off => 0b00,
            Pull::Down => 0b01,
            Pull::Up => 0b10,
        }
    }

    /// GPIO_PUP_PDN_CNTRL_REGn field value (BCM2711). Note that up and down
    /// are swapped relative to GPPUD.
    pub const fn pup_pdn_bits(self) -> u32 {
        match self {
            Pull::Off => 0b00,
            Pull::Up => 0b01,
            Pull::Down => 0b10,
        }
    }
}


// - Level --------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}


// - register locations -------------------------------------------------------

/// Function-select register holding `pin`, and the shift of its 3-bit field.
///
/// Each GPFSELn covers ten pins.
pub const fn function_select(pin: Pin) -> (Register, u32) {
    let n = pin.0 as usize;
    (map::GPFSEL0.nth(n / 10), ((n % 10) * 3) as u32)
}

/// Output bank (0 for pins 0..=31, 1 above) and bit position of `pin` in the
/// set, clear and level registers.
pub const fn output_bank(pin: Pin) -> (usize, u32) {
    let n = pin.0 as usize;
    (n / 32, (n % 32) as u32)
}

/// BCM2711 pull control register holding `pin`, and the shift of its 2-bit
/// field. Each register covers sixteen pins.
pub const fn pull_control(pin: Pin) -> (Register, u32) {
    let n = pin.0 as usize;
    (map::GPIO_PUP_PDN_CNTRL_REG0.nth(n / 16), ((n % 16) * 2) as u32)
}


// - tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_pins_past_max() {
        assert_eq!(Pin::new(Pin::MAX).map(Pin::number), Ok(Pin::MAX));
        assert_eq!(Pin::new(Pin::MAX + 1), Err(Error::InvalidPin(Pin::MAX + 1)));
        assert_eq!(Pin::try_from(255), Err(Error::InvalidPin(255)));
    }

    #[test]
    fn gpio16_lives_in_fsel1_bits_18_to_20() {
        let pin = Pin::new(16).unwrap();
        assert_eq!(function_select(pin), (map::GPFSEL1, 18));
        assert_eq!(output_bank(pin), (0, 16));
    }

    #[test]
    fn pins_above_31_use_second_bank() {
        let pin = Pin::new(32).unwrap();
        assert_eq!(output_bank(pin), (1, 0));
        let pin = Pin::new(53).unwrap();
        assert_eq!(output_bank(pin), (1, 21));
        assert_eq!(function_select(pin), (map::GPFSEL5, 9));
    }

    #[test]
    fn mode_bits_decode_back() {
        for mode in [
            Mode::Input, Mode::Output,
            Mode::Alt0, Mode::Alt1, Mode::Alt2, Mode::Alt3, Mode::Alt4, Mode::Alt5,
        ] {
            assert_eq!(Mode::from_bits(mode.bits()), mode);
        }
    }

    #[test]
    fn pull_control_covers_sixteen_pins() {
        let pin = Pin::new(17).unwrap();
        assert_eq!(pull_control(pin), (map::GPIO_PUP_PDN_CNTRL_REG0.nth(1), 2));
    }
}
