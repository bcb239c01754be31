//! GPIO controller operations over the BCM283x / BCM2711 register block.

#[cfg(not(feature = "bcm2711"))]
use crate::asm;
use crate::mmio::{RegisterWindow, Registers};
use crate::pin::{self, Level, Mode, Pin, Pull};
use crate::pins::{Input, Output};


// - register map -------------------------------------------------------------

/// GPIO register offsets from the controller base, as in the peripherals
/// datasheet.
pub mod map {
    use crate::mmio::Register;

    pub const GPFSEL0: Register = Register::at(0x00);
    pub const GPFSEL1: Register = Register::at(0x04);
    pub const GPFSEL2: Register = Register::at(0x08);
    pub const GPFSEL3: Register = Register::at(0x0C);
    pub const GPFSEL4: Register = Register::at(0x10);
    pub const GPFSEL5: Register = Register::at(0x14);

    pub const GPSET0: Register = Register::at(0x1C);
    pub const GPSET1: Register = Register::at(0x20);

    pub const GPCLR0: Register = Register::at(0x28);
    pub const GPCLR1: Register = Register::at(0x2C);

    pub const GPLEV0: Register = Register::at(0x34);
    pub const GPLEV1: Register = Register::at(0x38);

    // BCM2835 / BCM2837 pull control
    pub const GPPUD: Register = Register::at(0x94);
    pub const GPPUDCLK0: Register = Register::at(0x98);
    pub const GPPUDCLK1: Register = Register::at(0x9C);

    // BCM2711 pull control
    pub const GPIO_PUP_PDN_CNTRL_REG0: Register = Register::at(0xE4);
    pub const GPIO_PUP_PDN_CNTRL_REG3: Register = Register::at(0xF0);

    /// Size of the register block in bytes.
    pub const SIZE: usize = GPIO_PUP_PDN_CNTRL_REG3.offset() + 4;

    pub const SET: [Register; 2] = [GPSET0, GPSET1];
    pub const CLR: [Register; 2] = [GPCLR0, GPCLR1];
    pub const LEV: [Register; 2] = [GPLEV0, GPLEV1];
    pub const PUDCLK: [Register; 2] = [GPPUDCLK0, GPPUDCLK1];
}

/// Cycles to hold the GPPUD control signal and clock, per the datasheet.
#[cfg(not(feature = "bcm2711"))]
const PULL_SETTLE_CYCLES: u32 = 150;


// - Gpio ---------------------------------------------------------------------

/// Named operations on the GPIO controller.
///
/// Borrows the board's register window; any number of `Gpio` handles may
/// exist at once since they all run on the one thread of execution.
pub struct Gpio<'a, R = RegisterWindow> {
    window: &'a R,
}

impl<R> Clone for Gpio<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Gpio<'_, R> {}

impl<'a, R: Registers> Gpio<'a, R> {
    pub fn new(window: &'a R) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &'a R {
        self.window
    }

    /// Sets the function of `pin`, leaving the other nine fields of its
    /// function-select register untouched.
    pub fn set_pin_mode(&self, pin: Pin, mode: Mode) {
        let (register, shift) = pin::function_select(pin);
        log::trace!("gpio{}: mode {:?}", pin.number(), mode);
        self.window.modify(register, |value| {
            (value & !(Mode::MASK << shift)) | (mode.bits() << shift)
        });
    }

    pub fn pin_mode(&self, pin: Pin) -> Mode {
        let (register, shift) = pin::function_select(pin);
        Mode::from_bits(self.window.read(register) >> shift)
    }

    /// Drives `pin` high. The set register ignores zero bits, so this is a
    /// plain write.
    pub fn set_pin_high(&self, pin: Pin) {
        let (bank, bit) = pin::output_bank(pin);
        self.window.write(map::SET[bank], 1 << bit);
    }

    /// Drives `pin` low. The clear register ignores zero bits, so this is a
    /// plain write.
    pub fn set_pin_low(&self, pin: Pin) {
        let (bank, bit) = pin::output_bank(pin);
        self.window.write(map::CLR[bank], 1 << bit);
    }

    pub fn set_level(&self, pin: Pin, level: Level) {
        match level {
            Level::High => self.set_pin_high(pin),
            Level::Low => self.set_pin_low(pin),
        }
    }

    /// Actual level on the pad, whatever the pin's mode.
    pub fn level(&self, pin: Pin) -> Level {
        let (bank, bit) = pin::output_bank(pin);
        Level::from(self.window.read(map::LEV[bank]) & (1 << bit) != 0)
    }

    pub fn is_high(&self, pin: Pin) -> bool {
        self.level(pin) == Level::High
    }

    /// Configures the pull resistor of `pin`.
    #[cfg(not(feature = "bcm2711"))]
    pub fn set_pull(&self, pin: Pin, pull: Pull) {
        let (bank, bit) = pin::output_bank(pin);
        log::trace!("gpio{}: pull {:?}", pin.number(), pull);

        self.window.write(map::GPPUD, pull.gppud_bits());
        asm::delay_cycles(PULL_SETTLE_CYCLES);
        self.window.write(map::PUDCLK[bank], 1 << bit);
        asm::delay_cycles(PULL_SETTLE_CYCLES);
        self.window.write(map::GPPUD, 0);
        self.window.write(map::PUDCLK[bank], 0);
    }

    /// Configures the pull resistor of `pin`.
    #[cfg(feature = "bcm2711")]
    pub fn set_pull(&self, pin: Pin, pull: Pull) {
        let (register, shift) = pin::pull_control(pin);
        log::trace!("gpio{}: pull {:?}", pin.number(), pull);
        self.window.modify(register, |value| {
            (value & !(0b11 << shift)) | (pull.pup_pdn_bits() << shift)
        });
    }

    /// Switches `pin` to output and returns a handle for driving it.
    pub fn into_output(self, pin: Pin) -> Output<'a, R> {
        self.set_pin_mode(pin, Mode::Output);
        Output::new(self, pin)
    }

    /// Switches `pin` to input with the given pull and returns a handle for
    /// reading it.
    pub fn into_input(self, pin: Pin, pull: Pull) -> Input<'a, R> {
        self.set_pin_mode(pin, Mode::Input);
        self.set_pull(pin, pull);
        Input::new(self, pin)
    }
}
