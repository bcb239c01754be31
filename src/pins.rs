//! Typed pin handles implementing the `embedded-hal` digital traits.

use core::convert::Infallible;

use crate::hal::digital::v2::{toggleable, InputPin, OutputPin, StatefulOutputPin};

use crate::gpio::Gpio;
use crate::mmio::{RegisterWindow, Registers};
use crate::pin::{Level, Pin};


// - Output -------------------------------------------------------------------

/// A pin configured as an output.
pub struct Output<'a, R = RegisterWindow> {
    gpio: Gpio<'a, R>,
    pin: Pin,
    level: Level,
}

impl<'a, R: Registers> Output<'a, R> {
    pub(crate) fn new(gpio: Gpio<'a, R>, pin: Pin) -> Self {
        let level = gpio.level(pin);
        Self { gpio, pin, level }
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }

    pub fn release(self) -> (Gpio<'a, R>, Pin) {
        (self.gpio, self.pin)
    }
}

impl<R: Registers> OutputPin for Output<'_, R> {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.gpio.set_pin_high(self.pin);
        self.level = Level::High;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.gpio.set_pin_low(self.pin);
        self.level = Level::Low;
        Ok(())
    }
}

// The level register reflects the pad, which a load on the pin can pull
// away from what was driven, so the driven level is tracked here instead.
impl<R: Registers> StatefulOutputPin for Output<'_, R> {
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(self.level == Level::High)
    }

    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(self.level == Level::Low)
    }
}

impl<R: Registers> toggleable::Default for Output<'_, R> {}


// - Input --------------------------------------------------------------------

/// A pin configured as an input.
pub struct Input<'a, R = RegisterWindow> {
    gpio: Gpio<'a, R>,
    pin: Pin,
}

impl<'a, R: Registers> Input<'a, R> {
    pub(crate) fn new(gpio: Gpio<'a, R>, pin: Pin) -> Self {
        Self { gpio, pin }
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }

    pub fn release(self) -> (Gpio<'a, R>, Pin) {
        (self.gpio, self.pin)
    }
}

impl<R: Registers> InputPin for Input<'_, R> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.gpio.is_high(self.pin))
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.gpio.is_high(self.pin))
    }
}
