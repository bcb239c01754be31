use crate::hal::digital::v2::{OutputPin, StatefulOutputPin};

use crate::pin::Pin;
use crate::pins::Output;


// - constants ----------------------------------------------------------------

/// GPIO line the status LED is wired to.
pub const STATUS_LED: Pin = match Pin::new(16) {
    Ok(pin) => pin,
    Err(_) => panic!("status led pin out of range"),
};


// - traits -------------------------------------------------------------------

/// Generic LED
pub trait Led {
    /// Turns the LED off
    fn off(&mut self);

    /// Turns the LED on
    fn on(&mut self);

    /// Flips the LED
    fn toggle(&mut self);
}


// - UserLed ------------------------------------------------------------------

/// An LED driven high-active by an output pin.
pub struct UserLed<PIN>(PIN);

impl<PIN> UserLed<PIN>
where
    PIN: OutputPin + StatefulOutputPin,
{
    pub fn new(pin: PIN) -> Self {
        UserLed(pin)
    }

    pub fn is_on(&self) -> bool {
        matches!(self.0.is_set_high(), Ok(true))
    }

    pub fn release(self) -> PIN {
        self.0
    }
}

impl<PIN> Led for UserLed<PIN>
where
    PIN: OutputPin + StatefulOutputPin,
{
    fn on(&mut self) {
        if let Ok(()) = self.0.set_high() {}
    }

    fn off(&mut self) {
        if let Ok(()) = self.0.set_low() {}
    }

    fn toggle(&mut self) {
        if self.is_on() {
            self.off();
        } else {
            self.on();
        }
    }
}

pub type StatusLed<'a> = UserLed<Output<'a>>;
