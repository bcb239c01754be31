//! Board support crate for Raspberry Pi GPIO
//!
//! Typed, volatile access to the GPIO controller of BCM2835 / BCM2837 /
//! BCM2711 chips plus a calibrated busy-wait delay, for bare-metal code that
//! runs without an operating system or interrupts.
//!
//! # Usage - see demos/
//!
//! ```no_run
//! use rpi_blinky::Board;
//! use rpi_blinky::led::STATUS_LED;
//! use rpi_blinky::pin::Mode;
//!
//! let board = Board::take().unwrap();
//! let gpio = board.gpio();
//! let mut delay = board.delay();
//!
//! gpio.set_pin_mode(STATUS_LED, Mode::Output);
//! loop {
//!     gpio.set_pin_high(STATUS_LED);
//!     delay.sleep_milliseconds(250).unwrap();
//!     gpio.set_pin_low(STATUS_LED);
//!     delay.sleep_milliseconds(250).unwrap();
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub use embedded_hal as hal;


// - modules ------------------------------------------------------------------

pub mod asm;
pub mod board;
pub mod clocks;
pub mod delay;
pub mod error;
pub mod gpio;
pub mod led;
pub mod mmio;
pub mod pin;
pub mod pins;
pub mod timer;

pub use board::Board;
pub use clocks::Calibration;
pub use delay::SpinDelay;
pub use error::{Error, Result};
pub use gpio::Gpio;
pub use pin::{Level, Mode, Pin, Pull};
pub use timer::SpinCountDown;
