use crate::delay::SpinDelay;
use crate::gpio::{self, Gpio};
use crate::led::{self, StatusLed};
use crate::mmio::RegisterWindow;


// - memory map ---------------------------------------------------------------

cfg_if::cfg_if! {
    if #[cfg(feature = "bcm2711")] {
        /// Peripheral base in the ARM physical address space (low peripheral mode).
        pub const PERIPHERAL_BASE: usize = 0xFE00_0000;
    } else if #[cfg(feature = "bcm2835")] {
        pub const PERIPHERAL_BASE: usize = 0x2000_0000;
    } else {
        pub const PERIPHERAL_BASE: usize = 0x3F00_0000;
    }
}

pub const GPIO_BASE: usize = PERIPHERAL_BASE + 0x20_0000;


// - global static state ------------------------------------------------------

// `no_mangle` is used here to prevent linking different minor
// versions of this crate as that would let you `take` the board
// more than once (one per minor version)
#[no_mangle]
static RPI_BLINKY_BOARD: () = ();

/// Set to `true` when `take` was called to make `Board` a singleton.
/// Not atomic: exclusive loads and stores are unusable on AArch64 until
/// the MMU is on. Single thread of execution only.
static mut TAKEN: bool = false;


// - Board --------------------------------------------------------------------

/// Process-wide hardware context. Owns the GPIO register window and lends it
/// out to whatever needs register access.
pub struct Board {
    gpio: RegisterWindow,
}

impl Board {
    /// Returns the board *once*
    #[inline]
    pub fn take() -> Option<Self> {
        if unsafe { TAKEN } {
            None
        } else {
            unsafe { TAKEN = true; }
            log::debug!("board: gpio at {:#010x}", GPIO_BASE);
            Some(unsafe { Board::steal() })
        }
    }

    /// # Safety
    ///
    /// Creates a second handle to the same registers if the board was
    /// already taken.
    #[inline]
    pub unsafe fn steal() -> Self {
        Board {
            gpio: RegisterWindow::new(GPIO_BASE, gpio::map::SIZE),
        }
    }

    pub fn gpio(&self) -> Gpio<'_> {
        Gpio::new(&self.gpio)
    }

    pub fn delay(&self) -> SpinDelay {
        SpinDelay::new()
    }

    /// Configures the status LED pin as an output and returns the LED.
    pub fn split_led_status(&self) -> StatusLed<'_> {
        StatusLed::new(self.gpio().into_output(led::STATUS_LED))
    }
}
