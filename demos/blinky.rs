//! Blinks the LED on GPIO 16.
//!
//! Linked into a kernel image by the boot code, which sets up a stack and
//! jumps to `kmain`.

#![no_main]
#![no_std]

use panic_halt as _;

use rpi_blinky as rpi;
use rpi::led::Led;


#[no_mangle]
pub extern "C" fn kmain() -> ! {
    // - board setup ----------------------------------------------------------

    let board = match rpi::Board::take() {
        Some(board) => board,
        None => panic!("board already taken"),
    };

    let mut delay = board.delay();
    let mut status = board.split_led_status();


    // - main loop ------------------------------------------------------------

    loop {
        status.on();
        delay.sleep_milliseconds(250).unwrap();

        status.off();
        delay.sleep_milliseconds(250).unwrap();
    }
}
