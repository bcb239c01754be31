//! Hosted test support: a register window backed by ordinary memory and a
//! global logger that writes to stderr.

use std::cell::RefCell;
use std::sync::Once;

use rpi_blinky as rpi;
use rpi::gpio::map;
use rpi::mmio::{Register, RegisterWindow, Registers};
use rpi::pin::{self, Mode, Pin};


// - global logger ------------------------------------------------------------

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;
static INIT: Once = Once::new();

fn max_level() -> log::LevelFilter {
    if cfg!(feature = "log-trace") {
        log::LevelFilter::Trace
    } else if cfg!(feature = "log-debug") {
        log::LevelFilter::Debug
    } else if cfg!(feature = "log-info") {
        log::LevelFilter::Info
    } else if cfg!(feature = "log-warn") {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Error
    }
}

/// Installs the logger. Safe to call from every test.
pub fn init() {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(max_level());
        }
    });
}


// - MockWindow ---------------------------------------------------------------

const WORDS: usize = map::SIZE / 4;

/// A GPIO register block in heap memory.
///
/// Unlike the real controller, set and clear registers simply latch the
/// last value written. Writes made through the `Registers` impl are also
/// kept in order in a log.
pub struct MockWindow {
    words: *mut [u32; WORDS],
    window: RegisterWindow,
    writes: RefCell<Vec<(Register, u32)>>,
}

impl MockWindow {
    pub fn new() -> Self {
        init();
        let words = Box::into_raw(Box::new([0u32; WORDS]));
        let window = unsafe { RegisterWindow::new(words as usize, map::SIZE) };
        MockWindow {
            words,
            window,
            writes: RefCell::new(Vec::new()),
        }
    }

    /// A window whose every register starts out as `fill`.
    pub fn filled(fill: u32) -> Self {
        let mock = Self::new();
        for n in 0..WORDS {
            mock.poke(Register::at(n * 4), fill);
        }
        mock
    }

    pub fn window(&self) -> &RegisterWindow {
        &self.window
    }

    pub fn peek(&self, register: Register) -> u32 {
        self.window.read(register)
    }

    /// Stores `value` without logging it.
    pub fn poke(&self, register: Register, value: u32) {
        self.window.write(register, value)
    }

    /// Every write made through `Registers::write`, oldest first.
    pub fn writes(&self) -> Vec<(Register, u32)> {
        self.writes.borrow().clone()
    }

    pub fn clear_writes(&self) {
        self.writes.borrow_mut().clear();
    }

    /// The 3-bit function field of `pin` as currently stored.
    pub fn mode_field(&self, pin: Pin) -> u32 {
        let (register, shift) = pin::function_select(pin);
        (self.peek(register) >> shift) & Mode::MASK
    }
}

impl Registers for MockWindow {
    fn read(&self, register: Register) -> u32 {
        self.window.read(register)
    }

    fn write(&self, register: Register, value: u32) {
        self.writes.borrow_mut().push((register, value));
        self.window.write(register, value)
    }
}

impl Default for MockWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MockWindow {
    fn drop(&mut self) {
        drop(unsafe { Box::from_raw(self.words) });
    }
}


// - CountingSpin -------------------------------------------------------------

/// Busy-wait loop body that only counts how often it ran. Each run of
/// back-to-back iterations is also recorded as one chunk.
#[derive(Debug, Default)]
pub struct CountingSpin {
    pub count: u64,
    pub chunks: Vec<u32>,
}

impl rpi::delay::Spin for CountingSpin {
    fn spin(&mut self) {
        self.count += 1;
    }

    fn spin_many(&mut self, count: u32) {
        self.count += u64::from(count);
        self.chunks.push(count);
    }
}

pub fn pin(number: u8) -> Pin {
    match Pin::new(number) {
        Ok(pin) => pin,
        Err(e) => panic!("{}", e),
    }
}
