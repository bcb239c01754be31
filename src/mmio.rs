//! Volatile access to a fixed window of memory-mapped registers.
//!
//! `RegisterWindow` is the only place in the crate that dereferences a raw
//! peripheral address. Everything above it talks in terms of named
//! `Register` offsets, which the window checks against its extent before
//! every access.

use core::marker::PhantomData;
use core::ptr::{read_volatile, write_volatile};


// - Register -----------------------------------------------------------------

/// Byte offset of a 32-bit register from the start of a window. Always word
/// aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register(usize);

impl Register {
    /// Panics if `offset` is not word aligned.
    pub const fn at(offset: usize) -> Self {
        assert!(offset % 4 == 0, "register offset not word aligned");
        Register(offset)
    }

    pub const fn offset(self) -> usize {
        self.0
    }

    /// The register `n` words after this one.
    pub const fn nth(self, n: usize) -> Self {
        Register(self.0 + n * 4)
    }
}


// - Registers ----------------------------------------------------------------

/// Word-sized register access by offset.
pub trait Registers {
    fn read(&self, register: Register) -> u32;

    fn write(&self, register: Register, value: u32);

    /// Read-modify-write of a single register.
    #[inline(always)]
    fn modify<F>(&self, register: Register, f: F)
    where
        F: FnOnce(u32) -> u32,
        Self: Sized,
    {
        let value = self.read(register);
        self.write(register, f(value));
    }
}


// - RegisterWindow -----------------------------------------------------------

/// A block of `len` bytes of 32-bit registers at a fixed base address.
///
/// The window is neither `Clone` nor `Sync`: it is created once at start-up,
/// owned by the board and lent out by reference. Reads and writes are never
/// cached, merged or elided by the compiler. An access outside the window is
/// a contract violation and panics before touching memory.
pub struct RegisterWindow {
    base: usize,
    len: usize,
    _marker: PhantomData<*mut u32>,
}

impl RegisterWindow {
    /// # Safety
    ///
    /// `base .. base + len` must be a word-aligned register block that stays
    /// mapped for the lifetime of the window. At most one window may exist
    /// per block.
    pub const unsafe fn new(base: usize, len: usize) -> Self {
        RegisterWindow {
            base,
            len,
            _marker: PhantomData,
        }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, register: Register) -> bool {
        register.offset() % 4 == 0
            && register.offset().checked_add(4).map_or(false, |end| end <= self.len)
    }

    #[inline(always)]
    fn ptr(&self, register: Register) -> *mut u32 {
        assert!(
            self.contains(register),
            "register {:#x} outside window of {:#x} bytes",
            register.offset(),
            self.len
        );
        (self.base + register.offset()) as *mut u32
    }
}

impl Registers for RegisterWindow {
    #[inline(always)]
    fn read(&self, register: Register) -> u32 {
        let ptr = self.ptr(register);
        unsafe { read_volatile(ptr) }
    }

    #[inline(always)]
    fn write(&self, register: Register, value: u32) {
        let ptr = self.ptr(register);
        unsafe { write_volatile(ptr, value) }
    }
}
