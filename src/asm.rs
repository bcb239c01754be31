//! Architecture "do nothing" primitive used by the busy-wait loops.
//!
//! The instruction differs per target. On ARM it is a real `nop` emitted
//! through `asm!`, which the compiler must treat as having side effects and
//! therefore can neither drop nor hoist out of a loop. On other targets
//! (hosted test builds) a spin-loop hint plus a compiler fence stands in.

cfg_if::cfg_if! {
    if #[cfg(target_arch = "aarch64")] {
        #[inline(always)]
        pub fn nop() {
            aarch64_cpu::asm::nop();
        }
    } else if #[cfg(target_arch = "arm")] {
        #[inline(always)]
        pub fn nop() {
            unsafe { core::arch::asm!("nop", options(nostack, preserves_flags)) }
        }
    } else {
        #[inline(always)]
        pub fn nop() {
            core::hint::spin_loop();
            core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
        }
    }
}

/// Executes `count` `nop`s.
#[inline(never)]
pub fn delay_cycles(count: u32) {
    for _ in 0..count {
        nop();
    }
}
