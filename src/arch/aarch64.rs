//! AArch64 implementations: load/store-exclusive locking, `dmb` barriers
//! and floating-point return-register extraction.

use std::arch::asm;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Acquires the spinlock at `word` (0 = unlocked, nonzero = held).
///
/// Spins with a scheduler yield while the lock reads held, then races for
/// it with a load-acquire-exclusive / store-exclusive pair; if the
/// exclusive load observes a held lock, or the exclusive store is rejected,
/// the whole sequence restarts from the plain read. No backoff beyond the
/// yield, so the lock is only suitable for short critical sections.
///
/// There is no release operation: release is a plain store of zero by the
/// caller, and nothing stops a caller releasing a lock it does not hold.
pub fn spin_lock(word: &AtomicUsize) {
    let addr = word.as_ptr();
    loop {
        while word.load(Ordering::Relaxed) != 0 {
            thread::yield_now();
        }
        let failed: u32;
        unsafe {
            asm!(
                "ldaxr {current}, [{addr}]",
                "cbnz {current}, 2f",
                "stxr {failed:w}, {locked}, [{addr}]",
                "b 3f",
                "2:",
                "clrex",
                "mov {failed:w}, #1",
                "3:",
                addr = in(reg) addr,
                locked = in(reg) 1usize,
                current = out(reg) _,
                failed = out(reg) failed,
                options(nostack, preserves_flags),
            );
        }
        if failed == 0 {
            return;
        }
    }
}

/// Full read/write ordering barrier (`dmb ish`).
#[inline]
pub fn mb() {
    // no `nomem`: the barrier must remain a compiler-visible memory side
    // effect
    unsafe { asm!("dmb ish", options(nostack, preserves_flags)) };
}

/// Store ordering barrier (`dmb ishst`).
#[inline]
pub fn wmb() {
    unsafe { asm!("dmb ishst", options(nostack, preserves_flags)) };
}

/// Reads the second floating-point return register (`d1`), where the
/// procedure-call standard leaves the imaginary half of a double-precision
/// complex return.
///
/// # Safety
///
/// Meaningful only immediately after a call returning a complex value in
/// registers; at any other point `d1` holds an unrelated value.
#[inline]
pub unsafe fn return_imag_f64() -> f64 {
    let imag: f64;
    asm!(
        "fmov {imag:d}, d1",
        imag = out(vreg) imag,
        options(nomem, nostack, preserves_flags),
    );
    imag
}

/// Single-precision counterpart of [`return_imag_f64`], reading `s1`.
///
/// # Safety
///
/// Same constraint as [`return_imag_f64`].
#[inline]
pub unsafe fn return_imag_f32() -> f32 {
    let imag: f32;
    asm!(
        "fmov {imag:s}, s1",
        imag = out(vreg) imag,
        options(nomem, nostack, preserves_flags),
    );
    imag
}
