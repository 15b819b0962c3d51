//! Portable fallbacks for hosts without the AArch64 primitives.

use std::sync::atomic::{fence, AtomicUsize, Ordering};
use std::thread;

/// Acquires the spinlock at `word` (0 = unlocked, nonzero = held).
///
/// Same contract as the AArch64 version: yield while the lock reads held,
/// then race for it with a compare-exchange; a failed exchange restarts
/// from the plain read. Release is a plain store of zero by the caller.
pub fn spin_lock(word: &AtomicUsize) {
    loop {
        while word.load(Ordering::Relaxed) != 0 {
            thread::yield_now();
        }
        if word
            .compare_exchange_weak(0, 1, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            return;
        }
    }
}

/// Full read/write ordering barrier.
#[inline]
pub fn mb() {
    fence(Ordering::SeqCst);
}

/// Store ordering barrier.
#[inline]
pub fn wmb() {
    fence(Ordering::Release);
}
