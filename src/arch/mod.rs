//! Architecture primitives consumed by the kernel layer at runtime.
//!
//! On aarch64 these map directly to hardware instructions. Every other
//! target gets a portable fallback with the same contracts, so the crate
//! builds and its concurrency tests run on any host.

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "aarch64")]
pub use self::aarch64::*;

#[cfg(not(target_arch = "aarch64"))]
mod generic;
#[cfg(not(target_arch = "aarch64"))]
pub use self::generic::*;

use std::time::{SystemTime, UNIX_EPOCH};

/// Millisecond timestamp from the wall clock.
///
/// Not monotonic: the wall clock can jump. Callers needing monotonic timing
/// must use a different source.
pub fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// Signed integer division behind a stable call boundary.
///
/// Adds no semantics of its own; a zero divisor is a caller contract
/// violation and panics like any Rust integer division.
#[inline]
pub fn quick_divide(x: i32, y: i32) -> i32 {
    x / y
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::UnsafeCell;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    struct Shared {
        lock: AtomicUsize,
        counter: UnsafeCell<u64>,
    }

    // access to `counter` is serialized by `lock`
    unsafe impl Sync for Shared {}

    #[test]
    fn test_spin_lock_no_lost_updates() {
        const THREADS: usize = 8;
        const ITERATIONS: u64 = 10_000;

        let shared = Arc::new(Shared {
            lock: AtomicUsize::new(0),
            counter: UnsafeCell::new(0),
        });

        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for _ in 0..ITERATIONS {
                        spin_lock(&shared.lock);
                        unsafe { *shared.counter.get() += 1 };
                        shared.lock.store(0, Ordering::Release);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker panicked");
        }

        let total = unsafe { *shared.counter.get() };
        assert_eq!(total, THREADS as u64 * ITERATIONS);
    }

    #[test]
    fn test_spin_lock_uncontended() {
        let lock = AtomicUsize::new(0);
        spin_lock(&lock);
        assert_eq!(lock.load(Ordering::Relaxed), 1);
        lock.store(0, Ordering::Release);
        // immediately reacquirable
        spin_lock(&lock);
        assert_eq!(lock.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_barriers_are_callable() {
        mb();
        wmb();
    }

    #[test]
    fn test_quick_divide() {
        assert_eq!(quick_divide(7, 2), 3);
        assert_eq!(quick_divide(-7, 2), -3);
        assert_eq!(quick_divide(0, 5), 0);
    }

    #[test]
    fn test_wall_clock_reads_nonzero() {
        assert!(wall_clock_ms() > 0);
    }
}
