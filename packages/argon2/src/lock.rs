//! Serialization of primitive invocations
//!
//! The primitive is treated as unsafe for concurrent use, so every call runs
//! under a [`PrimitiveLock`]. By default all contexts share one
//! process-wide [`GlobalLock`]; tests may install their own implementation.

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, PoisonError};

static PRIMITIVE_MUTEX: Mutex<()> = Mutex::new(());

static GLOBAL_LOCK: Lazy<Arc<dyn PrimitiveLock>> = Lazy::new(|| Arc::new(GlobalLock));

trait Held {}

impl<T> Held for T {}

/// Proof that the lock is held; dropping it releases the lock
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a> {
    _held: Box<dyn Held + 'a>,
}

impl<'a> LockGuard<'a> {
    /// Wrap whatever keeps the lock held
    pub fn new<T: 'a>(held: T) -> Self {
        Self {
            _held: Box::new(held),
        }
    }

    /// Guard that holds nothing
    pub fn unlocked() -> Self {
        Self::new(())
    }
}

/// Mutual exclusion around primitive invocations
pub trait PrimitiveLock: Send + Sync {
    /// Block until the primitive may be invoked
    fn acquire(&self) -> LockGuard<'_>;
}

/// The process-wide lock shared by every context
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalLock;

impl PrimitiveLock for GlobalLock {
    fn acquire(&self) -> LockGuard<'_> {
        // Guards no data, so poisoning is ignored
        let guard = PRIMITIVE_MUTEX
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        LockGuard::new(guard)
    }
}

/// Lock that never blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLock;

impl PrimitiveLock for NoopLock {
    fn acquire(&self) -> LockGuard<'_> {
        LockGuard::unlocked()
    }
}

/// Shared handle to the [`GlobalLock`]
#[must_use]
pub fn global_lock() -> Arc<dyn PrimitiveLock> {
    Arc::clone(&GLOBAL_LOCK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn global_lock_excludes_holders() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let active = Arc::clone(&active);
                let peak = Arc::clone(&peak);
                thread::spawn(move || {
                    let lock = global_lock();
                    for _ in 0..10 {
                        let _guard = lock.acquire();
                        let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_micros(50));
                        active.fetch_sub(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker thread should not panic");
        }
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn global_lock_is_shared() {
        assert!(Arc::ptr_eq(&global_lock(), &global_lock()));
    }

    #[test]
    fn noop_lock_is_reentrant() {
        let lock = NoopLock;
        let _a = lock.acquire();
        let _b = lock.acquire();
    }
}
