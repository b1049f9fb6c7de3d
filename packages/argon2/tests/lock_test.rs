//! Serialization of primitive calls through an injected lock

use cryypt_argon2::{Context, LockGuard, Mode, PrimitiveLock, SecretSink};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Mutex that records how many holders it has had at once
#[derive(Default)]
struct CountingLock {
    inner: Mutex<()>,
    active: Arc<AtomicUsize>,
    peak: AtomicUsize,
    acquisitions: AtomicUsize,
}

struct Release(Arc<AtomicUsize>);

impl Drop for Release {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl PrimitiveLock for CountingLock {
    fn acquire(&self) -> LockGuard<'_> {
        let guard = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        // Tuple fields drop in order: counter first, then the mutex
        LockGuard::new((Release(Arc::clone(&self.active)), guard))
    }
}

fn small_context(lock: Arc<dyn PrimitiveLock>) -> Context {
    let mut ctx = Context::new(Some(Mode::Argon2id));
    ctx.set_memory(64)
        .set_iterations(1)
        .set_parallelism(1)
        .set_lock(lock);
    ctx
}

#[test]
fn test_concurrent_calls_never_overlap() {
    let lock = Arc::new(CountingLock::default());
    let workers: Vec<_> = (0..8)
        .map(|i| {
            let mut ctx = small_context(lock.clone());
            thread::spawn(move || {
                let salt = format!("somesalt{i}");
                let hash = ctx
                    .hash(&mut b"somepassword".to_vec(), salt.as_bytes())
                    .expect("small parameters are valid");
                assert!(ctx
                    .verify(&hash, &mut b"somepassword".to_vec(), salt.as_bytes())
                    .expect("verification should run"));
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker should not panic");
    }

    assert_eq!(lock.peak.load(Ordering::SeqCst), 1);
    assert_eq!(lock.acquisitions.load(Ordering::SeqCst), 16);
    assert_eq!(lock.active.load(Ordering::SeqCst), 0);
}

#[test]
fn test_lock_is_released_after_failure() {
    let lock = Arc::new(CountingLock::default());
    let mut ctx = small_context(lock.clone());

    assert!(ctx.hash(&mut b"somepassword".to_vec(), b"s").is_err());
    assert_eq!(lock.active.load(Ordering::SeqCst), 0);

    ctx.hash(&mut b"somepassword".to_vec(), b"somesalt")
        .expect("lock must be free again");
    assert_eq!(lock.acquisitions.load(Ordering::SeqCst), 2);
}

#[test]
fn test_chain_takes_the_lock_per_link() {
    let lock = Arc::new(CountingLock::default());
    let mut ctx = small_context(lock.clone());
    let mut a = Vec::new();
    let mut b = Vec::new();
    let mut c = Vec::new();
    let mut sinks: [&mut dyn SecretSink; 3] = [&mut a, &mut b, &mut c];
    ctx.derive_chain(&mut b"somepassword".to_vec(), b"somesalt", &mut sinks)
        .expect("chain should derive");
    assert_eq!(lock.acquisitions.load(Ordering::SeqCst), 3);
    assert_eq!(lock.peak.load(Ordering::SeqCst), 1);
}

#[test]
fn test_contexts_share_the_global_lock_by_default() {
    let a = Context::default();
    let b = Context::new(Some(Mode::Argon2d));
    assert!(Arc::ptr_eq(a.lock(), b.lock()));
}
