//! Coarse strategy: one mutex around the whole catalog
//!
//! Every operation, keyed or scan, acquires the same mutex for its full
//! duration. Atomicity is trivial; there is no intra-store parallelism.

use crate::control::{ConcurrencyControl, LockingStrategy};
use crate::scope::LockScope;
use bookledger_core::Isbn;
use parking_lot::Mutex;

/// Single global lock
#[derive(Debug, Default)]
pub struct CoarseLock {
    lock: Mutex<()>,
}

impl CoarseLock {
    /// Create an unlocked coarse lock
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
        }
    }
}

impl ConcurrencyControl for CoarseLock {
    fn strategy(&self) -> LockingStrategy {
        LockingStrategy::Coarse
    }

    fn lock_keys(&self, _keys: &[Isbn]) -> LockScope<'_> {
        LockScope::coarse(self.lock.lock())
    }

    fn lock_all(&self) -> LockScope<'_> {
        LockScope::coarse(self.lock.lock())
    }

    fn reclaim(&self, _scope: &LockScope<'_>, _is_live: &dyn Fn(Isbn) -> bool) -> usize {
        0
    }
}
