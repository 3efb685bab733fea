//! Fine-grained strategy: one lock per key with ordered acquisition
//!
//! # Deadlock Prevention
//!
//! A transaction collects the distinct keys it will touch, sorts them
//! ascending and acquires their locks in that order. Any two transactions
//! sharing keys attempt the shared keys in the same relative order, so no
//! cycle of waiters can form.
//!
//! # Scans
//!
//! Keyed transactions also hold the gate in shared mode. A whole-catalog
//! scan takes the gate exclusively, which waits for every in-flight keyed
//! transaction to finish and keeps new ones out until the scan is done.
//! The gate is always taken before any per-key lock.
//!
//! # Lock Lifetime
//!
//! Per-key locks are created lazily on first reference and kept in the
//! table. They are only dropped by `reclaim` under an exclusive scope,
//! where no thread can hold or wait on one.
//!
//! Non-positive keys never get a lock. No record can exist under such a
//! key, so there is nothing for the lock to protect.

use crate::control::{ConcurrencyControl, LockingStrategy};
use crate::scope::{LockScope, INLINE_KEYS};
use bookledger_core::Isbn;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHasher;
use smallvec::SmallVec;
use std::hash::BuildHasherDefault;
use std::sync::Arc;
use tracing::trace;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Per-key lock table
pub struct KeyLockTable {
    gate: RwLock<()>,
    locks: DashMap<Isbn, Arc<Mutex<()>>, FxBuildHasher>,
}

impl KeyLockTable {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self {
            gate: RwLock::new(()),
            locks: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    /// Get or create the lock for `isbn`
    ///
    /// The map's shard guard is released before the caller blocks on the
    /// returned mutex.
    fn lock_for(&self, isbn: Isbn) -> Arc<Mutex<()>> {
        Arc::clone(
            self.locks
                .entry(isbn)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        )
    }
}

/// Distinct keys in ascending order
pub(crate) fn ordered_keys(keys: &[Isbn]) -> SmallVec<[Isbn; INLINE_KEYS]> {
    let mut ordered: SmallVec<[Isbn; INLINE_KEYS]> = keys.iter().copied().collect();
    ordered.sort_unstable();
    ordered.dedup();
    ordered
}

impl Default for KeyLockTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyLockTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyLockTable")
            .field("lock_count", &self.lock_count())
            .finish()
    }
}

impl ConcurrencyControl for KeyLockTable {
    fn strategy(&self) -> LockingStrategy {
        LockingStrategy::FineGrained
    }

    fn lock_keys(&self, keys: &[Isbn]) -> LockScope<'_> {
        let gate = self.gate.read();
        let mut ordered = ordered_keys(keys);
        ordered.retain(|isbn| isbn.is_valid());

        let mut guards = SmallVec::with_capacity(ordered.len());
        for isbn in &ordered {
            guards.push(self.lock_for(*isbn).lock_arc());
        }

        trace!(target: "bookledger::lock", keys = ordered.len(), "Key locks acquired");
        LockScope::keys(guards, gate)
    }

    fn lock_all(&self) -> LockScope<'_> {
        let gate = self.gate.write();
        trace!(target: "bookledger::lock", "Exclusive lock acquired");
        LockScope::exclusive(gate)
    }

    fn reclaim(&self, scope: &LockScope<'_>, is_live: &dyn Fn(Isbn) -> bool) -> usize {
        if !scope.is_exclusive() {
            return 0;
        }
        let before = self.locks.len();
        self.locks.retain(|isbn, _| is_live(*isbn));
        let reclaimed = before.saturating_sub(self.locks.len());
        if reclaimed > 0 {
            trace!(target: "bookledger::lock", reclaimed, "Key locks reclaimed");
        }
        reclaimed
    }

    fn lock_count(&self) -> usize {
        self.locks.len()
    }
}
