//! RAII guard for the locks held by one transaction

use parking_lot::{ArcMutexGuard, MutexGuard, RawMutex, RwLockReadGuard, RwLockWriteGuard};
use smallvec::SmallVec;

/// Per-key guards held inline before spilling to the heap
pub(crate) const INLINE_KEYS: usize = 8;

type KeyGuard = ArcMutexGuard<RawMutex, ()>;

/// Locks held by one transaction
///
/// Every lock is released when the scope is dropped, on every exit path
/// of the operation that created it.
#[must_use = "locks are released as soon as the scope is dropped"]
pub struct LockScope<'a> {
    inner: ScopeInner<'a>,
}

// Field order matters: per-key guards drop before the gate guard.
enum ScopeInner<'a> {
    Coarse(MutexGuard<'a, ()>),
    Keys {
        guards: SmallVec<[KeyGuard; INLINE_KEYS]>,
        _gate: RwLockReadGuard<'a, ()>,
    },
    Exclusive(RwLockWriteGuard<'a, ()>),
}

impl<'a> LockScope<'a> {
    pub(crate) fn coarse(guard: MutexGuard<'a, ()>) -> Self {
        Self {
            inner: ScopeInner::Coarse(guard),
        }
    }

    pub(crate) fn keys(
        guards: SmallVec<[KeyGuard; INLINE_KEYS]>,
        gate: RwLockReadGuard<'a, ()>,
    ) -> Self {
        Self {
            inner: ScopeInner::Keys {
                guards,
                _gate: gate,
            },
        }
    }

    pub(crate) fn exclusive(guard: RwLockWriteGuard<'a, ()>) -> Self {
        Self {
            inner: ScopeInner::Exclusive(guard),
        }
    }

    /// Whether no other transaction can run while this scope is held
    pub fn is_exclusive(&self) -> bool {
        matches!(self.inner, ScopeInner::Coarse(_) | ScopeInner::Exclusive(_))
    }

    /// Number of per-key locks held (0 for coarse and exclusive scopes)
    pub fn keys_held(&self) -> usize {
        match &self.inner {
            ScopeInner::Keys { guards, .. } => guards.len(),
            _ => 0,
        }
    }
}

impl std::fmt::Debug for LockScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.inner {
            ScopeInner::Coarse(_) => "coarse",
            ScopeInner::Keys { .. } => "keys",
            ScopeInner::Exclusive(_) => "exclusive",
        };
        f.debug_struct("LockScope")
            .field("kind", &kind)
            .field("keys_held", &self.keys_held())
            .finish()
    }
}
