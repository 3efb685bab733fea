//! Transaction statistics
//!
//! Counters are updated with relaxed atomics: they are monotonic and only
//! read for reporting, so no ordering with catalog updates is needed.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters owned by a ledger
#[derive(Debug, Default)]
pub struct TransactionStats {
    committed: AtomicU64,
    aborted: AtomicU64,
    sale_miss_events: AtomicU64,
}

impl TransactionStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an operation that completed successfully
    pub fn record_commit(&self) {
        self.committed.fetch_add(1, Ordering::Relaxed);
    }

    /// Count an operation that was rejected
    pub fn record_abort(&self) {
        self.aborted.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a purchase rejected for insufficient stock
    pub fn record_sale_miss_event(&self) {
        self.sale_miss_events.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            committed: self.committed.load(Ordering::Relaxed),
            aborted: self.aborted.load(Ordering::Relaxed),
            sale_miss_events: self.sale_miss_events.load(Ordering::Relaxed),
        }
    }
}

/// Transaction statistics at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Operations that completed successfully
    pub committed: u64,
    /// Operations rejected with an error
    pub aborted: u64,
    /// Purchases rejected for insufficient stock
    pub sale_miss_events: u64,
}

impl StatsSnapshot {
    /// Operations that completed either way
    pub fn total(&self) -> u64 {
        self.committed + self.aborted
    }

    /// Aborted / total, `0.0` before any operation
    pub fn abort_rate(&self) -> f64 {
        let total = self.total();
        if total > 0 {
            self.aborted as f64 / total as f64
        } else {
            0.0
        }
    }
}
