//! Ledger: the store object callers share
//!
//! A `Ledger` owns one catalog and one concurrency controller. Every public
//! operation follows the same shape:
//!
//! 1. Acquire a lock scope (keyed for batch operations, exclusive for
//!    whole-catalog scans)
//! 2. Run the transaction engine or a reporting query inside the scope
//! 3. Release the scope, then record statistics and log the outcome
//!
//! # Lock Table Upkeep
//!
//! Under the fine-grained strategy a keyed operation may leave per-key
//! locks behind for keys that are not in the catalog (rejected lookups,
//! removals). The ledger counts them and compacts the lock table once
//! `STALE_LOCK_THRESHOLD` have accumulated.
//!
//! # Thread Safety
//!
//! `Ledger` is `Send + Sync`; share it with `Arc<Ledger>`.

use crate::builder::LedgerBuilder;
use crate::config::LedgerConfig;
use crate::reporting;
use crate::stats::{StatsSnapshot, TransactionStats};
use crate::transaction::TransactionEngine;
use bookledger_concurrency::{ConcurrencyControl, LockingStrategy};
use bookledger_core::{
    Book, CopyRequest, EditorPickRequest, Isbn, LedgerError, NewItem, RatingRequest, Result,
    StockBook,
};
use bookledger_storage::Catalog;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, trace, warn};

type KeyBuf = SmallVec<[Isbn; 8]>;

/// Stale per-key locks tolerated before the lock table is compacted
pub(crate) const STALE_LOCK_THRESHOLD: usize = 1024;

/// In-memory inventory store
pub struct Ledger {
    catalog: Catalog,
    control: Box<dyn ConcurrencyControl>,
    rng: Mutex<StdRng>,
    stats: TransactionStats,
    stale_locks: AtomicUsize,
}

impl Ledger {
    /// Create an empty ledger using `strategy`
    pub fn new(strategy: LockingStrategy) -> Self {
        Self::builder().strategy(strategy).build()
    }

    /// Create an empty ledger from a configuration
    pub fn from_config(config: &LedgerConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            target: "bookledger::txn",
            strategy = %config.locking,
            seeded = config.rng_seed.is_some(),
            "Ledger created"
        );
        Self {
            catalog: Catalog::new(),
            control: config.locking.controller(),
            rng: Mutex::new(rng),
            stats: TransactionStats::new(),
            stale_locks: AtomicUsize::new(0),
        }
    }

    /// Start a builder
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::new()
    }

    /// Locking strategy chosen at construction
    pub fn strategy(&self) -> LockingStrategy {
        self.control.strategy()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether the ledger holds no record
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Whether a record with `isbn` exists
    pub fn contains(&self, isbn: Isbn) -> bool {
        self.catalog.contains(isbn)
    }

    /// Number of per-key locks held in the lock table
    pub fn lock_count(&self) -> usize {
        self.control.lock_count()
    }

    /// Transaction statistics so far
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    // ========================================================================
    // Batch operations
    // ========================================================================

    /// Insert new records, all or nothing
    ///
    /// # Errors
    ///
    /// `InvalidKey`, `InvalidItem` or `DuplicateKey`; nothing is inserted.
    pub fn add_items(&self, items: &[NewItem]) -> Result<usize> {
        let keys = keys_of(items, |item| item.isbn);
        self.keyed("add_items", &keys, |engine| engine.add_items(items))
    }

    /// Add copies and clear sale misses, all or nothing
    ///
    /// # Errors
    ///
    /// `InvalidKey`, `NotFound` or `InvalidQuantity`; nothing is changed.
    pub fn restock(&self, requests: &[CopyRequest]) -> Result<()> {
        let keys = keys_of(requests, |request| request.isbn);
        self.keyed("restock", &keys, |engine| engine.restock(requests))
    }

    /// Sell copies, all or nothing
    ///
    /// A batch with any short key fails with `InsufficientStock`; the sale
    /// misses of every short key are still recorded.
    ///
    /// # Errors
    ///
    /// `EmptyInput`, `InvalidKey`, `NotFound`, `InvalidQuantity` or
    /// `InsufficientStock`.
    pub fn purchase(&self, requests: &[CopyRequest]) -> Result<()> {
        let keys = keys_of(requests, |request| request.isbn);
        self.keyed("purchase", &keys, |engine| engine.purchase(requests))
    }

    /// Record ratings, all or nothing
    ///
    /// # Errors
    ///
    /// `InvalidKey`, `NotFound` or `InvalidRating`; nothing is recorded.
    pub fn rate(&self, requests: &[RatingRequest]) -> Result<()> {
        let keys = keys_of(requests, |request| request.isbn);
        self.keyed("rate", &keys, |engine| engine.rate(requests))
    }

    /// Set editor-pick flags, all or nothing
    ///
    /// # Errors
    ///
    /// `InvalidKey` or `NotFound`; nothing is changed.
    pub fn set_editor_picks(&self, requests: &[EditorPickRequest]) -> Result<()> {
        let keys = keys_of(requests, |request| request.isbn);
        self.keyed("set_editor_picks", &keys, |engine| {
            engine.set_editor_picks(requests)
        })
    }

    /// Remove records, all or nothing; returns how many were removed
    ///
    /// # Errors
    ///
    /// `InvalidKey` or `NotFound`; nothing is removed.
    pub fn remove_items(&self, isbns: &[Isbn]) -> Result<usize> {
        self.keyed("remove_items", isbns, |engine| engine.remove_items(isbns))
    }

    /// Remove every record and every per-key lock
    pub fn remove_all(&self) -> usize {
        let scope = self.control.lock_all();
        let removed = TransactionEngine::new(&self.catalog, &scope).remove_all();
        let reclaimed = self.control.reclaim(&scope, &|_| false);
        self.stale_locks.store(0, Ordering::Relaxed);
        drop(scope);

        debug!(target: "bookledger::lock", reclaimed, "Lock table cleared");
        self.stats.record_commit();
        removed
    }

    /// Drop per-key locks of keys no longer in the catalog
    ///
    /// Returns the number of locks reclaimed; always 0 under the coarse
    /// strategy.
    pub fn compact_locks(&self) -> usize {
        let scope = self.control.lock_all();
        let catalog = &self.catalog;
        let reclaimed = self.control.reclaim(&scope, &|isbn| catalog.contains(isbn));
        self.stale_locks.store(0, Ordering::Relaxed);
        drop(scope);

        debug!(target: "bookledger::lock", reclaimed, "Lock table compacted");
        reclaimed
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Stock view of the given keys
    ///
    /// # Errors
    ///
    /// `InvalidKey` or `NotFound` if any key is bad.
    pub fn list_by_keys(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        self.keyed("list_by_keys", isbns, |engine| engine.list_by_keys(isbns))
    }

    /// Customer view of the given keys
    ///
    /// # Errors
    ///
    /// `InvalidKey` or `NotFound` if any key is bad.
    pub fn get_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        self.keyed("get_books", isbns, |engine| engine.get_books(isbns))
    }

    /// Stock view of every record, ordered by key
    pub fn list_all(&self) -> Vec<StockBook> {
        let books = self.scan("list_all", reporting::list_all);
        self.stats.record_commit();
        books
    }

    /// Stock view of every record with sale misses, ordered by key
    pub fn in_demand(&self) -> Vec<StockBook> {
        let books = self.scan("in_demand", reporting::in_demand);
        self.stats.record_commit();
        books
    }

    /// The `n` best-rated records
    ///
    /// # Errors
    ///
    /// `InsufficientItems` when the ledger is non-empty and holds fewer
    /// than `n` records. An empty ledger returns an empty list.
    pub fn top_rated(&self, n: usize) -> Result<Vec<Book>> {
        let result = self.scan("top_rated", |catalog| reporting::top_rated(catalog, n));
        self.finish("top_rated", result)
    }

    /// Up to `n` editor picks sampled without replacement
    pub fn editor_picks(&self, n: usize) -> Vec<Book> {
        let books = self.scan("editor_picks", |catalog| {
            let mut rng = self.rng.lock();
            reporting::editor_picks(catalog, n, &mut rng)
        });
        self.stats.record_commit();
        books
    }

    // ========================================================================
    // Scope helpers
    // ========================================================================

    fn keyed<T>(
        &self,
        op: &'static str,
        keys: &[Isbn],
        f: impl FnOnce(&TransactionEngine<'_>) -> Result<T>,
    ) -> Result<T> {
        let scope = self.control.lock_keys(keys);
        trace!(target: "bookledger::lock", op, held = scope.keys_held(), "Scope acquired");
        let engine = TransactionEngine::new(&self.catalog, &scope);
        let result = f(&engine);
        let stale = self.absent_keys(keys);
        drop(scope);

        self.note_stale_locks(stale);
        self.finish(op, result)
    }

    /// Keys of a keyed operation whose lock outlives any record
    ///
    /// Called while the operation's scope is still held, so the catalog
    /// cannot change under these keys.
    fn absent_keys(&self, keys: &[Isbn]) -> usize {
        if self.strategy() == LockingStrategy::Coarse {
            return 0;
        }
        keys.iter()
            .filter(|isbn| isbn.is_valid() && !self.catalog.contains(**isbn))
            .count()
    }

    fn note_stale_locks(&self, stale: usize) {
        if stale == 0 {
            return;
        }
        let pending = self.stale_locks.fetch_add(stale, Ordering::Relaxed) + stale;
        if pending >= STALE_LOCK_THRESHOLD {
            self.compact_locks();
        }
    }

    fn scan<T>(&self, op: &'static str, f: impl FnOnce(&Catalog) -> T) -> T {
        let scope = self.control.lock_all();
        trace!(target: "bookledger::lock", op, "Exclusive scope acquired");
        let out = f(&self.catalog);
        drop(scope);
        out
    }

    fn finish<T>(&self, op: &'static str, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => {
                self.stats.record_commit();
                debug!(target: "bookledger::txn", op, "Committed");
            }
            Err(err) => {
                self.stats.record_abort();
                if matches!(err, LedgerError::InsufficientStock { .. }) {
                    self.stats.record_sale_miss_event();
                }
                warn!(target: "bookledger::txn", op, error = %err, "Rejected");
            }
        }
        result
    }
}

fn keys_of<T>(entries: &[T], key: impl Fn(&T) -> Isbn) -> KeyBuf {
    entries.iter().map(key).collect()
}

impl Default for Ledger {
    fn default() -> Self {
        Self::from_config(&LedgerConfig::default())
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("strategy", &self.strategy())
            .field("catalog", &self.catalog)
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}
