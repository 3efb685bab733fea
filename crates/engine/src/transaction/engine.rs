//! Validate-all-then-apply-all over the catalog
//!
//! `TransactionEngine` is created per operation, inside the lock scope the
//! concurrency controller handed out. It holds no state of its own; the
//! borrow of the scope makes it impossible to run an operation without
//! holding the locks for it.

use crate::validation::{
    validate_copy_request, validate_existing_key, validate_new_items, validate_rating,
};
use bookledger_concurrency::LockScope;
use bookledger_core::{
    Book, CopyRequest, EditorPickRequest, InventoryRecord, Isbn, LedgerError, NewItem,
    RatingRequest, Result, Shortfall, StockBook,
};
use bookledger_storage::Catalog;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Executes one batch against the catalog under a held lock scope
pub struct TransactionEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> TransactionEngine<'a> {
    /// Bind the engine to a catalog for the lifetime of a lock scope
    pub fn new(catalog: &'a Catalog, _scope: &'a LockScope<'_>) -> Self {
        Self { catalog }
    }

    /// Insert a batch of new records, all or nothing
    ///
    /// # Errors
    ///
    /// `InvalidKey`, `InvalidItem` or `DuplicateKey` for the first bad
    /// entry; nothing is inserted.
    pub fn add_items(&self, items: &[NewItem]) -> Result<usize> {
        validate_new_items(self.catalog, items)?;

        for item in items {
            self.catalog.insert(InventoryRecord::from_new_item(item))?;
        }
        info!(target: "bookledger::txn", added = items.len(), "Items added");
        Ok(items.len())
    }

    /// Add copies to existing records and clear their sale misses
    ///
    /// # Errors
    ///
    /// `InvalidKey`, `NotFound` or `InvalidQuantity`; nothing is changed.
    pub fn restock(&self, requests: &[CopyRequest]) -> Result<()> {
        let copies = requests
            .iter()
            .map(|request| validate_copy_request(self.catalog, request))
            .collect::<Result<Vec<u64>>>()?;

        for (request, copies) in requests.iter().zip(copies) {
            self.catalog
                .update(request.isbn, |record| record.add_copies(copies))?;
        }
        debug!(target: "bookledger::txn", entries = requests.len(), "Restock applied");
        Ok(())
    }

    /// Sell copies, all or nothing
    ///
    /// Requested copies are summed per key before the stock check. If any
    /// key is short, every short key's sale misses grow by its shortfall
    /// and the batch is rejected without decrementing any stock.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` for an empty batch
    /// - `InvalidKey`, `NotFound`, `InvalidQuantity` from validation
    /// - `InsufficientStock` listing every shortfall
    pub fn purchase(&self, requests: &[CopyRequest]) -> Result<()> {
        if requests.is_empty() {
            return Err(LedgerError::EmptyInput("purchase requires at least one entry"));
        }

        let mut demand: BTreeMap<Isbn, u64> = BTreeMap::new();
        let mut copies = Vec::with_capacity(requests.len());
        for request in requests {
            let n = validate_copy_request(self.catalog, request)?;
            let total = demand.entry(request.isbn).or_insert(0);
            *total = total.saturating_add(n);
            copies.push(n);
        }

        let mut shortfalls = Vec::new();
        for (&isbn, &requested) in &demand {
            let available = self
                .catalog
                .read(isbn, InventoryRecord::copies)
                .ok_or(LedgerError::NotFound(isbn))?;
            if available < requested {
                shortfalls.push(Shortfall {
                    isbn,
                    requested,
                    available,
                });
            }
        }

        if !shortfalls.is_empty() {
            for shortfall in &shortfalls {
                self.catalog
                    .update(shortfall.isbn, |record| record.add_sale_miss(shortfall.missing()))?;
            }
            debug!(
                target: "bookledger::txn",
                short = shortfalls.len(),
                "Sale misses recorded"
            );
            return Err(LedgerError::InsufficientStock { shortfalls });
        }

        for (request, n) in requests.iter().zip(copies) {
            self.catalog.update(request.isbn, |record| record.buy_copies(n))?;
        }
        debug!(target: "bookledger::txn", entries = requests.len(), "Purchase applied");
        Ok(())
    }

    /// Record ratings, all or nothing
    ///
    /// # Errors
    ///
    /// `InvalidKey`, `NotFound` or `InvalidRating`; no rating is recorded.
    pub fn rate(&self, requests: &[RatingRequest]) -> Result<()> {
        let ratings = requests
            .iter()
            .map(|request| validate_rating(self.catalog, request))
            .collect::<Result<Vec<u32>>>()?;

        for (request, rating) in requests.iter().zip(ratings) {
            self.catalog
                .update(request.isbn, |record| record.add_rating(rating))?;
        }
        debug!(target: "bookledger::txn", entries = requests.len(), "Ratings applied");
        Ok(())
    }

    /// Set editor-pick flags, all or nothing
    ///
    /// # Errors
    ///
    /// `InvalidKey` or `NotFound`; no flag is changed.
    pub fn set_editor_picks(&self, requests: &[EditorPickRequest]) -> Result<()> {
        for request in requests {
            validate_existing_key(self.catalog, request.isbn)?;
        }
        for request in requests {
            self.catalog
                .update(request.isbn, |record| record.set_editor_pick(request.editor_pick))?;
        }
        Ok(())
    }

    /// Remove records, all or nothing
    ///
    /// Repeated keys count once. Returns the number of records removed.
    ///
    /// # Errors
    ///
    /// `InvalidKey` or `NotFound`; nothing is removed.
    pub fn remove_items(&self, isbns: &[Isbn]) -> Result<usize> {
        let distinct = self.existing_distinct(isbns)?;

        for &isbn in &distinct {
            self.catalog.remove(isbn)?;
        }
        info!(target: "bookledger::txn", removed = distinct.len(), "Items removed");
        Ok(distinct.len())
    }

    /// Remove every record unconditionally
    pub fn remove_all(&self) -> usize {
        let removed = self.catalog.len();
        self.catalog.clear();
        info!(target: "bookledger::txn", removed, "All items removed");
        removed
    }

    /// Stock view of the given keys, all or nothing
    ///
    /// # Errors
    ///
    /// `InvalidKey` or `NotFound` if any key is bad.
    pub fn list_by_keys(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        self.snapshot_keys(isbns, InventoryRecord::to_stock_book)
    }

    /// Customer view of the given keys, all or nothing
    ///
    /// # Errors
    ///
    /// `InvalidKey` or `NotFound` if any key is bad.
    pub fn get_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        self.snapshot_keys(isbns, InventoryRecord::to_book)
    }

    fn snapshot_keys<T>(&self, isbns: &[Isbn], map: fn(&InventoryRecord) -> T) -> Result<Vec<T>> {
        let distinct = self.existing_distinct(isbns)?;
        distinct
            .into_iter()
            .map(|isbn| self.catalog.read(isbn, map).ok_or(LedgerError::NotFound(isbn)))
            .collect()
    }

    /// Validate keys and return them deduplicated in first-seen order
    fn existing_distinct(&self, isbns: &[Isbn]) -> Result<Vec<Isbn>> {
        let mut seen = FxHashSet::default();
        let mut distinct = Vec::with_capacity(isbns.len());
        for &isbn in isbns {
            validate_existing_key(self.catalog, isbn)?;
            if seen.insert(isbn) {
                distinct.push(isbn);
            }
        }
        Ok(distinct)
    }
}
