//! Catalog: the keyed collection of inventory records
//!
//! # Design
//!
//! - Keys are unique; `insert` on an existing key fails with `DuplicateKey`
//! - `remove` on an absent key fails with `NotFound`
//! - Enumeration order is the map's internal order and carries no meaning
//! - Every accessor takes `&self`, so one catalog can be shared by all
//!   threads of a store

use bookledger_core::{InventoryRecord, Isbn, LedgerError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Keyed collection of inventory records
///
/// The catalog is the sole owner of its records. Readers get copies
/// through `get`/`read`/`for_each`; writers mutate through `update`.
///
/// Callers must not invoke a catalog method from inside a closure passed
/// to another catalog method: the shard lock of the outer call is still
/// held and the inner call may need the same shard.
pub struct Catalog {
    records: DashMap<Isbn, InventoryRecord, FxBuildHasher>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            records: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no record
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `isbn` is present
    pub fn contains(&self, isbn: Isbn) -> bool {
        self.records.contains_key(&isbn)
    }

    /// Copy of the record for `isbn`
    pub fn get(&self, isbn: Isbn) -> Option<InventoryRecord> {
        self.records.get(&isbn).map(|r| r.value().clone())
    }

    /// Apply `f` to the record for `isbn` without copying it
    pub fn read<R>(&self, isbn: Isbn, f: impl FnOnce(&InventoryRecord) -> R) -> Option<R> {
        self.records.get(&isbn).map(|r| f(r.value()))
    }

    /// Insert a new record
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if a record with the same key exists.
    pub fn insert(&self, record: InventoryRecord) -> Result<()> {
        match self.records.entry(record.isbn()) {
            Entry::Occupied(e) => Err(LedgerError::DuplicateKey(*e.key())),
            Entry::Vacant(e) => {
                e.insert(record);
                Ok(())
            }
        }
    }

    /// Remove the record for `isbn`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such record exists.
    pub fn remove(&self, isbn: Isbn) -> Result<InventoryRecord> {
        let (_, record) = self
            .records
            .remove(&isbn)
            .ok_or(LedgerError::NotFound(isbn))?;
        Ok(record)
    }

    /// Mutate the record for `isbn` in place
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such record exists.
    pub fn update<R>(&self, isbn: Isbn, f: impl FnOnce(&mut InventoryRecord) -> R) -> Result<R> {
        let mut record = self
            .records
            .get_mut(&isbn)
            .ok_or(LedgerError::NotFound(isbn))?;
        Ok(f(record.value_mut()))
    }

    /// Visit every record once, in unspecified order
    pub fn for_each(&self, mut f: impl FnMut(&InventoryRecord)) {
        for entry in self.records.iter() {
            f(entry.value());
        }
    }

    /// Copy out every record accepted by `filter`, mapped through `map`
    pub fn collect<T>(
        &self,
        mut filter: impl FnMut(&InventoryRecord) -> bool,
        mut map: impl FnMut(&InventoryRecord) -> T,
    ) -> Vec<T> {
        let mut out = Vec::new();
        self.for_each(|record| {
            if filter(record) {
                out.push(map(record));
            }
        });
        out
    }

    /// Remove every record
    pub fn clear(&self) {
        let removed = self.records.len();
        self.records.clear();
        tracing::debug!(target: "bookledger::storage", removed, "Catalog cleared");
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("len", &self.records.len())
            .finish()
    }
}
