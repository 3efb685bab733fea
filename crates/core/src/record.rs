//! Inventory record: the mutable per-item state
//!
//! Records are owned exclusively by the catalog. Callers never receive a
//! reference to one; they get `Book`/`StockBook` copies instead.
//!
//! The mutators here do not validate. The transaction engine checks every
//! entry of a batch before it calls any of them.

use crate::types::{Book, Isbn, NewItem, StockBook};

/// Mutable state of one catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRecord {
    isbn: Isbn,
    title: String,
    author: String,
    price: f64,
    copies: u64,
    sale_misses: u64,
    total_rating: u64,
    times_rated: u64,
    editor_pick: bool,
}

impl InventoryRecord {
    /// Build a record from an already validated new item
    ///
    /// A negative copy count (which validation rejects) is clamped to zero
    /// so the stock invariant holds regardless.
    pub fn from_new_item(item: &NewItem) -> Self {
        Self {
            isbn: item.isbn,
            title: item.title.clone(),
            author: item.author.clone(),
            price: item.price,
            copies: u64::try_from(item.copies).unwrap_or(0),
            sale_misses: 0,
            total_rating: 0,
            times_rated: 0,
            editor_pick: false,
        }
    }

    /// Key
    pub fn isbn(&self) -> Isbn {
        self.isbn
    }

    /// Title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Unit price
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Copies in stock
    pub fn copies(&self) -> u64 {
        self.copies
    }

    /// Recorded unmet demand since the last restock
    pub fn sale_misses(&self) -> u64 {
        self.sale_misses
    }

    /// Number of ratings received
    pub fn times_rated(&self) -> u64 {
        self.times_rated
    }

    /// Sum of ratings received
    pub fn total_rating(&self) -> u64 {
        self.total_rating
    }

    /// Curation flag
    pub fn is_editor_pick(&self) -> bool {
        self.editor_pick
    }

    /// `total_rating / times_rated`, or `0.0` if never rated
    pub fn average_rating(&self) -> f64 {
        if self.times_rated == 0 {
            0.0
        } else {
            self.total_rating as f64 / self.times_rated as f64
        }
    }

    /// Whether at least `requested` copies are in stock
    pub fn has_copies(&self, requested: u64) -> bool {
        self.copies >= requested
    }

    /// Whether any unmet demand has been recorded
    pub fn has_sale_miss(&self) -> bool {
        self.sale_misses > 0
    }

    /// Add copies and clear the backlog signal
    pub fn add_copies(&mut self, copies: u64) {
        self.copies = self.copies.saturating_add(copies);
        self.sale_misses = 0;
    }

    /// Remove sold copies
    ///
    /// Callers check `has_copies` first; the subtraction saturates so the
    /// stock count can never wrap.
    pub fn buy_copies(&mut self, copies: u64) {
        debug_assert!(self.copies >= copies, "purchase not checked against stock");
        self.copies = self.copies.saturating_sub(copies);
    }

    /// Record copies that were demanded but unavailable
    pub fn add_sale_miss(&mut self, missing: u64) {
        self.sale_misses = self.sale_misses.saturating_add(missing);
    }

    /// Record one rating
    pub fn add_rating(&mut self, rating: u32) {
        self.total_rating = self.total_rating.saturating_add(u64::from(rating));
        self.times_rated = self.times_rated.saturating_add(1);
    }

    /// Set the curation flag
    pub fn set_editor_pick(&mut self, editor_pick: bool) {
        self.editor_pick = editor_pick;
    }

    /// Customer-view copy
    pub fn to_book(&self) -> Book {
        Book {
            isbn: self.isbn,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            average_rating: self.average_rating(),
        }
    }

    /// Stock-view copy
    pub fn to_stock_book(&self) -> StockBook {
        StockBook {
            isbn: self.isbn,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            copies: self.copies,
            sale_misses: self.sale_misses,
            times_rated: self.times_rated,
            total_rating: self.total_rating,
            editor_pick: self.editor_pick,
        }
    }
}
