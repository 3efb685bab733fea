//! Key, batch argument and snapshot types
//!
//! Batch arguments are what a caller hands to one operation invocation.
//! Snapshots are immutable copies of catalog state; mutating the catalog
//! after a snapshot was taken never changes the snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest rating value accepted by `rate`
pub const MIN_RATING: i32 = 0;
/// Highest rating value accepted by `rate`
pub const MAX_RATING: i32 = 5;

/// Unique identifier of an inventory item
///
/// The raw value is signed so that a caller can hand in a non-positive key
/// and receive `InvalidKey` instead of a silent wrap-around. Only positive
/// values are ever stored in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isbn(i64);

impl Isbn {
    /// Wrap a raw key value
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw key value
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this key may identify a catalog entry
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for Isbn {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A new item proposed for admission to the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    /// Key of the new item
    pub isbn: Isbn,
    /// Title, must be non-empty
    pub title: String,
    /// Author, must be non-empty
    pub author: String,
    /// Unit price, must be finite and non-negative
    pub price: f64,
    /// Initial copies in stock, must be at least 1
    pub copies: i64,
}

impl NewItem {
    /// Create a new item description
    pub fn new(
        isbn: impl Into<Isbn>,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f64,
        copies: i64,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            price,
            copies,
        }
    }
}

/// A number of copies for one key (restock and purchase batches)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CopyRequest {
    /// Target key
    pub isbn: Isbn,
    /// Number of copies; validated to be at least 1
    pub copies: i64,
}

impl CopyRequest {
    /// Create a copy request
    pub fn new(isbn: impl Into<Isbn>, copies: i64) -> Self {
        Self {
            isbn: isbn.into(),
            copies,
        }
    }
}

/// A single rating for one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingRequest {
    /// Target key
    pub isbn: Isbn,
    /// Rating value; validated to lie in `[MIN_RATING, MAX_RATING]`
    pub rating: i32,
}

impl RatingRequest {
    /// Create a rating request
    pub fn new(isbn: impl Into<Isbn>, rating: i32) -> Self {
        Self {
            isbn: isbn.into(),
            rating,
        }
    }
}

/// Editor-pick flag update for one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditorPickRequest {
    /// Target key
    pub isbn: Isbn,
    /// New flag value
    pub editor_pick: bool,
}

impl EditorPickRequest {
    /// Create an editor-pick update
    pub fn new(isbn: impl Into<Isbn>, editor_pick: bool) -> Self {
        Self {
            isbn: isbn.into(),
            editor_pick,
        }
    }
}

/// Unmet demand for one key in a rejected purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// Key that could not be supplied
    pub isbn: Isbn,
    /// Copies requested in the batch (summed over repeated entries)
    pub requested: u64,
    /// Copies in stock when the batch was checked
    pub available: u64,
}

impl Shortfall {
    /// Copies that were demanded but unavailable
    pub fn missing(&self) -> u64 {
        self.requested.saturating_sub(self.available)
    }
}

/// Customer view of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Key
    pub isbn: Isbn,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Unit price
    pub price: f64,
    /// Average rating, `0.0` when never rated
    pub average_rating: f64,
}

/// Stock-manager view of an item: every inventory field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBook {
    /// Key
    pub isbn: Isbn,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Unit price
    pub price: f64,
    /// Copies currently in stock
    pub copies: u64,
    /// Copies demanded while out of stock since the last restock
    pub sale_misses: u64,
    /// Number of ratings received
    pub times_rated: u64,
    /// Sum of all ratings received
    pub total_rating: u64,
    /// Curation flag
    pub editor_pick: bool,
}

impl StockBook {
    /// Average rating, `0.0` when never rated
    pub fn average_rating(&self) -> f64 {
        if self.times_rated == 0 {
            0.0
        } else {
            self.total_rating as f64 / self.times_rated as f64
        }
    }
}
