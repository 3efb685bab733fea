//! Error types for the ledger
//!
//! Every error is detected during validation, before any mutation, and
//! rejects the whole batch. The catalog stays usable after any error.
//! We use `thiserror` for the `Display` and `Error` implementations.

use crate::types::{Isbn, Shortfall};
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error kinds surfaced by ledger operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Malformed new item (empty title/author, bad price or copy count)
    #[error("Invalid item {isbn}: {reason}")]
    InvalidItem {
        /// Key of the rejected item
        isbn: Isbn,
        /// What was wrong with it
        reason: String,
    },

    /// Insert collided with an existing key (or a repeated key in the batch)
    #[error("Duplicate key: ISBN {0} already exists")]
    DuplicateKey(Isbn),

    /// Key is not a positive integer
    #[error("Invalid key: ISBN {0} is not positive")]
    InvalidKey(Isbn),

    /// Key is well-formed but absent from the catalog
    #[error("Not found: ISBN {0} is not in the catalog")]
    NotFound(Isbn),

    /// Copy count out of range
    #[error("Invalid quantity for ISBN {isbn}: {copies}")]
    InvalidQuantity {
        /// Target key
        isbn: Isbn,
        /// Offending copy count
        copies: i64,
    },

    /// Rating outside `[MIN_RATING, MAX_RATING]`
    #[error("Invalid rating for ISBN {isbn}: {rating} (must be between 0 and 5)")]
    InvalidRating {
        /// Target key
        isbn: Isbn,
        /// Offending rating
        rating: i32,
    },

    /// A purchase asked for more copies than were in stock
    ///
    /// The sale misses listed here have already been recorded.
    #[error("Insufficient stock for {} item(s)", .shortfalls.len())]
    InsufficientStock {
        /// Every short entry of the rejected batch
        shortfalls: Vec<Shortfall>,
    },

    /// More top-rated items requested than the catalog holds
    #[error("Requested {requested} items but only {available} are available")]
    InsufficientItems {
        /// Requested count
        requested: usize,
        /// Records in the catalog
        available: usize,
    },

    /// An argument set that must not be empty was empty
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    /// Create an invalid-item error
    pub fn invalid_item(isbn: Isbn, reason: impl Into<String>) -> Self {
        LedgerError::InvalidItem {
            isbn,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        LedgerError::Config(msg.into())
    }

    /// Whether the error refers to an unknown or malformed key
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound(_) | LedgerError::InvalidKey(_))
    }

    /// Whether the error is a rejected argument (as opposed to a state conflict)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidItem { .. }
                | LedgerError::InvalidKey(_)
                | LedgerError::InvalidQuantity { .. }
                | LedgerError::InvalidRating { .. }
                | LedgerError::EmptyInput(_)
        )
    }
}
