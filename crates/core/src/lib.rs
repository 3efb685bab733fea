//! Core types for the bookledger inventory engine
//!
//! This crate defines the foundational types used throughout the system:
//! - Isbn: positive integer key identifying an inventory item
//! - InventoryRecord: the mutable per-item state owned by the catalog
//! - Batch arguments: NewItem, CopyRequest, RatingRequest, EditorPickRequest
//! - Snapshots handed to callers: Book (customer view), StockBook (stock view)
//! - LedgerError: the error type for every public operation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;
pub mod types;

pub use error::{LedgerError, Result};
pub use record::InventoryRecord;
pub use types::{
    Book, CopyRequest, EditorPickRequest, Isbn, NewItem, RatingRequest, Shortfall, StockBook,
    MAX_RATING, MIN_RATING,
};
