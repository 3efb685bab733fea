//! Convenient imports for ledger users
//!
//! ```ignore
//! use bookledger::prelude::*;
//! ```

pub use crate::{
    Book, BookStore, CopyRequest, EditorPickRequest, Isbn, Ledger, LedgerConfig, LedgerError,
    LockingStrategy, NewItem, RatingRequest, Result, StockBook, StockManager, MAX_RATING,
    MIN_RATING,
};
