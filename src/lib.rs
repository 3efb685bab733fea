//! Bookledger - concurrent in-memory inventory ledger
//!
//! A ledger holds inventory records keyed by ISBN and applies multi-item
//! batches all or nothing: every entry is validated before any record is
//! touched, and concurrent batches are serializable.
//!
//! # Quick Start
//!
//! ```ignore
//! use bookledger::prelude::*;
//!
//! let ledger = Ledger::builder().fine_grained().build();
//! ledger.add_items(&[NewItem::new(1, "Dune", "Frank Herbert", 9.99, 5)])?;
//! ledger.purchase(&[CopyRequest::new(1, 2)])?;
//!
//! let top = ledger.top_rated(1)?;
//! ```
//!
//! # Architecture
//!
//! | Layer | Crate |
//! |-------|-------|
//! | Types and errors | `bookledger-core` |
//! | Catalog | `bookledger-storage` |
//! | Locking strategies | `bookledger-concurrency` |
//! | Validation, transactions, queries | `bookledger-engine` |
//!
//! Only the engine's public API and the core types are re-exported here.

pub mod prelude;

pub use bookledger_core::{
    Book, CopyRequest, EditorPickRequest, Isbn, LedgerError, NewItem, RatingRequest, Result,
    Shortfall, StockBook, MAX_RATING, MIN_RATING,
};
pub use bookledger_engine::*;
