//! Transaction engine for bookledger
//!
//! This crate ties the lower layers together:
//! - Validator: pure admission checks for proposed changes
//! - TransactionEngine: validate-all-then-apply-all over the catalog
//! - Reporting: whole-catalog queries (top rated, editor picks, in demand)
//! - Ledger: the shared store object, with its builder and configuration
//! - Roles: `BookStore` and `StockManager` contracts for a transport layer
//!
//! Locking is delegated to `bookledger-concurrency`; the engine never
//! touches the catalog outside a lock scope.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod config;
pub mod ledger;
pub mod reporting;
pub mod roles;
pub mod stats;
pub mod transaction;
pub mod validation;

pub use builder::LedgerBuilder;
pub use config::{LedgerConfig, CONFIG_FILE_NAME};
pub use ledger::Ledger;
pub use roles::{BookStore, StockManager};
pub use stats::{StatsSnapshot, TransactionStats};
pub use transaction::TransactionEngine;

pub use bookledger_concurrency::LockingStrategy;
