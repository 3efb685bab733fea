//! Storage layer for bookledger
//!
//! This crate holds the catalog: the keyed collection of inventory records.
//!
//! - DashMap: sharded map, each shard guarded by its own lock
//! - FxHasher: fast non-crypto hash for integer keys
//!
//! The shard locks only make individual map operations memory-safe. They
//! are held for the duration of one call and never span a transaction;
//! transactional isolation comes from the concurrency crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;

pub use catalog::Catalog;
