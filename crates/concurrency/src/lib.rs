//! Concurrency layer for bookledger
//!
//! This crate implements the pluggable locking discipline wrapped around
//! the transaction engine:
//! - ConcurrencyControl: the contract both strategies satisfy
//! - CoarseLock: one mutex guards the whole catalog
//! - KeyLockTable: one lazily created mutex per key, acquired in ascending
//!   key order, plus a gate that lets whole-catalog scans exclude writers
//! - LockScope: RAII guard releasing every lock of a transaction on drop
//!
//! The engine's validate-then-apply logic is identical under either
//! strategy. Only achievable parallelism differs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coarse;
pub mod control;
pub mod key_locks;
pub mod scope;

pub use coarse::CoarseLock;
pub use control::{ConcurrencyControl, LockingStrategy};
pub use key_locks::KeyLockTable;
pub use scope::LockScope;
