//! Transaction engine
//!
//! This module provides the validate-then-apply protocol behind every
//! public operation:
//!
//! ```text
//! operation(batch):
//!   ┌──────────────────────────┐
//!   │ Validate every entry     │  ← no mutation yet
//!   └────────────┬─────────────┘
//!                │ any rejected?
//!        ┌───────┴────────┐
//!        │ yes            │ no
//!   ┌────▼─────┐   ┌──────▼──────────┐
//!   │ Err(..)  │   │ Apply every     │
//!   │ catalog  │   │ entry           │
//!   │ unchanged│   └─────────────────┘
//!   └──────────┘
//! ```
//!
//! The one exception is purchase: when stock is short, the sale misses of
//! every short entry are recorded before the batch is rejected.

pub mod engine;

pub use engine::TransactionEngine;
