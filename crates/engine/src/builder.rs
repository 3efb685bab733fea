//! Ledger builder for fluent configuration
//!
//! ```ignore
//! use bookledger_engine::Ledger;
//!
//! // 1. Default: fine-grained locking, entropy-seeded sampler
//! let ledger = Ledger::default();
//!
//! // 2. Builder for a specific strategy and a reproducible sampler
//! let ledger = Ledger::builder().coarse().rng_seed(42).build();
//!
//! // 3. From a config file
//! let config = LedgerConfig::from_file(Path::new("bookledger.toml"))?;
//! let ledger = Ledger::from_config(&config);
//! ```

use crate::config::LedgerConfig;
use crate::ledger::Ledger;
use bookledger_concurrency::LockingStrategy;

/// Builder for `Ledger`
#[derive(Debug, Clone, Default)]
pub struct LedgerBuilder {
    config: LedgerConfig,
}

impl LedgerBuilder {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one mutex for the whole catalog
    pub fn coarse(mut self) -> Self {
        self.config.locking = LockingStrategy::Coarse;
        self
    }

    /// Use one lock per key (default)
    pub fn fine_grained(mut self) -> Self {
        self.config.locking = LockingStrategy::FineGrained;
        self
    }

    /// Set the locking strategy explicitly
    pub fn strategy(mut self, strategy: LockingStrategy) -> Self {
        self.config.locking = strategy;
        self
    }

    /// Seed the editor-pick sampler
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.config.rng_seed = Some(seed);
        self
    }

    /// Replace every setting with `config`
    pub fn config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build an empty ledger
    pub fn build(self) -> Ledger {
        Ledger::from_config(&self.config)
    }
}
