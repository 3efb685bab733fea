//! Ledger configuration via `bookledger.toml`
//!
//! A ledger is fully described by its locking strategy and an optional
//! seed for the editor-pick sampler. Configuration can come from a file, a
//! TOML string, or the builder.

use bookledger_concurrency::LockingStrategy;
use bookledger_core::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name used by embedding processes.
pub const CONFIG_FILE_NAME: &str = "bookledger.toml";

/// Ledger configuration loaded from `bookledger.toml`.
///
/// # Example
///
/// ```toml
/// # Locking strategy: "fine_grained" (default) or "coarse"
/// locking = "fine_grained"
///
/// # Seed for editor-pick sampling; omit for OS entropy
/// # rng_seed = 42
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Locking strategy around the transaction engine.
    #[serde(default)]
    pub locking: LockingStrategy,
    /// Seed for the editor-pick sampler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

impl LedgerConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Bookledger configuration
#
# Locking strategy: "fine_grained" (default) or "coarse"
#   "fine_grained" = one lock per key, disjoint batches run in parallel
#   "coarse"       = one lock for the whole catalog
locking = "fine_grained"

# Seed for editor-pick sampling (default: seeded from OS entropy).
# Set for reproducible samples in tests.
# rng_seed = 42
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Config` on malformed TOML, an unknown
    /// locking strategy, or an unknown field.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| LedgerError::config(format!("Failed to parse config: {}", e)))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LedgerError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            LedgerError::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                LedgerError::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LedgerError::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            LedgerError::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
