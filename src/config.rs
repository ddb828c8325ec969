//! Layered store configuration: defaults → `eavgraphdb.toml` → `EAVGRAPHDB_*` env.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Tunables for a [`crate::Store`]: index sizing, arena growth, and the
/// default snapshot path used by CLI tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Initial capacity hint for every hash index (entities, attributes,
    /// relation types, adjacency lists).
    pub capacity_hint: usize,
    /// Minimum growth increment, in bytes, for each arena's blocks.
    pub arena_block_size: usize,
    /// Default snapshot file path, used by the CLI harness when no path is
    /// given explicitly.
    pub snapshot_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity_hint: 64,
            arena_block_size: 4096,
            snapshot_path: "eavgraphdb.snapshot".to_string(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration by merging, lowest to highest priority: struct
    /// defaults, an optional `eavgraphdb.toml` in the current directory, and
    /// `EAVGRAPHDB_*` environment variables.
    #[allow(clippy::result_large_err)]
    pub fn load() -> figment::error::Result<Self> {
        Figment::from(Serialized::defaults(StoreConfig::default()))
            .merge(Toml::file("eavgraphdb.toml"))
            .merge(Env::prefixed("EAVGRAPHDB_"))
            .extract()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
