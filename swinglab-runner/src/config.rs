//! Serializable run configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use swinglab_core::config::StrategyParams;
use swinglab_core::error::ConfigError;

/// Unique identifier for a run (content-addressable hash of its config).
pub type RunId = String;

/// Everything needed to reproduce a run: starting capital plus the full
/// strategy parameter object. Loaded from TOML; omitted sections fall back
/// to the stock defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Starting account equity.
    pub initial_capital: f64,

    /// Indicator periods, signal thresholds, risk, costs, metrics.
    pub strategy: StrategyParams,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            strategy: StrategyParams::default(),
        }
    }
}

impl RunConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("failed to parse run config TOML")
    }

    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs get the same RunId, so artifacts
    /// from reruns of the same setup are directly comparable.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        let hash = blake3::hash(json.as_bytes());
        format!("{}", hash.to_hex())
    }

    /// Reject invalid configs before any symbol is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_capital > 0.0 && self.initial_capital.is_finite()) {
            return Err(ConfigError::OutOfRange {
                name: "initial_capital",
                value: self.initial_capital,
            });
        }
        self.strategy.validate()
    }
}
