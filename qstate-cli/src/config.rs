//! qstate.toml configuration
//!
//! Every field has a default, so an absent file or an empty one is a valid
//! configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::operators::{standard_gates, OperatorSpec};

/// qstate configuration (qstate.toml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Persistence settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Operator table
    #[serde(default = "standard_gates")]
    pub operators: Vec<OperatorSpec>,
}

/// `[store]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Persisted collection file (default: states.json)
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Save after add/apply (default: true)
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            autosave: default_autosave(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("states.json")
}

fn default_autosave() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            operators: standard_gates(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse qstate.toml")
    }

    /// Load configuration from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_str(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Serialize configuration to TOML string
    pub fn to_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
