use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_DATA_DIR: &str = ".oshi-tally";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceBackend {
    Memory,
    #[default]
    File,
}

/// Runtime configuration, stored as TOML. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    pub data_dir: PathBuf,
    pub persistence: PersistenceBackend,
    /// Write snapshots from a background thread instead of the caller's.
    pub background_writes: bool,
    pub log_filter: String,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            persistence: PersistenceBackend::default(),
            background_writes: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl TallyConfig {
    /// Read `path`, or write the defaults there if it does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            return Ok(toml::from_str(&contents)?);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let cfg = Self::default();
        cfg.save(path)?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// In-memory persistence with inline writes; handy for tests.
    pub fn ephemeral() -> Self {
        Self {
            persistence: PersistenceBackend::Memory,
            background_writes: false,
            ..Self::default()
        }
    }
}
