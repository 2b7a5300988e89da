//! Application configuration.
//!
//! All paths and table names come from a TOML file (or defaults) and are
//! injected at construction. Nothing is hard-coded at call sites.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "marketlab.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Relational store settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database: PathBuf,
    /// Destination table for price rows.
    pub stock_table: String,
    /// Destination table for sector rows.
    pub sector_table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("marketlab.db"),
            stock_table: "stock_data".into(),
            sector_table: "sector_data".into(),
        }
    }
}

/// Default input locations for the ingestion commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataPaths {
    /// Folder containing `<SYMBOL>_*.csv` price files.
    pub csv_dir: PathBuf,
    /// Sector mapping CSV.
    pub sector_file: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            csv_dir: PathBuf::from("data/prices"),
            sector_file: PathBuf::from("data/sector_data.csv"),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub data: DataPaths,
}

impl Config {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from an explicit path, or from `marketlab.toml` if present,
    /// falling back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
