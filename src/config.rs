//! Runtime configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::categorizer::ResolutionPolicy;
use crate::errors::ConfigError;
use crate::store::DEFAULT_STORE_FILE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where learned categories are kept
    pub store_path: PathBuf,

    /// Currency label used when printing amounts
    pub currency: String,

    /// Which category wins when details match several
    pub resolution: ResolutionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            currency: "AED".to_string(),
            resolution: ResolutionPolicy::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a TOML file. Keys that are absent keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_resolution(mut self, resolution: ResolutionPolicy) -> Self {
        self.resolution = resolution;
        self
    }
}
