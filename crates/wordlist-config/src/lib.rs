use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::dictionary::{DictionaryConfig, WORD_PLACEHOLDER};
use self::storage::StorageConfig;

pub mod dictionary;
pub mod storage;

/// Environment variable naming the configuration record to load
pub const CONFIG_ID_VAR: &str = "CONFIG_MODEL_ID";

/// The configuration record. Loaded once at startup and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CONFIG_MODEL_ID is not set")]
    MissingId,

    #[error("Cannot read config record {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config record {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// Load the record named by `CONFIG_MODEL_ID` from `dir`
    pub fn load_from_env(dir: &Path) -> Result<Self, ConfigError> {
        let id = env::var(CONFIG_ID_VAR)
            .ok()
            .filter(|id| !id.trim().is_empty())
            .ok_or(ConfigError::MissingId)?;

        Self::load(dir, &id)
    }

    /// Load the record `<dir>/<id>.json`
    pub fn load(dir: &Path, id: &str) -> Result<Self, ConfigError> {
        let path = dir.join(format!("{id}.json"));
        tracing::info!("Loading config record {}", path.display());

        let data = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        let config: Config =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse { path, source })?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let dictionary = &self.dictionary;
        if !dictionary.url_pattern.contains(WORD_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "dictionary.url_pattern must contain {WORD_PLACEHOLDER}"
            )));
        }
        if dictionary.app_id.is_empty() || dictionary.app_key.is_empty() {
            return Err(ConfigError::Invalid(
                "dictionary credentials must not be empty".to_string(),
            ));
        }
        if let Some(bucket) = &self.storage.bucket {
            if bucket.is_empty() || bucket.contains('/') {
                return Err(ConfigError::Invalid(format!(
                    "storage.bucket is not a valid bucket name: {bucket:?}"
                )));
            }
        }

        Ok(())
    }
}
