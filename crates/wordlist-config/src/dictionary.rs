use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the normalized word key
pub const WORD_PLACEHOLDER: &str = "{word}";

fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Entry URL, e.g. `https://od-api.oxforddictionaries.com/api/v1/entries/en/{word}`
    pub url_pattern: String,
    pub app_id: String,
    pub app_key: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl DictionaryConfig {
    pub fn entry_url(&self, key: &str) -> String {
        self.url_pattern.replace(WORD_PLACEHOLDER, key)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
