use async_trait::async_trait;
use reqwest::header::ACCEPT;
use wordlist_config::dictionary::DictionaryConfig;
use wordlist_core::{Dictionary, DictionaryEntry};

use crate::error::DictionaryError;
use crate::response::parse_entry;

/// Oxford Dictionaries style entries API
#[derive(Clone)]
pub struct OxfordDictionary {
    client: reqwest::Client,
    config: DictionaryConfig,
}

impl OxfordDictionary {
    pub fn new(config: DictionaryConfig) -> Result<Self, DictionaryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch and decode the entry for `key` without collapsing errors
    pub async fn fetch(&self, key: &str) -> Result<DictionaryEntry, DictionaryError> {
        let url = self.config.entry_url(key);
        tracing::debug!("Looking up {key} at {url}");

        let response = self
            .client
            .get(&url)
            .header("app_id", self.config.app_id.as_str())
            .header("app_key", self.config.app_key.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DictionaryError::Status(status));
        }

        let body = response.bytes().await?;
        parse_entry(&body).inspect_err(|e| {
            tracing::warn!(
                "Invalid dictionary response for {key} ({e}):\n{}",
                String::from_utf8_lossy(&body)
            );
        })
    }
}

#[async_trait]
impl Dictionary for OxfordDictionary {
    async fn lookup(&self, key: &str) -> Option<DictionaryEntry> {
        match self.fetch(key).await {
            Ok(entry) => Some(entry),
            Err(DictionaryError::Status(status)) => {
                tracing::warn!("Dictionary returned with error code {status} for {key}");
                None
            }
            Err(e) => {
                tracing::warn!("Dictionary lookup for {key} failed: {e}");
                None
            }
        }
    }
}
