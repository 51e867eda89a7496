use serde::{Deserialize, Serialize};

fn default_audio_base_url() -> String {
    "https://storage.googleapis.com".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Bucket holding archived pronunciations. Archival is off when unset.
    pub bucket: Option<String>,
    /// Public prefix the bucket is served under
    #[serde(default = "default_audio_base_url")]
    pub audio_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            audio_base_url: default_audio_base_url(),
        }
    }
}

impl StorageConfig {
    /// Public URL of an archived asset, if a bucket is configured
    pub fn public_url(&self, asset: &str) -> Option<String> {
        let bucket = self.bucket.as_deref()?;
        Some(format!(
            "{}/{}/{}",
            self.audio_base_url.trim_end_matches('/'),
            bucket,
            asset
        ))
    }
}
