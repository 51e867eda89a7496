use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use wordlist_core::AudioArchiver;
use wordlist_core::archive::audio_asset_path;

use crate::blob::BlobStore;

/// Downloads pronunciations and copies them into a [`BlobStore`]
pub struct HttpAudioArchiver {
    client: reqwest::Client,
    blobs: Arc<dyn BlobStore>,
}

impl HttpAudioArchiver {
    pub fn new(blobs: Arc<dyn BlobStore>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, blobs })
    }

    async fn download(&self, source_url: &str) -> Result<Vec<u8>, reqwest::Error> {
        let response = self
            .client
            .get(source_url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl AudioArchiver for HttpAudioArchiver {
    async fn archive(&self, source_url: &str, key: &str) -> Option<String> {
        let audio = match self.download(source_url).await {
            Ok(audio) => audio,
            Err(e) => {
                tracing::warn!("Failed to download audio {source_url}: {e}");
                return None;
            }
        };

        let path = audio_asset_path(key);
        if let Err(e) = self.blobs.put(&path, &audio).await {
            tracing::warn!("Failed to store audio for {key}: {e}");
            return None;
        }

        tracing::info!("Archived pronunciation of {key} at {path}");
        Some(path)
    }
}
