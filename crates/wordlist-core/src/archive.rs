/// Bucket-relative path of the pronunciation archived for `key`
pub fn audio_asset_path(key: &str) -> String {
    format!("audio/{key}.mp3")
}

/// Copies pronunciation recordings into durable storage
#[async_trait::async_trait]
pub trait AudioArchiver: Send + Sync {
    /// Archive `source_url` for `key` and return the stored asset path.
    /// Failures are logged by the implementation and reported as `None`.
    async fn archive(&self, source_url: &str, key: &str) -> Option<String>;
}
