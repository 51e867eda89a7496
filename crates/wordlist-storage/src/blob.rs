use std::path::{Component, Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write-once object storage addressed by bucket-relative paths
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError>;
}

/// A bucket kept as a directory, `<root>/<bucket>/<path>`
pub struct FsBlobStore {
    bucket_dir: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl AsRef<Path>, bucket: &str) -> Self {
        Self {
            bucket_dir: root.as_ref().join(bucket),
        }
    }

    /// Resolve an object path, refusing anything that escapes the bucket
    fn object_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let valid = !path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !valid {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.bucket_dir.join(relative))
    }
}

#[async_trait::async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let target = self.object_path(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = target.clone().into_os_string();
        tmp.push(".part");
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &target).await?;

        tracing::debug!("Stored {} bytes at {}", data.len(), target.display());
        Ok(())
    }
}
