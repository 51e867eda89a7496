use std::sync::Arc;

use anyhow::Context;
use wordlist_config::Config;
use wordlist_core::{Dispatcher, JsonFileWordStore, MemoryWordStore, WordStore};
use wordlist_dictionary::OxfordDictionary;
use wordlist_storage::{FsBlobStore, HttpAudioArchiver};

use crate::cli::Args;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Wire the store, dictionary and optional audio archival from config
    pub async fn build(config: &Config, args: &Args) -> anyhow::Result<Self> {
        let store: Arc<dyn WordStore> = match &args.data_file {
            Some(path) => Arc::new(
                JsonFileWordStore::open(path)
                    .await
                    .with_context(|| format!("Failed to open word store {}", path.display()))?,
            ),
            None => {
                tracing::warn!("No word store file configured, words are kept in memory only");
                Arc::new(MemoryWordStore::new())
            }
        };

        let dictionary = OxfordDictionary::new(config.dictionary.clone())
            .context("Failed to create dictionary client")?;

        let mut dispatcher =
            Dispatcher::new(store, Arc::new(dictionary), config.storage.clone());

        match &config.storage.bucket {
            Some(bucket) => {
                let blobs = Arc::new(FsBlobStore::new(&args.blob_root, bucket));
                let archiver = HttpAudioArchiver::new(blobs, config.dictionary.timeout())
                    .context("Failed to create audio archiver")?;
                dispatcher = dispatcher.with_archiver(Arc::new(archiver));
                tracing::info!(
                    "Archiving pronunciations to bucket {bucket} under {}",
                    args.blob_root.display()
                );
            }
            None => tracing::info!("No storage bucket configured, pronunciations are not archived"),
        }

        Ok(Self::new(dispatcher))
    }
}
