use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::RwLock;

use super::{StoreError, WordStore, stamp};
use crate::types::WordRecord;

/// Word records kept in memory and mirrored to one JSON file.
///
/// Every put rewrites the file through a sibling temp file and a rename, so
/// a crash leaves either the old or the new contents on disk.
pub struct JsonFileWordStore {
    path: PathBuf,
    words: RwLock<HashMap<String, WordRecord>>,
}

impl JsonFileWordStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let words = match tokio::fs::read(&path).await {
            Ok(data) => serde_json::from_slice::<HashMap<String, WordRecord>>(&data).map_err(
                |source| StoreError::Corrupt {
                    path: path.clone(),
                    source,
                },
            )?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!("Opened word store {} ({} words)", path.display(), words.len());

        Ok(Self {
            path,
            words: RwLock::new(words),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, words: &HashMap<String, WordRecord>) -> Result<(), StoreError> {
        let sorted: BTreeMap<&String, &WordRecord> = words.iter().collect();
        let data = serde_json::to_vec_pretty(&sorted)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl WordStore for JsonFileWordStore {
    async fn get(&self, key: &str) -> Result<Option<WordRecord>, StoreError> {
        Ok(self.words.read().await.get(key).cloned())
    }

    async fn put(&self, record: WordRecord) -> Result<WordRecord, StoreError> {
        let mut words = self.words.write().await;
        let stored = {
            let previous = words.get(&record.key);
            stamp(record, previous, Utc::now())
        };

        let previous = words.insert(stored.key.clone(), stored.clone());
        if let Err(e) = self.persist(&words).await {
            // Roll back so memory matches what is on disk
            match previous {
                Some(previous) => words.insert(previous.key.clone(), previous),
                None => words.remove(&stored.key),
            };
            return Err(e);
        }

        Ok(stored)
    }

    async fn unlearned_keys(&self) -> Result<Vec<String>, StoreError> {
        let words = self.words.read().await;
        let mut keys: Vec<String> = words
            .values()
            .filter(|record| !record.learned)
            .map(|record| record.key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileWordStore::open(dir.path().join("words.json"))
            .await
            .unwrap();
        assert!(store.unlearned_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("words.json");

        {
            let store = JsonFileWordStore::open(&path).await.unwrap();
            let mut record = WordRecord::new("run".into(), Some("Run".into()), "to move fast".into());
            record.audio = Some("audio/run.mp3".into());
            store.put(record).await.unwrap();
        }

        let store = JsonFileWordStore::open(&path).await.unwrap();
        let record = store.get("run").await.unwrap().unwrap();
        assert_eq!(record.word.as_deref(), Some("Run"));
        assert_eq!(record.audio.as_deref(), Some("audio/run.mp3"));
        assert_eq!(record.practice_count, 1);
        assert!(record.creation_time.is_some());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn file_uses_camel_case_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        let store = JsonFileWordStore::open(&path).await.unwrap();
        store
            .put(WordRecord::new("run".into(), None, "to move fast".into()))
            .await
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["run"]["practiceCount"], 1);
        assert_eq!(raw["run"]["learned"], false);
        assert!(raw["run"]["lastUpdateTime"].is_string());
    }

    #[tokio::test]
    async fn corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, "[not a map").unwrap();

        let err = JsonFileWordStore::open(&path).await.err().unwrap();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
