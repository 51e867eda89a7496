use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use super::{StoreError, WordStore, stamp};
use crate::types::WordRecord;

/// Process-local store, contents are lost on exit
#[derive(Default)]
pub struct MemoryWordStore {
    words: RwLock<HashMap<String, WordRecord>>,
}

impl MemoryWordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.words.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.words.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl WordStore for MemoryWordStore {
    async fn get(&self, key: &str) -> Result<Option<WordRecord>, StoreError> {
        Ok(self.words.read().await.get(key).cloned())
    }

    async fn put(&self, record: WordRecord) -> Result<WordRecord, StoreError> {
        let mut words = self.words.write().await;
        let previous = words.get(&record.key);
        let stored = stamp(record, previous, Utc::now());
        words.insert(stored.key.clone(), stored.clone());
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
