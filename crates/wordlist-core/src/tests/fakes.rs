use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::archive::{AudioArchiver, audio_asset_path};
use crate::dictionary::{Dictionary, DictionaryEntry};

/// Dictionary answering from a fixed table and counting lookups
#[derive(Default)]
pub struct FakeDictionary {
    entries: HashMap<String, DictionaryEntry>,
    delay: Option<Duration>,
    lookups: AtomicUsize,
}

impl FakeDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, definition: &str, audio_url: Option<&str>) -> Self {
        self.entries.insert(
            key.to_string(),
            DictionaryEntry {
                definition: definition.to_string(),
                audio_url: audio_url.map(String::from),
            },
        );
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Dictionary for FakeDictionary {
    async fn lookup(&self, key: &str) -> Option<DictionaryEntry> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.entries.get(key).cloned()
    }
}

/// Archiver that records requests and optionally fails all of them
#[derive(Default)]
pub struct FakeArchiver {
    pub fail: bool,
    pub requests: Mutex<Vec<(String, String)>>,
}

#[async_trait::async_trait]
impl AudioArchiver for FakeArchiver {
    async fn archive(&self, source_url: &str, key: &str) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .push((source_url.to_string(), key.to_string()));
        if self.fail {
            None
        } else {
            Some(audio_asset_path(key))
        }
    }
}
