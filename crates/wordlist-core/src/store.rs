use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::types::WordRecord;

pub mod file;
pub mod memory;

pub use file::JsonFileWordStore;
pub use memory::MemoryWordStore;

/// Keyed persistence of word records
#[async_trait::async_trait]
pub trait WordStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<WordRecord>, StoreError>;

    /// Create or replace the record under `record.key`. The store assigns
    /// timestamps and returns the record as stored.
    async fn put(&self, record: WordRecord) -> Result<WordRecord, StoreError>;

    /// Keys of every record with `learned == false`, in key order
    async fn unlearned_keys(&self) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Corrupt word store {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Keep the original creation time and refresh the update time
pub(crate) fn stamp(
    mut record: WordRecord,
    previous: Option<&WordRecord>,
    now: DateTime<Utc>,
) -> WordRecord {
    record.creation_time = previous
        .and_then(|previous| previous.creation_time)
        .or(record.creation_time)
        .or(Some(now));
    record.last_update_time = Some(now);
    record
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn stamp_preserves_creation_time() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        let mut previous = WordRecord::new("run".into(), None, "to move fast".into());
        previous.creation_time = Some(created);

        let stored = stamp(previous.clone(), Some(&previous), now);
        assert_eq!(stored.creation_time, Some(created));
        assert_eq!(stored.last_update_time, Some(now));

        let fresh = stamp(WordRecord::new("walk".into(), None, "to move".into()), None, now);
        assert_eq!(fresh.creation_time, Some(now));
    }
}
