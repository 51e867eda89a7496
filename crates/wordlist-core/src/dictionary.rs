/// Result of a successful dictionary lookup
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    /// First sense of the first entry
    pub definition: String,
    /// Pronunciation recording, when the dictionary has one
    pub audio_url: Option<String>,
}

/// External dictionary lookup
#[async_trait::async_trait]
pub trait Dictionary: Send + Sync {
    /// Look up a normalized key. `None` covers every kind of miss:
    /// unknown word, HTTP failure or an unusable response.
    async fn lookup(&self, key: &str) -> Option<DictionaryEntry>;
}
