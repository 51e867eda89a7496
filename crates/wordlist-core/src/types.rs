use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameter mapping of an action or a context
pub type Params = serde_json::Map<String, Value>;

/// Inbound contexts flattened to name -> parameters
pub type ContextMap = HashMap<String, Params>;

/// A word being learned, stored under its normalized key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub key: String,
    /// Display form as first requested. Older records may not carry it.
    #[serde(default)]
    pub word: Option<String>,
    pub definition: String,
    pub practice_count: u32,
    pub learned: bool,
    /// Bucket-relative path of the archived pronunciation
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_update_time: Option<DateTime<Utc>>,
}

impl WordRecord {
    /// A freshly defined word: practiced once, not learned
    pub fn new(key: String, word: Option<String>, definition: String) -> Self {
        Self {
            key,
            word,
            definition,
            practice_count: 1,
            learned: false,
            audio: None,
            creation_time: None,
            last_update_time: None,
        }
    }

    pub fn display(&self) -> &str {
        self.word.as_deref().unwrap_or(&self.key)
    }

    /// The word was asked for again or not remembered
    pub fn mark_practiced(&mut self) {
        self.practice_count = self.practice_count.saturating_add(1);
        self.learned = false;
    }

    pub fn mark_learned(&mut self) {
        self.learned = true;
    }
}

/// Context entry sent back to the dialog platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundContext {
    pub name: String,
    pub lifespan: u32,
    pub parameters: Params,
}

impl OutboundContext {
    pub fn set(name: impl Into<String>, lifespan: u32, parameters: Params) -> Self {
        Self {
            name: name.into(),
            lifespan,
            parameters,
        }
    }

    /// Lifespan 0 makes the platform drop the context
    pub fn clear(name: impl Into<String>, parameters: Params) -> Self {
        Self::set(name, 0, parameters)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// SSML for spoken output
    pub speech: String,
    pub text: String,
    pub context: Vec<OutboundContext>,
}

impl Reply {
    pub fn with_context(mut self, context: OutboundContext) -> Self {
        self.context.push(context);
        self
    }
}
