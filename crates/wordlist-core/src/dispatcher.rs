use std::sync::Arc;

use rand::seq::SliceRandom;
use serde_json::{Value, json};
use wordlist_config::storage::StorageConfig;

use crate::archive::AudioArchiver;
use crate::dictionary::Dictionary;
use crate::error::DispatchError;
use crate::locks::KeyLocks;
use crate::normalize::normalize;
use crate::reply;
use crate::store::WordStore;
use crate::types::{ContextMap, OutboundContext, Params, Reply, WordRecord};

/// Name of the context carrying the word being practiced
pub const PRACTICE_CONTEXT: &str = "practice";
/// Parameter of [`PRACTICE_CONTEXT`] holding the word key
pub const WORD_ID_PARAM: &str = "word_id";
/// Keeps the practice context alive for the user's answer
pub const PRACTICE_LIFESPAN: u32 = 2;

const UNKNOWN_WORD: &str = "I do not know this word";
const NOTHING_TO_PRACTICE: &str = "You have no words to practice yet";
const KNOWN_MISSING: &str = "I am afraid I do not know this word";
const KNOWN_OK: &str = "OK, I will not ask this word again";
const UNKNOWN_MISSING: &str = "I do not know this word either, sorry";
const FALLBACK: &str = "I did not get that";

/// Intents understood by the webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DefineWord,
    Practice,
    PracticeKnown,
    PracticeUnknown,
    Unrecognized,
}

impl Action {
    pub fn parse(action: &str) -> Self {
        match action {
            "define_word" => Action::DefineWord,
            "practice" => Action::Practice,
            "practice_known" => Action::PracticeKnown,
            "practice_unknown" => Action::PracticeUnknown,
            _ => Action::Unrecognized,
        }
    }
}

/// Maps an action with its parameters and contexts to a state change and a reply
pub struct Dispatcher {
    store: Arc<dyn WordStore>,
    dictionary: Arc<dyn Dictionary>,
    archiver: Option<Arc<dyn AudioArchiver>>,
    storage: StorageConfig,
    locks: KeyLocks,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn WordStore>,
        dictionary: Arc<dyn Dictionary>,
        storage: StorageConfig,
    ) -> Self {
        Self {
            store,
            dictionary,
            archiver: None,
            storage,
            locks: KeyLocks::new(),
        }
    }

    /// Archive pronunciations of newly defined words
    pub fn with_archiver(mut self, archiver: Arc<dyn AudioArchiver>) -> Self {
        self.archiver = Some(archiver);
        self
    }

    pub async fn dispatch(
        &self,
        action: &str,
        params: &Params,
        context: &ContextMap,
    ) -> Result<Reply, DispatchError> {
        let parsed = Action::parse(action);
        tracing::debug!("Dispatching {action:?} as {parsed:?}");

        match parsed {
            Action::DefineWord => self.define_word(params).await,
            Action::Practice => self.practice().await,
            Action::PracticeKnown => self.practice_known(context).await,
            Action::PracticeUnknown => self.practice_unknown(context).await,
            Action::Unrecognized => Ok(reply::simple(FALLBACK)),
        }
    }

    async fn define_word(&self, params: &Params) -> Result<Reply, DispatchError> {
        let Some(word) = params
            .get("word")
            .and_then(Value::as_str)
            .filter(|word| !word.trim().is_empty())
        else {
            return Ok(reply::simple(UNKNOWN_WORD));
        };

        let key = normalize(word);
        let _guard = self.locks.lock(&key).await;

        if let Some(mut record) = self.store.get(&key).await? {
            record.mark_practiced();
            let record = self.store.put(record).await?;
            tracing::info!("Redefined {key} (practice count {})", record.practice_count);
            return Ok(self.definition_reply(&record));
        }

        let Some(entry) = self.dictionary.lookup(&key).await else {
            tracing::info!("No definition found for {key}");
            return Ok(reply::simple(UNKNOWN_WORD));
        };

        let mut record = WordRecord::new(key, Some(word.to_string()), entry.definition);
        if let (Some(archiver), Some(audio_url)) = (&self.archiver, entry.audio_url.as_deref()) {
            record.audio = archiver.archive(audio_url, &record.key).await;
        }

        let record = self.store.put(record).await?;
        tracing::info!("Added new word {}", record.key);
        Ok(self.definition_reply(&record))
    }

    async fn practice(&self) -> Result<Reply, DispatchError> {
        let keys = self.store.unlearned_keys().await?;
        let selected = {
            let mut rng = rand::thread_rng();
            keys.choose(&mut rng).cloned()
        };
        let Some(key) = selected else {
            tracing::info!("Practice requested with an empty practice pool");
            return Ok(reply::simple(NOTHING_TO_PRACTICE));
        };

        let display = match self.store.get(&key).await? {
            Some(record) => record.display().to_string(),
            None => key.clone(),
        };
        tracing::debug!("Selected {key} for practice out of {}", keys.len());

        let mut parameters = Params::new();
        parameters.insert(WORD_ID_PARAM.to_string(), json!(key));

        let reply = reply::simple(&format!("How about {display}! Do you remember it?"));
        Ok(reply.with_context(OutboundContext::set(
            PRACTICE_CONTEXT,
            PRACTICE_LIFESPAN,
            parameters,
        )))
    }

    async fn practice_known(&self, context: &ContextMap) -> Result<Reply, DispatchError> {
        let reset = reset_practice(context);
        let Some(key) = practiced_key(context) else {
            return Ok(reply::simple(KNOWN_MISSING).with_context(reset));
        };

        let _guard = self.locks.lock(key).await;
        let Some(mut record) = self.store.get(key).await? else {
            tracing::info!("Practice context names unknown word {key}");
            return Ok(reply::simple(KNOWN_MISSING).with_context(reset));
        };

        record.mark_learned();
        self.store.put(record).await?;
        tracing::info!("Marked {key} as learned");
        Ok(reply::simple(KNOWN_OK).with_context(reset))
    }

    async fn practice_unknown(&self, context: &ContextMap) -> Result<Reply, DispatchError> {
        let reset = reset_practice(context);
        let Some(key) = practiced_key(context) else {
            return Ok(reply::simple(UNKNOWN_MISSING).with_context(reset));
        };

        let _guard = self.locks.lock(key).await;
        let Some(mut record) = self.store.get(key).await? else {
            tracing::info!("Practice context names unknown word {key}");
            return Ok(reply::simple(UNKNOWN_MISSING).with_context(reset));
        };

        record.mark_practiced();
        let record = self.store.put(record).await?;
        Ok(self.definition_reply(&record).with_context(reset))
    }

    fn definition_reply(&self, record: &WordRecord) -> Reply {
        let audio_url = record
            .audio
            .as_deref()
            .and_then(|asset| self.storage.public_url(asset));
        reply::definition(record, audio_url.as_deref())
    }
}

fn practiced_key(context: &ContextMap) -> Option<&str> {
    context
        .get(PRACTICE_CONTEXT)?
        .get(WORD_ID_PARAM)?
        .as_str()
}

/// Clears the practice context, echoing back whatever word id it carried
fn reset_practice(context: &ContextMap) -> OutboundContext {
    let word_id = context
        .get(PRACTICE_CONTEXT)
        .and_then(|params| params.get(WORD_ID_PARAM))
        .cloned()
        .unwrap_or(Value::Null);

    let mut parameters = Params::new();
    parameters.insert(WORD_ID_PARAM.to_string(), word_id);
    OutboundContext::clear(PRACTICE_CONTEXT, parameters)
}
