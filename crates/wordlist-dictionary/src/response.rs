//! Partial views of a dictionary entries response.
//!
//! Only the first element of each list on the definition path is decoded,
//! the rest are skipped unparsed. A missing level decodes to `None`, a level
//! of the wrong shape is a decode error. Definition and pronunciation are
//! decoded independently so a malformed pronunciation never hides a
//! definition.

use std::fmt;
use std::marker::PhantomData;

use serde::Deserialize;
use serde::de::{Deserializer, IgnoredAny, SeqAccess, Visitor};
use wordlist_core::DictionaryEntry;

use crate::error::DictionaryError;

#[derive(Deserialize)]
struct DefinitionView {
    #[serde(default, deserialize_with = "first")]
    results: Option<DefinitionResult>,
}

#[derive(Deserialize)]
struct DefinitionResult {
    #[serde(default, rename = "lexicalEntries", deserialize_with = "first")]
    lexical_entry: Option<LexicalEntry>,
}

#[derive(Deserialize)]
struct LexicalEntry {
    #[serde(default, deserialize_with = "first")]
    entries: Option<Entry>,
}

#[derive(Deserialize)]
struct Entry {
    #[serde(default, deserialize_with = "first")]
    senses: Option<Sense>,
}

#[derive(Deserialize)]
struct Sense {
    #[serde(default, deserialize_with = "first")]
    definitions: Option<String>,
}

impl DefinitionView {
    fn definition(self) -> Option<String> {
        self.results?.lexical_entry?.entries?.senses?.definitions
    }
}

#[derive(Deserialize)]
struct PronunciationView {
    #[serde(default, deserialize_with = "first")]
    results: Option<PronunciationResult>,
}

#[derive(Deserialize)]
struct PronunciationResult {
    #[serde(default, rename = "lexicalEntries", deserialize_with = "first")]
    lexical_entry: Option<PronunciationEntry>,
}

#[derive(Deserialize)]
struct PronunciationEntry {
    #[serde(default)]
    pronunciations: Vec<Pronunciation>,
}

#[derive(Deserialize)]
struct Pronunciation {
    #[serde(default, rename = "audioFile")]
    audio_file: Option<String>,
}

impl PronunciationView {
    fn audio_url(self) -> Option<String> {
        self.results?
            .lexical_entry?
            .pronunciations
            .into_iter()
            .find_map(|p| p.audio_file)
    }
}

/// Decode a dictionary entries response body
pub fn parse_entry(body: &[u8]) -> Result<DictionaryEntry, DictionaryError> {
    let definition = serde_json::from_slice::<DefinitionView>(body)?
        .definition()
        .ok_or(DictionaryError::MissingDefinition)?;

    let audio_url = match serde_json::from_slice::<PronunciationView>(body) {
        Ok(view) => view.audio_url(),
        Err(e) => {
            tracing::debug!("Ignoring unusable pronunciations: {e}");
            None
        }
    };

    Ok(DictionaryEntry {
        definition,
        audio_url,
    })
}

/// Deserialize only the first element of a list
fn first<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct First<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for First<T> {
        type Value = Option<T>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a list")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let first = seq.next_element::<T>()?;
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(first)
        }
    }

    deserializer.deserialize_seq(First(PhantomData))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    fn run_response() -> serde_json::Value {
        json!({
            "metadata": { "provider": "Oxford University Press" },
            "results": [{
                "id": "run",
                "lexicalEntries": [{
                    "entries": [{
                        "senses": [
                            { "definitions": ["to move fast", "to flee"] },
                            { "definitions": ["to manage"] }
                        ]
                    }],
                    "pronunciations": [
                        { "phoneticSpelling": "rʌn" },
                        { "audioFile": "http://audio.example/run.mp3" },
                        { "audioFile": "http://audio.example/run_gb.mp3" }
                    ]
                }]
            }]
        })
    }

    #[test]
    fn takes_first_definition_and_audio() {
        let entry = parse_entry(&body(run_response())).unwrap();
        assert_eq!(entry.definition, "to move fast");
        assert_eq!(entry.audio_url.as_deref(), Some("http://audio.example/run.mp3"));
    }

    #[test]
    fn audio_is_optional() {
        let mut response = run_response();
        response["results"][0]["lexicalEntries"][0]
            .as_object_mut()
            .unwrap()
            .remove("pronunciations");

        let entry = parse_entry(&body(response)).unwrap();
        assert_eq!(entry.definition, "to move fast");
        assert!(entry.audio_url.is_none());
    }

    #[test]
    fn malformed_pronunciations_only_drop_audio() {
        let mut response = run_response();
        response["results"][0]["lexicalEntries"][0]["pronunciations"] = json!("rʌn");

        let entry = parse_entry(&body(response)).unwrap();
        assert_eq!(entry.definition, "to move fast");
        assert!(entry.audio_url.is_none());
    }

    #[test]
    fn missing_levels_are_missing_definition() {
        for response in [
            json!({}),
            json!({ "results": [] }),
            json!({ "results": [{ "lexicalEntries": [] }] }),
            json!({ "results": [{ "lexicalEntries": [{ "entries": [{ "senses": [{}] }] }] }] }),
        ] {
            let err = parse_entry(&body(response)).unwrap_err();
            assert!(matches!(err, DictionaryError::MissingDefinition));
        }
    }

    #[test]
    fn wrong_shapes_are_parse_errors() {
        for response in [
            json!({ "results": {} }),
            json!({ "results": [null] }),
            json!({ "results": [{ "lexicalEntries": [{ "entries": [{ "senses": [{ "definitions": [7] }] }] }] }] }),
        ] {
            let err = parse_entry(&body(response)).unwrap_err();
            assert!(matches!(err, DictionaryError::Parse(_)));
        }
        assert!(matches!(
            parse_entry(b"<html>").unwrap_err(),
            DictionaryError::Parse(_)
        ));
    }

    #[test]
    fn later_results_are_not_decoded() {
        let response = json!({
            "results": [
                { "lexicalEntries": [{ "entries": [{ "senses": [{ "definitions": ["to move fast"] }] }] }] },
                "unexpected"
            ]
        });
        assert_eq!(parse_entry(&body(response)).unwrap().definition, "to move fast");
    }
}
