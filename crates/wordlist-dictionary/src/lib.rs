mod client;
mod error;
mod response;

pub use client::OxfordDictionary;
pub use error::DictionaryError;
pub use response::parse_entry;
