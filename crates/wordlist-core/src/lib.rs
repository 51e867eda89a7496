pub mod archive;
pub mod dictionary;
pub mod dispatcher;
pub mod error;
pub mod locks;
pub mod normalize;
pub mod reply;
pub mod store;
pub mod types;

pub use archive::AudioArchiver;
pub use dictionary::{Dictionary, DictionaryEntry};
pub use dispatcher::{Action, Dispatcher};
pub use error::DispatchError;
pub use normalize::normalize;
pub use store::{JsonFileWordStore, MemoryWordStore, StoreError, WordStore};
pub use types::{ContextMap, OutboundContext, Params, Reply, WordRecord};

#[cfg(test)]
mod tests;
