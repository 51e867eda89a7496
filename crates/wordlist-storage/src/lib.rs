mod archiver;
mod blob;

pub use archiver::HttpAudioArchiver;
pub use blob::{BlobStore, FsBlobStore, StorageError};
