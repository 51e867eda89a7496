use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Word store error: {0}")]
    Store(#[from] StoreError),
}
