//! # Store Errors
//!
//! Every backend reports failures through [`StoreError`]. A missing record is not an error at
//! this layer: lookups return `Option` and deletes of absent ids succeed.

/// Errors that can occur while talking to a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}
