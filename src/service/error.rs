//! Error types for the resource services.

use record_store::StoreError;
use thiserror::Error;

/// Errors that can occur during service operations.
///
/// A missing record is not one of them: lookups return `Option` and deletes return `bool`.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The storage backend failed. Never retried.
    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}
