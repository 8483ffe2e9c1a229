//! Error types for starting and stopping the catalog.

use crate::csv_import::CsvImportError;
use crate::service::ServiceError;
use record_store::StoreError;
use thiserror::Error;

/// Errors that can occur while the catalog starts up or shuts down.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configured backend name is not one we know.
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    /// A store could not be opened.
    #[error("Failed to open store: {0}")]
    Store(#[from] StoreError),

    /// A service call made by the catalog itself (seeding, the demo run) failed.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// The beer CSV file could not be read.
    #[error("CSV import failed: {0}")]
    Csv(#[from] CsvImportError),

    /// A store task panicked or was cancelled.
    #[error("Store task failed: {0}")]
    TaskFailed(String),
}
