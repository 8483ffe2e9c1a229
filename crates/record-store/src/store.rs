//! # EntityStore Trait
//!
//! The backend-swap contract. The service layer only ever holds an `Arc<dyn EntityStore<T>>`, so
//! the in-memory actor and the SQLite repository are interchangeable at startup.
//!
//! Both implementations must return the same page (same records, same order, same totals) for
//! the same data and the same query.

use crate::entity::StoredRecord;
use crate::error::StoreError;
use crate::query::{Lookup, Page, PageRequest};
use async_trait::async_trait;
use std::fmt;

/// A change to one stored record, applied by the store while no other request can touch it.
///
/// The closure must keep the record's id.
pub struct Modifier<T>(Box<dyn FnOnce(T) -> T + Send>);

impl<T> Modifier<T> {
    pub fn new(f: impl FnOnce(T) -> T + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn apply(self, record: T) -> T {
        (self.0)(record)
    }
}

impl<T> fmt::Debug for Modifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Modifier(..)")
    }
}

#[async_trait]
pub trait EntityStore<T: StoredRecord>: Send + Sync {
    /// Fetch a record by id.
    async fn find(&self, id: &T::Id) -> Result<Option<T>, StoreError>;

    /// Fetch one page of the records matching `lookup`, sorted by name ascending.
    async fn find_all(
        &self,
        lookup: &Lookup<T::Category>,
        page: PageRequest,
    ) -> Result<Page<T>, StoreError>;

    /// Insert the record if its id is new, otherwise overwrite it in place.
    async fn save(&self, record: T) -> Result<T, StoreError>;

    /// Read, change and write back one record as a single unit. No other request is served in
    /// between, so concurrent modifications and deletes never overwrite each other.
    ///
    /// `Ok(None)` when the id is absent; nothing is written and the modifier is not called.
    async fn modify(&self, id: &T::Id, modifier: Modifier<T>) -> Result<Option<T>, StoreError>;

    async fn exists(&self, id: &T::Id) -> Result<bool, StoreError>;

    /// Remove a record. Returns whether it was present; deleting an absent id is not an error.
    async fn delete(&self, id: &T::Id) -> Result<bool, StoreError>;

    /// Total number of stored records.
    async fn count(&self) -> Result<u64, StoreError>;
}
