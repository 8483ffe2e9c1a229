//! # Resource Services
//!
//! The layer a transport would call. [`ResourceService`] holds the logic once for every
//! [`Resource`]; [`BeerService`] and [`CustomerService`] are the per-resource façades with
//! domain-named methods.
//!
//! ## Request Flow
//!
//! ```text
//! list    : normalize → select_lookup → store.find_all → apply_visibility
//! get     : store.find
//! create  : Resource::from_create → store.save
//! replace : store.modify(merge::replace)
//! patch   : store.modify(merge::merge)
//! delete  : store.delete
//! ```
//!
//! Every mutation is one store call. Replace and patch hand the merge to the store as a
//! [`Modifier`], which reads and writes the record without letting another request in between.
//! A missing record is reported as `None` and never created.
//!
//! ## Structure
//!
//! - [`query`] - page normalization and its constants
//! - [`dispatch`] - lookup selection and inventory redaction
//! - [`error`] - [`ServiceError`]
//! - [`beer`], [`customer`] - façades

pub mod beer;
pub mod customer;
pub mod dispatch;
pub mod error;
pub mod query;

pub use beer::BeerService;
pub use customer::CustomerService;
pub use dispatch::ListFilter;
pub use error::ServiceError;
pub use query::{normalize, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::merge;
use crate::resource::Resource;
use chrono::Utc;
use record_store::{EntityStore, Modifier, Page};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Generic CRUD + query service for one resource type.
///
/// The backend is whatever [`EntityStore`] the composition root handed in; the service cannot
/// tell the in-memory actor from SQLite.
pub struct ResourceService<T: Resource> {
    store: Arc<dyn EntityStore<T>>,
}

impl<T: Resource> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<T: Resource> ResourceService<T> {
    pub fn new(store: Arc<dyn EntityStore<T>>) -> Self {
        Self { store }
    }

    /// Returns one page of records matching the filter, sorted by name.
    pub async fn list(
        &self,
        filter: ListFilter<T::Category>,
        page_number: Option<i32>,
        page_size: Option<i32>,
    ) -> Result<Page<T>, ServiceError> {
        let request = normalize(page_number, page_size);
        let lookup = dispatch::select_lookup(filter.name, filter.category);
        debug!(
            kind = T::KIND,
            lookup = lookup.shape(),
            page = request.index(),
            size = request.size(),
            "List"
        );
        let page = self.store.find_all(&lookup, request).await?;
        Ok(dispatch::apply_visibility(page, filter.show_inventory))
    }

    pub async fn get(&self, id: &Uuid) -> Result<Option<T>, ServiceError> {
        let found = self.store.find(id).await?;
        if found.is_none() {
            warn!(kind = T::KIND, %id, "Not found");
        }
        Ok(found)
    }

    /// Stores a new record under a freshly generated id.
    pub async fn create(&self, params: T::Create) -> Result<T, ServiceError> {
        debug!(kind = T::KIND, ?params, "Create");
        let record = T::from_create(Uuid::new_v4(), params, Utc::now());
        let saved = self.store.save(record).await?;
        info!(kind = T::KIND, id = %saved.id(), "Created");
        Ok(saved)
    }

    /// Overwrites every business field. `Ok(None)` when the id is unknown.
    pub async fn replace(&self, id: &Uuid, update: T::Update) -> Result<Option<T>, ServiceError> {
        let now = Utc::now();
        let modifier = Modifier::new(move |existing: T| merge::replace(existing, update, now));
        let Some(replaced) = self.store.modify(id, modifier).await? else {
            warn!(kind = T::KIND, %id, "Replace target not found");
            return Ok(None);
        };
        info!(kind = T::KIND, %id, "Replaced");
        Ok(Some(replaced))
    }

    /// Overwrites the business fields present in the patch. `Ok(None)` when the id is unknown.
    pub async fn patch(&self, id: &Uuid, patch: T::Patch) -> Result<Option<T>, ServiceError> {
        let now = Utc::now();
        let modifier = Modifier::new(move |existing: T| merge::merge(existing, patch, now));
        let Some(patched) = self.store.modify(id, modifier).await? else {
            warn!(kind = T::KIND, %id, "Patch target not found");
            return Ok(None);
        };
        info!(kind = T::KIND, %id, "Patched");
        Ok(Some(patched))
    }

    /// Removes the record. `Ok(false)` when there was nothing to remove.
    pub async fn delete(&self, id: &Uuid) -> Result<bool, ServiceError> {
        let removed = self.store.delete(id).await?;
        if removed {
            info!(kind = T::KIND, %id, "Deleted");
        } else {
            warn!(kind = T::KIND, %id, "Delete target not found");
        }
        Ok(removed)
    }

    /// Number of stored records.
    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.store.count().await?)
    }
}
