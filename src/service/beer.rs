//! # Beer Service
//!
//! Provides the beer-specific API a transport layer calls.
//! It wraps a `ResourceService<Beer>` and names the operations the way the catalog API does.

use crate::model::{Beer, BeerCreate, BeerPatch, BeerStyle, BeerUpdate};
use crate::service::{ListFilter, ResourceService, ServiceError};
use record_store::Page;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Service for the beer catalog.
#[derive(Clone)]
pub struct BeerService {
    inner: ResourceService<Beer>,
}

impl BeerService {
    pub fn new(inner: ResourceService<Beer>) -> Self {
        Self { inner }
    }

    /// Lists beers sorted by name.
    ///
    /// `beer_name` is a case-insensitive substring; `show_inventory: Some(false)` hides
    /// `quantity_on_hand` in the result.
    #[instrument(skip(self))]
    pub async fn list_beers(
        &self,
        beer_name: Option<String>,
        beer_style: Option<BeerStyle>,
        show_inventory: Option<bool>,
        page_number: Option<i32>,
        page_size: Option<i32>,
    ) -> Result<Page<Beer>, ServiceError> {
        debug!("Sending request");
        let filter = ListFilter {
            name: beer_name,
            category: beer_style,
            show_inventory,
        };
        self.inner.list(filter, page_number, page_size).await
    }

    #[instrument(skip(self))]
    pub async fn get_beer_by_id(&self, id: Uuid) -> Result<Option<Beer>, ServiceError> {
        debug!("Sending request");
        self.inner.get(&id).await
    }

    #[instrument(skip(self))]
    pub async fn save_new_beer(&self, beer: BeerCreate) -> Result<Beer, ServiceError> {
        debug!("Sending request");
        self.inner.create(beer).await
    }

    #[instrument(skip(self))]
    pub async fn update_beer_by_id(
        &self,
        id: Uuid,
        beer: BeerUpdate,
    ) -> Result<Option<Beer>, ServiceError> {
        debug!("Sending request");
        self.inner.replace(&id, beer).await
    }

    #[instrument(skip(self))]
    pub async fn patch_beer_by_id(
        &self,
        id: Uuid,
        beer: BeerPatch,
    ) -> Result<Option<Beer>, ServiceError> {
        debug!("Sending request");
        self.inner.patch(&id, beer).await
    }

    /// Returns `false` when no beer had this id.
    #[instrument(skip(self))]
    pub async fn delete_beer_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        debug!("Sending request");
        self.inner.delete(&id).await
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.inner.count().await
    }
}
