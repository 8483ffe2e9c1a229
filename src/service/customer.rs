//! # Customer Service
//!
//! Same contract as [`BeerService`](crate::service::BeerService), without a category filter or
//! inventory.

use crate::model::{Customer, CustomerCreate, CustomerPatch, CustomerUpdate};
use crate::service::{ListFilter, ResourceService, ServiceError};
use record_store::Page;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Service for customers.
#[derive(Clone)]
pub struct CustomerService {
    inner: ResourceService<Customer>,
}

impl CustomerService {
    pub fn new(inner: ResourceService<Customer>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        customer_name: Option<String>,
        page_number: Option<i32>,
        page_size: Option<i32>,
    ) -> Result<Page<Customer>, ServiceError> {
        debug!("Sending request");
        let filter = ListFilter {
            name: customer_name,
            ..ListFilter::default()
        };
        self.inner.list(filter, page_number, page_size).await
    }

    #[instrument(skip(self))]
    pub async fn get_customer_by_id(&self, id: Uuid) -> Result<Option<Customer>, ServiceError> {
        debug!("Sending request");
        self.inner.get(&id).await
    }

    #[instrument(skip(self))]
    pub async fn save_new_customer(
        &self,
        customer: CustomerCreate,
    ) -> Result<Customer, ServiceError> {
        debug!("Sending request");
        self.inner.create(customer).await
    }

    #[instrument(skip(self))]
    pub async fn update_customer_by_id(
        &self,
        id: Uuid,
        customer: CustomerUpdate,
    ) -> Result<Option<Customer>, ServiceError> {
        debug!("Sending request");
        self.inner.replace(&id, customer).await
    }

    #[instrument(skip(self))]
    pub async fn patch_customer_by_id(
        &self,
        id: Uuid,
        customer: CustomerPatch,
    ) -> Result<Option<Customer>, ServiceError> {
        debug!("Sending request");
        self.inner.patch(&id, customer).await
    }

    #[instrument(skip(self))]
    pub async fn delete_customer_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        debug!("Sending request");
        self.inner.delete(&id).await
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.inner.count().await
    }
}
