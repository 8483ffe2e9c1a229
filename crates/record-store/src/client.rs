//! # In-Memory Store Handle
//!
//! [`MemoryStore`] is the client half of the in-memory backend. It implements
//! [`EntityStore`] by forwarding each call to the owning [`StoreActor`](crate::StoreActor) over a
//! Tokio mpsc channel and awaiting the oneshot reply.

use crate::entity::StoredRecord;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use crate::query::{Lookup, Page, PageRequest};
use crate::store::{EntityStore, Modifier};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle to a running `StoreActor`.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Generic** – works with any record that implements `StoredRecord`.
#[derive(Clone)]
pub struct MemoryStore<T: StoredRecord> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoredRecord> MemoryStore<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R: Send>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T> + Send,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}

#[async_trait]
impl<T: StoredRecord> EntityStore<T> for MemoryStore<T> {
    async fn find(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        let id = id.clone();
        self.request(|respond_to| StoreRequest::Find { id, respond_to })
            .await
    }

    async fn find_all(
        &self,
        lookup: &Lookup<T::Category>,
        page: PageRequest,
    ) -> Result<Page<T>, StoreError> {
        let lookup = lookup.clone();
        self.request(|respond_to| StoreRequest::FindAll {
            lookup,
            page,
            respond_to,
        })
        .await
    }

    async fn save(&self, record: T) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Save { record, respond_to })
            .await
    }

    async fn modify(&self, id: &T::Id, modifier: Modifier<T>) -> Result<Option<T>, StoreError> {
        let id = id.clone();
        self.request(|respond_to| StoreRequest::Modify {
            id,
            modifier,
            respond_to,
        })
        .await
    }

    async fn exists(&self, id: &T::Id) -> Result<bool, StoreError> {
        let id = id.clone();
        self.request(|respond_to| StoreRequest::Exists { id, respond_to })
            .await
    }

    async fn delete(&self, id: &T::Id) -> Result<bool, StoreError> {
        let id = id.clone();
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.request(|respond_to| StoreRequest::Count { respond_to })
            .await
    }
}
