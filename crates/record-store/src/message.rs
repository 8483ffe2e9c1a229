//! # Store Messages
//!
//! The requests a [`MemoryStore`](crate::MemoryStore) sends to its [`StoreActor`](crate::StoreActor).
//! Each variant mirrors one [`EntityStore`](crate::EntityStore) method and carries a oneshot
//! sender for the reply.

use crate::entity::StoredRecord;
use crate::error::StoreError;
use crate::query::{Lookup, Page, PageRequest};
use crate::store::Modifier;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest<T: StoredRecord> {
    Find {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    FindAll {
        lookup: Lookup<T::Category>,
        page: PageRequest,
        respond_to: Response<Page<T>>,
    },
    Save {
        record: T,
        respond_to: Response<T>,
    },
    Modify {
        id: T::Id,
        modifier: Modifier<T>,
        respond_to: Response<Option<T>>,
    },
    Exists {
        id: T::Id,
        respond_to: Response<bool>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<bool>,
    },
    Count {
        respond_to: Response<u64>,
    },
}
