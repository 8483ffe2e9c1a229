//! # In-Memory Store Actor
//!
//! This module defines the `StoreActor`, the task that owns the in-memory record map. It is the
//! "Server" side of the in-memory backend: every read and write arrives as a
//! [`StoreRequest`] and is handled to completion before the next one is taken off the channel.

use crate::client::MemoryStore;
use crate::entity::StoredRecord;
use crate::message::StoreRequest;
use crate::query::{sort_records, Page};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The actor that owns every record of one resource type.
///
/// **Concurrency Model**:
/// The map is only ever touched from inside [`StoreActor::run`], which processes one message at
/// a time. That loop is the single writer: a reader can observe a record before or after a save,
/// never half-way through one, and no `Mutex` is needed around the map. A `Modify` reads and
/// writes its record inside one message, so it cannot interleave with a delete.
///
/// # Usage Pattern
///
/// 1.  **Create**: `StoreActor::new()` returns the actor and its [`MemoryStore`] handle.
/// 2.  **Run**: spawn `actor.run()` on the runtime.
/// 3.  **Use**: share the handle (it is cheap to clone) with the services.
/// 4.  **Shut down**: drop every handle; the loop sees the closed channel and returns.
///
/// ```rust
/// use record_store::{EntityStore, StoreActor, StoredRecord};
///
/// #[derive(Clone, Debug)]
/// struct Hop { id: u32, name: String }
///
/// impl StoredRecord for Hop {
///     type Id = u32;
///     type Category = ();
///     fn id(&self) -> &u32 { &self.id }
///     fn name(&self) -> &str { &self.name }
///     fn category(&self) -> Option<&()> { None }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, store) = StoreActor::<Hop>::new(10);
///     tokio::spawn(actor.run());
///
///     store.save(Hop { id: 1, name: "Citra".into() }).await.unwrap();
///     assert!(store.exists(&1).await.unwrap());
/// }
/// ```
pub struct StoreActor<T: StoredRecord> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: HashMap<T::Id, T>,
}

impl<T: StoredRecord> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated [`MemoryStore`] handle.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls on the handle wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, MemoryStore<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: HashMap::new(),
        };
        (actor, MemoryStore::new(sender))
    }

    /// Runs the actor's event loop, processing messages until every handle is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Beer" instead of "brewery::model::beer::Beer")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Find { id, respond_to } => {
                    let record = self.records.get(&id).cloned();
                    debug!(entity_type, %id, found = record.is_some(), "Find");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::FindAll {
                    lookup,
                    page,
                    respond_to,
                } => {
                    let mut matching: Vec<T> = self
                        .records
                        .values()
                        .filter(|record| lookup.matches(*record))
                        .cloned()
                        .collect();
                    sort_records(&mut matching);
                    let result = Page::from_sorted(matching, page);
                    debug!(
                        entity_type,
                        lookup = lookup.shape(),
                        page = page.index(),
                        total = result.total_elements,
                        "FindAll"
                    );
                    let _ = respond_to.send(Ok(result));
                }
                StoreRequest::Save { record, respond_to } => {
                    let id = record.id().clone();
                    let replaced = self.records.insert(id.clone(), record.clone()).is_some();
                    info!(entity_type, %id, replaced, size = self.records.len(), "Saved");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::Modify {
                    id,
                    modifier,
                    respond_to,
                } => {
                    let updated = self.records.get_mut(&id).map(|slot| {
                        *slot = modifier.apply(slot.clone());
                        slot.clone()
                    });
                    info!(entity_type, %id, found = updated.is_some(), "Modified");
                    let _ = respond_to.send(Ok(updated));
                }
                StoreRequest::Exists { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.records.contains_key(&id)));
                }
                StoreRequest::Delete { id, respond_to } => {
                    let removed = self.records.remove(&id).is_some();
                    info!(entity_type, %id, removed, size = self.records.len(), "Deleted");
                    let _ = respond_to.send(Ok(removed));
                }
                StoreRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.records.len() as u64));
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }
}
