//! # Mock Store & Testing Guide
//!
//! Utilities for testing code that sits on top of an [`EntityStore`](crate::EntityStore) without a
//! real backend. A mock store is a [`MemoryStore`] whose channel ends up in the test instead of in
//! a [`StoreActor`](crate::StoreActor), so the test sees every request the code under test makes.
//!
//! ## When to use Mocks vs Real Stores
//!
//! | Feature | Mock store | Real store |
//! |---------|------------|------------|
//! | **State** | None (expectations) | Real records |
//! | **Visibility** | Every request is observable | Only results |
//! | **Error Injection** | Easy (`return_err`) | Hard |
//! | **Use Case** | Which query was issued, failure paths | Results, backend equivalence |
//!
//! ## Pattern 0: Inspect the raw request
//!
//! [`create_mock_store`] hands back the receiver. Drive the code under test in a spawned task and
//! pull the request out with one of the `expect_*` helpers:
//!
//! ```rust,ignore
//! let (store, mut receiver) = create_mock_store::<Beer>(10);
//! let task = tokio::spawn(async move { store.find_all(&Lookup::All, PageRequest::new(0, 25)).await });
//! let (lookup, page, responder) = expect_find_all(&mut receiver).await.unwrap();
//! assert_eq!(lookup, Lookup::All);
//! responder.send(Ok(Page::new(vec![], page, 0))).unwrap();
//! ```
//!
//! ## Pattern 1: Fluent expectations
//!
//! [`MockStore`] answers requests from a queue of expectations and records every lookup it
//! receives, which makes "exactly one query of this shape" easy to assert:
//!
//! ```rust,ignore
//! let mut mock = MockStore::<Beer>::new();
//! mock.expect_find_all().return_ok(vec![galaxy_cat]);
//! let service = ResourceService::new(Arc::new(mock.store()));
//! service.list(filter, None, None).await?;
//! assert_eq!(mock.lookups(), vec![Lookup::NameLike("cat".into())]);
//! mock.verify();
//! ```

use crate::client::MemoryStore;
use crate::entity::StoredRecord;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use crate::query::{Lookup, Page, PageRequest};
use crate::store::Modifier;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// What the mock should answer to the next request.
enum Expectation<T: StoredRecord> {
    Find(Result<Option<T>, StoreError>),
    /// The records are paged with the request the caller sent.
    FindAll(Result<Vec<T>, StoreError>),
    /// `Ok(())` echoes the saved record back.
    Save(Result<(), StoreError>),
    /// `Ok(Some(current))` runs the modifier on `current` and answers with the result.
    Modify(Result<Option<T>, StoreError>),
    Exists(Result<bool, StoreError>),
    Delete(Result<bool, StoreError>),
}

impl<T: StoredRecord> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::Find(_) => "find",
            Expectation::FindAll(_) => "find_all",
            Expectation::Save(_) => "save",
            Expectation::Modify(_) => "modify",
            Expectation::Exists(_) => "exists",
            Expectation::Delete(_) => "delete",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock store with expectation tracking for fluent testing.
///
/// Requests are answered in order. A request that does not match the next expectation panics the
/// background task, which the caller then sees as [`StoreError::ActorDropped`].
pub struct MockStore<T: StoredRecord> {
    store: MemoryStore<T>,
    expectations: Queue<T>,
    lookups: Arc<Mutex<Vec<Lookup<T::Category>>>>,
    saved: Arc<Mutex<Vec<T>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoredRecord> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoredRecord> MockStore<T> {
    /// Creates a new mock store with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let lookups = Arc::new(Mutex::new(Vec::new()));
        let saved = Arc::new(Mutex::new(Vec::new()));

        let queue = expectations.clone();
        let seen = lookups.clone();
        let saves = saved.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (StoreRequest::Find { respond_to, .. }, Some(Expectation::Find(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::FindAll {
                            lookup,
                            page,
                            respond_to,
                        },
                        Some(Expectation::FindAll(response)),
                    ) => {
                        seen.lock().unwrap().push(lookup);
                        let _ = respond_to.send(response.map(|records| {
                            let total = records.len() as u64;
                            Page::new(records, page, total)
                        }));
                    }
                    (
                        StoreRequest::Save { record, respond_to },
                        Some(Expectation::Save(response)),
                    ) => {
                        let reply = response.map(|()| {
                            saves.lock().unwrap().push(record.clone());
                            record
                        });
                        let _ = respond_to.send(reply);
                    }
                    (
                        StoreRequest::Modify {
                            modifier,
                            respond_to,
                            ..
                        },
                        Some(Expectation::Modify(response)),
                    ) => {
                        let reply = response.map(|current| {
                            current.map(|record| {
                                let updated = modifier.apply(record);
                                saves.lock().unwrap().push(updated.clone());
                                updated
                            })
                        });
                        let _ = respond_to.send(reply);
                    }
                    (
                        StoreRequest::Exists { respond_to, .. },
                        Some(Expectation::Exists(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        panic!(
                            "Unexpected store request {:?}, expected {}",
                            request,
                            expectation.map_or("nothing", |e| e.name())
                        );
                    }
                }
            }
        });

        Self {
            store: MemoryStore::new(sender),
            expectations,
            lookups,
            saved,
            _handle: handle,
        }
    }

    /// Returns the store handle for use in tests.
    pub fn store(&self) -> MemoryStore<T> {
        self.store.clone()
    }

    pub fn expect_find(&mut self) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::Find)
    }

    pub fn expect_find_all(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::FindAll)
    }

    pub fn expect_save(&mut self) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::Save)
    }

    /// The value is the record currently stored under the id, or `None` for an unknown id.
    pub fn expect_modify(&mut self) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::Modify)
    }

    pub fn expect_exists(&mut self) -> ExpectationBuilder<T, bool> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::Exists)
    }

    pub fn expect_delete(&mut self) -> ExpectationBuilder<T, bool> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::Delete)
    }

    /// Every lookup received by `find_all`, in order.
    pub fn lookups(&self) -> Vec<Lookup<T::Category>> {
        self.lookups.lock().unwrap().clone()
    }

    /// Every record written by `save` or `modify`, in order.
    pub fn saved(&self) -> Vec<T> {
        self.saved.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: StoredRecord, R> {
    expectations: Queue<T>,
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
}

impl<T: StoredRecord, R> ExpectationBuilder<T, R> {
    fn new(expectations: Queue<T>, wrap: fn(Result<R, StoreError>) -> Expectation<T>) -> Self {
        Self { expectations, wrap }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Err(error)));
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a store handle and the receiver its requests arrive on.
pub fn create_mock_store<T: StoredRecord>(
    buffer_size: usize,
) -> (MemoryStore<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MemoryStore::new(sender), receiver)
}

/// Helper to verify that the next message is a Find request
pub async fn expect_find<T: StoredRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Find { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FindAll request
pub async fn expect_find_all<T: StoredRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(Lookup<T::Category>, PageRequest, Response<Page<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::FindAll {
            lookup,
            page,
            respond_to,
        }) => Some((lookup, page, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Save request
pub async fn expect_save<T: StoredRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Save { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Modify request
pub async fn expect_modify<T: StoredRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Modifier<T>, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Modify {
            id,
            modifier,
            respond_to,
        }) => Some((id, modifier, respond_to)),
        _ => None,
    }
}
