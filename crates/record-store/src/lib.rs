//! # Record Store
//!
//! Storage for the brewery catalog. This crate knows nothing about beers or customers; it keeps
//! any type that implements [`StoredRecord`] and answers a fixed set of queries about it.
//!
//! ## Architecture Overview
//!
//! 1. **Record Layer** ([`StoredRecord`]) - identity, business name and optional category
//! 2. **Contract Layer** ([`EntityStore`]) - the async find/save/delete interface services hold
//! 3. **Backend Layer** - two interchangeable implementations of that contract:
//!    - [`StoreActor`] + [`MemoryStore`]: a `HashMap` owned by a single Tokio task, reached by
//!      message passing
//!    - [`SqliteStore`]: a rusqlite table, reached through a mutex on the blocking pool
//!
//! Both backends sort by name then id, fold ASCII case for name filters and page the same way,
//! so the same data and the same query produce the same [`Page`] whichever one is running.
//!
//! ## Queries
//!
//! A query is one [`Lookup`] shape plus a [`PageRequest`]:
//!
//! ```rust
//! use record_store::{EntityStore, Lookup, PageRequest, StoreActor, StoredRecord};
//!
//! #[derive(Clone, Debug)]
//! struct Hop { id: u32, name: String, family: String }
//!
//! impl StoredRecord for Hop {
//!     type Id = u32;
//!     type Category = String;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn name(&self) -> &str { &self.name }
//!     fn category(&self) -> Option<&String> { Some(&self.family) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, store) = StoreActor::<Hop>::new(10);
//!     tokio::spawn(actor.run());
//!
//!     store.save(Hop { id: 1, name: "Citra".into(), family: "american".into() }).await.unwrap();
//!     store.save(Hop { id: 2, name: "Saaz".into(), family: "noble".into() }).await.unwrap();
//!
//!     let page = store
//!         .find_all(&Lookup::NameLike("CIT".into()), PageRequest::new(0, 25))
//!         .await
//!         .unwrap();
//!     assert_eq!(page.total_elements, 1);
//!     assert_eq!(page.content[0].name, "Citra");
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module provides a [`MemoryStore`] whose requests land in the test instead of in an
//! actor, for asserting exactly which queries a service issues and for injecting failures.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;
pub mod sqlite;
pub mod store;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::MemoryStore;
pub use entity::StoredRecord;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use query::{Lookup, Page, PageRequest};
pub use sqlite::{SharedConnection, SqlRecord, SqliteStore};
pub use store::{EntityStore, Modifier};
