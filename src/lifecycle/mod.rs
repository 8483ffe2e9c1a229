//! # System Lifecycle
//!
//! Starting, seeding and stopping the catalog.
//!
//! ## The CatalogSystem Pattern
//!
//! [`CatalogSystem`] is the one place that knows which backend is running:
//!
//! 1. **Backend Selection** - [`CatalogConfig`](crate::config::CatalogConfig) names the backend;
//!    `start` builds the matching stores
//! 2. **Service Wiring** - each service receives an `Arc<dyn EntityStore<_>>`
//! 3. **Seeding** - `seed` fills empty stores with the sample catalog
//! 4. **Graceful Shutdown** - `shutdown` drops the services and awaits the store actors
//!
//! ## Graceful Shutdown
//!
//! For the memory backend:
//!
//! 1. **Drop all services** - closes the sender side of each store channel
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Actors log their final size** and return
//! 4. **Await completion** - the join handles are awaited
//!
//! The SQLite backend has no tasks to wait for; dropping the last store closes the connection.
//!
//! ## Observability
//!
//! [`setup_tracing`] initializes structured logging. See the [`tracing`](self::tracing) module for what is
//! logged at which level.

pub mod catalog_system;
pub mod error;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use catalog_system::*;
pub use error::*;
