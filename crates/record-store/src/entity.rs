//! # StoredRecord Trait
//!
//! The `StoredRecord` trait is the contract every resource (Beer, Customer, …) satisfies so that
//! any [`EntityStore`](crate::EntityStore) backend can hold it. It exposes exactly what the stores
//! need to answer the four lookup shapes: an identity, the business name used for sorting and
//! substring search, and an optional category used for equality filtering.
//!
//! # Architecture Note
//! The stores never interpret business fields beyond these three accessors. Merging, stamping
//! timestamps and advancing versions all happen in the service layer above, so a backend only has
//! to store and return whole records.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record must implement to be kept by an [`EntityStore`](crate::EntityStore).
///
/// We use associated types to keep the stores type-safe: a `Beer` store answers
/// `Lookup<BeerStyle>` queries and you can't accidentally ask it for a customer category.
pub trait StoredRecord: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier (e.g. `Uuid`).
    ///
    /// `Ord` is used as the tie-breaker when two records share a name, so that every backend
    /// returns the same order for the same data.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug;

    /// The category filtered by equality (e.g. a beer style). Use `()` for resources
    /// without one.
    type Category: PartialEq + Clone + Send + Sync + Debug;

    /// The record's identity.
    fn id(&self) -> &Self::Id;

    /// The business name. Results are always sorted by this, ascending.
    fn name(&self) -> &str;

    /// The record's category, if the resource has one.
    fn category(&self) -> Option<&Self::Category>;
}
