//! # Resource Trait
//!
//! The `Resource` trait is the contract a catalog record (Beer, Customer, …) implements so that the
//! generic [`ResourceService`](crate::service::ResourceService) can create, replace and patch it.
//!
//! # Architecture Note
//! [`StoredRecord`] says what a store needs to know about a record. `Resource` adds what the
//! service needs: the three payload types and the hooks that copy them onto a record. The
//! merge rules themselves live in [`crate::merge`], so every resource advances its version and
//! `update_date` the same way.
//!
//! We use associated types for the payloads: a `Beer` service only accepts a `BeerPatch`, and you
//! can't accidentally send it a `CustomerPatch`.

use chrono::{DateTime, Utc};
use record_store::StoredRecord;
use std::fmt::Debug;
use uuid::Uuid;

pub trait Resource: StoredRecord<Id = Uuid> {
    /// Short lowercase name used in logs and location paths (e.g. `"beer"`).
    const KIND: &'static str;

    /// Full payload without an id.
    type Create: Send + Sync + Debug + 'static;

    /// Full payload for replace: every business field overwrites.
    type Update: Send + Sync + Debug + 'static;

    /// Partial payload: absent fields are left alone.
    type Patch: Send + Sync + Debug + 'static;

    /// Build a brand-new record. `id`, timestamps and version are stamped here, never taken from
    /// the payload.
    fn from_create(id: Uuid, params: Self::Create, now: DateTime<Utc>) -> Self;

    /// Overwrite every business field from `update`.
    fn replace_fields(&mut self, update: Self::Update);

    /// Overwrite the business fields present in `patch`. Blank strings count as absent.
    fn patch_fields(&mut self, patch: Self::Patch);

    /// Record one mutation: bump the version and set `update_date`.
    fn touch(&mut self, now: DateTime<Utc>);

    /// Hide inventory from a copy handed to a caller. Resources without inventory keep the
    /// default no-op.
    fn redact_inventory(&mut self) {}
}
