//! # Merge Engine
//!
//! Pure functions that turn an existing record plus a payload into the next version of that
//! record. Nothing here touches a store: the service hands these to the store as a
//! [`Modifier`](record_store::Modifier), which applies them to the stored record in one step.
//!
//! Both operations keep `id` and `created_date`, and advance `version` and `update_date` exactly
//! once per call, even when the payload changes nothing.

use crate::resource::Resource;
use chrono::{DateTime, Utc};

/// `true` when the string has at least one non-whitespace character.
pub fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Applies a partial update: only fields present in the patch are overwritten.
pub fn merge<T: Resource>(mut existing: T, patch: T::Patch, now: DateTime<Utc>) -> T {
    existing.patch_fields(patch);
    existing.touch(now);
    existing
}

/// Applies a full update: every business field is overwritten.
pub fn replace<T: Resource>(mut existing: T, update: T::Update, now: DateTime<Utc>) -> T {
    existing.replace_fields(update);
    existing.touch(now);
    existing
}
