//! # Filter Dispatcher
//!
//! Picks exactly one [`Lookup`] shape from the filters a caller populated, and applies the
//! inventory visibility flag to the page that comes back.

use crate::merge::has_text;
use crate::resource::Resource;
use record_store::{Lookup, Page};

/// Optional list filters, as a transport layer would receive them.
#[derive(Debug, Clone, PartialEq)]
pub struct ListFilter<C> {
    /// Substring of the business name. Blank text counts as absent.
    pub name: Option<String>,
    pub category: Option<C>,
    /// `Some(false)` hides inventory in the returned records.
    pub show_inventory: Option<bool>,
}

impl<C> Default for ListFilter<C> {
    fn default() -> Self {
        Self {
            name: None,
            category: None,
            show_inventory: None,
        }
    }
}

impl<C> ListFilter<C> {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn by_category(category: C) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn show_inventory(mut self, show: bool) -> Self {
        self.show_inventory = Some(show);
        self
    }
}

/// Maps the populated filters onto one of the four lookup shapes.
pub fn select_lookup<C>(name: Option<String>, category: Option<C>) -> Lookup<C> {
    let name = name.filter(|n| has_text(n));
    match (name, category) {
        (None, None) => Lookup::All,
        (Some(name), None) => Lookup::NameLike(name),
        (None, Some(category)) => Lookup::CategoryEq(category),
        (Some(name), Some(category)) => Lookup::NameLikeAndCategory(name, category),
    }
}

/// Redacts inventory from every record when `show_inventory` is `Some(false)`.
///
/// The page is a copy of what the store returned, so stored records are never affected.
pub fn apply_visibility<T: Resource>(mut page: Page<T>, show_inventory: Option<bool>) -> Page<T> {
    if show_inventory == Some(false) {
        page.iter_mut().for_each(T::redact_inventory);
    }
    page
}
