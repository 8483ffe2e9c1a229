//! # Lookups & Pages
//!
//! The query vocabulary shared by every backend: the four fixed [`Lookup`] shapes, the
//! already-normalized [`PageRequest`] and the [`Page`] slice that comes back.
//!
//! Ordering is not part of the request. Every backend sorts by business name ascending and breaks
//! ties by id ascending; [`sort_records`] is the reference implementation of that order.

use crate::entity::StoredRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The four query shapes a store understands. A caller picks exactly one per query.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<C> {
    /// Every record.
    All,
    /// Records whose name contains the needle, ignoring ASCII case.
    NameLike(String),
    /// Records whose category equals the value.
    CategoryEq(C),
    /// Records satisfying both the name and category predicates.
    NameLikeAndCategory(String, C),
}

impl<C: PartialEq> Lookup<C> {
    /// Evaluates this lookup against a single record.
    ///
    /// Used by the in-memory backend. The SQL backend expresses the same predicates in its
    /// `WHERE` clause.
    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: StoredRecord<Category = C>,
    {
        match self {
            Lookup::All => true,
            Lookup::NameLike(needle) => name_contains(record.name(), needle),
            Lookup::CategoryEq(category) => record.category() == Some(category),
            Lookup::NameLikeAndCategory(needle, category) => {
                record.category() == Some(category) && name_contains(record.name(), needle)
            }
        }
    }

    /// Short label for logs.
    pub fn shape(&self) -> &'static str {
        match self {
            Lookup::All => "all",
            Lookup::NameLike(_) => "name_like",
            Lookup::CategoryEq(_) => "category_eq",
            Lookup::NameLikeAndCategory(_, _) => "name_like_and_category",
        }
    }
}

/// Case-insensitive substring match.
///
/// Only ASCII letters are folded, matching SQLite's `lower()`.
pub fn name_contains(name: &str, needle: &str) -> bool {
    name.to_ascii_lowercase().contains(&needle.to_ascii_lowercase())
}

/// A normalized page request: a 0-based page index and a page size of at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    index: u32,
    size: u32,
}

impl PageRequest {
    /// Creates a request. A zero size is bumped to one so a page is never empty by construction.
    pub fn new(index: u32, size: u32) -> Self {
        Self {
            index,
            size: size.max(1),
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of records to skip before this page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.index) * u64::from(self.size)
    }
}

/// A bounded, ordered slice of a larger result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// 0-based page index.
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.index(),
            size: request.size(),
            total_elements,
        }
    }

    /// Cuts the requested page out of an already sorted, already filtered result set.
    pub fn from_sorted(sorted: Vec<T>, request: PageRequest) -> Self {
        let total_elements = sorted.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = sorted
            .into_iter()
            .skip(skip)
            .take(request.size() as usize)
            .collect();
        Self::new(content, request, total_elements)
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.number) + 1 >= self.total_pages()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.content.iter_mut()
    }

    /// Converts the content while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

/// Sorts records by name ascending, then id ascending.
pub fn sort_records<T: StoredRecord>(records: &mut [T]) {
    records.sort_by(compare_records);
}

fn compare_records<T: StoredRecord>(a: &T, b: &T) -> Ordering {
    a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id()))
}
