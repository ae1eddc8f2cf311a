//! Case-insensitive name filter for listings.
//!
//! Filtering only decides which rows are visible. The listing itself is
//! never modified, so clearing the needle brings every row back.

use serde::{Deserialize, Serialize};

use crate::listing::ListEntry;

/// Compute visibility flags for `names` against `needle`.
///
/// A row is visible when its name contains `needle` as a case-insensitive
/// substring. An empty needle shows every row.
pub fn apply_filter<S: AsRef<str>>(names: &[S], needle: &str) -> Vec<bool> {
    let view = FilterView::new(needle);
    names.iter().map(|n| view.matches(n.as_ref())).collect()
}

/// A per-pane filter predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterView {
    /// Lowercased needle.
    needle: String,
}

impl FilterView {
    /// Create a filter from user input.
    pub fn new(needle: &str) -> Self {
        Self {
            needle: needle.to_lowercase(),
        }
    }

    /// The lowercased needle.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Check if the filter hides nothing.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Replace the needle.
    pub fn set_needle(&mut self, needle: &str) {
        self.needle = needle.to_lowercase();
    }

    /// Check a single name.
    pub fn matches(&self, name: &str) -> bool {
        self.needle.is_empty() || name.to_lowercase().contains(&self.needle)
    }

    /// Visibility flag per listing row.
    pub fn apply(&self, listing: &[ListEntry]) -> Vec<bool> {
        listing.iter().map(|e| self.matches(&e.name)).collect()
    }

    /// Indices of the visible rows, in listing order.
    pub fn visible(&self, listing: &[ListEntry]) -> Vec<usize> {
        listing
            .iter()
            .enumerate()
            .filter(|(_, e)| self.matches(&e.name))
            .map(|(i, _)| i)
            .collect()
    }
}
