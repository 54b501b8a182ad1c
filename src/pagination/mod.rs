//! Forward-only pagination over the history log.
//!
//! Page 1 starts at index 0 of the log. Loading more advances the page number and
//! yields only the newly fetched slice; the caller appends it to what is already
//! loaded, so the loaded prefix always has `min(page_number * page_size, len)` entries.

use serde::{Deserialize, Serialize};

/// Default number of entries fetched per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// How `has_more` is decided after a fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HasMorePolicy {
    /// More is assumed whenever the last fetched slice was a full page. At an exact
    /// multiple of the page size this offers one extra, empty load.
    #[default]
    LastSliceFull,
    /// More exists only while the loaded prefix is shorter than the log
    RemainingEntries,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page_number: usize,
    has_more: bool,
    policy: HasMorePolicy,
}

impl Paginator {
    /// A page size of 0 is treated as 1
    pub fn new(page_size: usize) -> Self {
        Self::with_policy(page_size, HasMorePolicy::default())
    }

    pub fn with_policy(page_size: usize, policy: HasMorePolicy) -> Self {
        Self { page_size: page_size.max(1), page_number: 1, has_more: false, policy }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn policy(&self) -> HasMorePolicy {
        self.policy
    }

    /// Back to page 1. `has_more` is recomputed by the next fetch.
    pub fn reset(&mut self) {
        self.page_number = 1;
        self.has_more = false;
    }

    /// Number of entries covered by pages `1..=page_number`
    pub fn loaded_len(&self, total: usize) -> usize {
        self.page_number.saturating_mul(self.page_size).min(total)
    }

    /// The slice for the current page, updating `has_more`
    pub fn current_page<'a, T>(&mut self, log: &'a [T]) -> &'a [T] {
        let start = (self.page_number - 1).saturating_mul(self.page_size).min(log.len());
        let end = self.page_number.saturating_mul(self.page_size).min(log.len());
        let slice = &log[start..end];

        self.has_more = match self.policy {
            HasMorePolicy::LastSliceFull => slice.len() >= self.page_size,
            HasMorePolicy::RemainingEntries => end < log.len(),
        };
        slice
    }

    /// Advance one page and return only the new page's slice
    pub fn load_more<'a, T>(&mut self, log: &'a [T]) -> &'a [T] {
        self.page_number += 1;
        self.current_page(log)
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
