//! Pagination state
//!
//! Snapshot of everything a feed view needs. The controller is the only
//! writer; everybody else gets clones.

use super::fetcher::FetchError;
use crate::types::FeedItem;

/// Which error view applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedErrorKind {
    /// Nothing loaded yet and the first fetch failed (full-page error)
    InitialLoad,
    /// Posts are shown and loading more failed (inline banner)
    Pagination,
}

/// Full state of one feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Accumulated posts, first-seen order, unique by post id
    pub items: Vec<FeedItem>,
    /// Next page index to request
    pub cursor: u32,
    /// A fetch is outstanding
    pub loading: bool,
    /// No more pages upstream. Permanent once set.
    pub exhausted: bool,
    /// Failure of the most recent attempt
    pub error: Option<FetchError>,
}

impl PaginationState {
    /// Create an empty state at cursor 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of posts loaded
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if no posts are loaded
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Classify the current error, if any
    pub fn error_kind(&self) -> Option<FeedErrorKind> {
        self.error.as_ref().map(|_| {
            if self.items.is_empty() {
                FeedErrorKind::InitialLoad
            } else {
                FeedErrorKind::Pagination
            }
        })
    }

    /// Check if `load_next` would issue a request right now
    pub fn can_load_more(&self) -> bool {
        !self.loading && !self.exhausted
    }
}
