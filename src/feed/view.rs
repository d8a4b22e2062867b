//! Presentation of pagination state
//!
//! A pure mapping from [`PaginationState`] to what the screen should show.
//! Renderers match on [`FeedView`] and never look at the raw flags.

use super::state::{FeedErrorKind, PaginationState};
use crate::types::FeedItem;

/// Title for a feed with no posts
pub const EMPTY_FEED_TITLE: &str = "No posts yet";

/// Hint for a feed with no posts
pub const EMPTY_FEED_HINT: &str = "Follow some users or create your first post to get started!";

/// Footer once the feed is exhausted
pub const END_OF_FEED: &str = "You've reached the end!";

/// What to render for a feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView {
    /// First page is on its way, nothing to show yet
    Loading,
    /// First load failed; full-page error with a retry action
    InitialLoadError {
        /// Message to show
        message: String,
    },
    /// Loaded, and there is nothing in the feed
    Empty,
    /// Posts to show
    Feed {
        /// Posts in display order
        items: Vec<FeedItem>,
        /// Show a spinner below the posts
        loading: bool,
        /// Inline error after a failed "load more"
        banner: Option<String>,
        /// Show the end-of-feed footer
        end_reached: bool,
    },
}

impl FeedView {
    /// Derive the view for `state`
    pub fn from_state(state: &PaginationState) -> Self {
        if let (Some(FeedErrorKind::InitialLoad), Some(error)) = (state.error_kind(), &state.error) {
            return Self::InitialLoadError {
                message: error.message.clone(),
            };
        }

        if state.items.is_empty() {
            return if state.loading {
                Self::Loading
            } else {
                Self::Empty
            };
        }

        Self::Feed {
            items: state.items.clone(),
            loading: state.loading,
            banner: state.error.as_ref().map(|e| e.message.clone()),
            end_reached: state.exhausted,
        }
    }

    /// Check if a retry button belongs on screen
    pub fn offers_retry(&self) -> bool {
        matches!(self, Self::InitialLoadError { .. })
            || matches!(self, Self::Feed { banner: Some(_), .. })
    }
}

impl From<&PaginationState> for FeedView {
    fn from(state: &PaginationState) -> Self {
        Self::from_state(state)
    }
}
