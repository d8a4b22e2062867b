//! Feed module
//!
//! Incremental, scroll-driven loading of the home feed.
//!
//! # Overview
//!
//! ```text
//! load_next() ──► PaginationController ──► PageFetcher ──► merge_into ──► PaginationState
//!                         │                                                   │
//!                         └──────────── watch::Sender ◄───────────────────────┘
//!                                            │
//!                                   subscribe() / FeedView
//! ```
//!
//! - `PageFetcher` - one request for one page, no state
//! - `merge` / `merge_into` - append new posts, drop ones already shown
//! - `PaginationController` - cursor, loading/error/exhaustion flags, single-flight
//! - `FeedView` - what a renderer should show for a given state

mod controller;
mod fetcher;
mod merge;
mod state;
mod view;

pub use controller::{LoadOutcome, PaginationController, Seed, SkipReason};
pub use fetcher::{FetchError, HttpPageFetcher, PageFetcher, DEFAULT_FETCH_ERROR_MESSAGE, FEED_PATH};
pub use merge::{merge, merge_into, MergeStats};
pub use state::{FeedErrorKind, PaginationState};
pub use view::{FeedView, EMPTY_FEED_HINT, EMPTY_FEED_TITLE, END_OF_FEED};
