//! Pagination controller
//!
//! Owns the cursor and the accumulated posts for one feed view and
//! sequences every fetch.
//!
//! State lives in a `tokio::sync::watch` sender. Every transition is a
//! single `send_if_modified` call, so the single-flight check and the
//! `loading = true` write happen under one lock before the first await,
//! and observers see each outcome (items, cursor, flags) as one update.

use super::fetcher::{FetchError, PageFetcher};
use super::merge::{merge_into, MergeStats};
use super::state::PaginationState;
use super::view::FeedView;
use crate::error::{Error, Result};
use crate::types::Page;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// State handed over from an out-of-band first fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// First page was already fetched (e.g. during server-side rendering)
    Page(Page),
    /// The out-of-band first fetch failed
    Error(FetchError),
}

/// Why `load_next` did not issue a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another fetch is outstanding
    InFlight,
    /// The feed has no more pages
    Exhausted,
    /// The controller was torn down
    TornDown,
    /// `initialize` already ran, or a load started before it
    AlreadyInitialized,
}

/// Result of a load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Page merged into the feed
    Loaded {
        /// Index of the page that was merged
        page_index: u32,
        /// Posts appended
        appended: usize,
        /// Posts dropped as already shown
        duplicates: usize,
        /// This page ended the feed
        exhausted: bool,
    },
    /// Fetch failed; the same page will be requested next time
    Failed(FetchError),
    /// No request was made
    Skipped(SkipReason),
    /// A result arrived after teardown and was dropped
    Discarded,
}

impl LoadOutcome {
    /// Check if a page was merged
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Check if no request was made
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

struct Inner<F> {
    fetcher: F,
    page_size: u32,
    state: watch::Sender<PaginationState>,
    active: AtomicBool,
    // set by the first initialize() or load_next(); seeding is one-shot
    initialized: AtomicBool,
}

/// Drives incremental loading of one feed
///
/// Clones are handles to the same feed.
pub struct PaginationController<F> {
    inner: Arc<Inner<F>>,
}

impl<F> Clone for PaginationController<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: PageFetcher> PaginationController<F> {
    /// Create a controller requesting `page_size` posts per page
    pub fn new(fetcher: F, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }

        let (state, _) = watch::channel(PaginationState::new());
        Ok(Self {
            inner: Arc::new(Inner {
                fetcher,
                page_size,
                state,
                active: AtomicBool::new(true),
                initialized: AtomicBool::new(false),
            }),
        })
    }

    /// Posts requested per page
    pub fn page_size(&self) -> u32 {
        self.inner.page_size
    }

    /// Set up the feed, optionally from an out-of-band first fetch
    ///
    /// - `Seed::Page`: posts are shown, cursor starts at 1, and a short page
    ///   marks the feed exhausted.
    /// - `Seed::Error`: nothing is shown and the error is kept for display.
    /// - `None`: the first page is fetched now, at cursor 0.
    ///
    /// One-shot: once the feed was initialized, or a load has started, later
    /// calls return `Skipped(AlreadyInitialized)` and leave state alone.
    pub async fn initialize(&self, seed: Option<Seed>) -> LoadOutcome {
        let page_size = self.inner.page_size;
        let mut outcome = LoadOutcome::Skipped(SkipReason::TornDown);
        let mut fetch_now = false;

        self.inner.state.send_if_modified(|state| {
            if !self.inner.active.load(Ordering::SeqCst) {
                return false;
            }
            if self.inner.initialized.swap(true, Ordering::SeqCst) {
                outcome = LoadOutcome::Skipped(SkipReason::AlreadyInitialized);
                return false;
            }

            let mut next = PaginationState::new();
            match seed {
                Some(Seed::Page(page)) => {
                    let stats = merge_into(&mut next.items, page.items());
                    next.cursor = 1;
                    next.exhausted = is_last_page(&page, page_size);
                    debug!(
                        received = page.count(),
                        appended = stats.appended,
                        exhausted = next.exhausted,
                        "Seeded feed from first page"
                    );
                    outcome = loaded(0, stats, next.exhausted);
                }
                Some(Seed::Error(error)) => {
                    debug!(error = %error, "Seeded feed with first-load error");
                    next.error = Some(error.clone());
                    outcome = LoadOutcome::Failed(error);
                }
                None => fetch_now = true,
            }
            *state = next;
            true
        });

        if fetch_now {
            return self.load_next().await;
        }
        outcome
    }

    /// Fetch the next page unless one is in flight or the feed is exhausted
    ///
    /// On success the page is merged, the cursor advances by one, and a short
    /// or empty page marks the feed exhausted. On failure items and cursor are
    /// left alone, so the next call asks for the same page again.
    pub async fn load_next(&self) -> LoadOutcome {
        let mut claim = Err(SkipReason::TornDown);

        self.inner.state.send_if_modified(|state| {
            if !self.inner.active.load(Ordering::SeqCst) {
                return false;
            }
            self.inner.initialized.store(true, Ordering::SeqCst);
            if state.loading {
                claim = Err(SkipReason::InFlight);
                return false;
            }
            if state.exhausted {
                claim = Err(SkipReason::Exhausted);
                return false;
            }
            state.loading = true;
            state.error = None;
            claim = Ok(state.cursor);
            true
        });

        let page_index = match claim {
            Ok(claim) => claim,
            Err(reason) => {
                debug!(?reason, "Skipping feed load");
                return LoadOutcome::Skipped(reason);
            }
        };

        let page_size = self.inner.page_size;
        debug!(page = page_index, size = page_size, "Loading feed page");
        let result = self.inner.fetcher.fetch_page(page_index, page_size).await;

        let mut outcome = LoadOutcome::Discarded;
        self.inner.state.send_if_modified(|state| {
            if !self.inner.active.load(Ordering::SeqCst) {
                return false;
            }

            match result {
                Ok(page) => {
                    let stats = merge_into(&mut state.items, page.items());
                    state.cursor += 1;
                    if is_last_page(&page, page_size) {
                        state.exhausted = true;
                        info!(
                            page = page_index,
                            total = state.items.len(),
                            "Reached end of feed"
                        );
                    }
                    debug!(
                        page = page_index,
                        received = page.count(),
                        appended = stats.appended,
                        duplicates = stats.duplicates,
                        "Merged feed page"
                    );
                    outcome = loaded(page_index, stats, state.exhausted);
                }
                Err(error) => {
                    warn!(page = page_index, error = %error, "Failed to load feed page");
                    state.error = Some(error.clone());
                    outcome = LoadOutcome::Failed(error);
                }
            }

            state.loading = false;
            true
        });

        if outcome == LoadOutcome::Discarded {
            debug!(page = page_index, "Dropping feed result for inactive controller");
        }
        outcome
    }

    /// Try again after a failure
    ///
    /// Same as `load_next`, which clears the error as it starts. Kept separate
    /// so callers can tell a user-initiated retry from a scroll event.
    pub async fn retry(&self) -> LoadOutcome {
        debug!("Retrying feed load");
        self.load_next().await
    }

    /// Current state snapshot
    pub fn state(&self) -> PaginationState {
        self.inner.state.borrow().clone()
    }

    /// Current view
    pub fn view(&self) -> FeedView {
        FeedView::from_state(&self.inner.state.borrow())
    }

    /// Receive a notification on every state change
    pub fn subscribe(&self) -> watch::Receiver<PaginationState> {
        self.inner.state.subscribe()
    }

    /// Stop the controller. Later loads are skipped and pending results dropped.
    pub fn teardown(&self) {
        // taken under the state lock so it orders against in-progress writes
        self.inner.state.send_if_modified(|_| {
            self.inner.active.store(false, Ordering::SeqCst);
            false
        });
        debug!("Feed controller torn down");
    }

    /// Check if the controller still accepts updates
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }
}

impl<F> std::fmt::Debug for PaginationController<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController")
            .field("page_size", &self.inner.page_size)
            .field("active", &self.inner.active.load(Ordering::SeqCst))
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

/// A short or empty page ends the feed. A full page never does.
fn is_last_page(page: &Page, page_size: u32) -> bool {
    page.is_empty() || page.count() < page_size as usize
}

fn loaded(page_index: u32, stats: MergeStats, exhausted: bool) -> LoadOutcome {
    LoadOutcome::Loaded {
        page_index,
        appended: stats.appended,
        duplicates: stats.duplicates,
        exhausted,
    }
}
