//! Page fetcher
//!
//! One call, one page. Fetchers never touch controller state, which keeps
//! them trivial to fake in tests.

use crate::error::Error;
use crate::http::{ApiClient, RequestConfig};
use crate::types::{FeedResponse, Page};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Fallback shown when the server gives no message
pub const DEFAULT_FETCH_ERROR_MESSAGE: &str = "Failed to load feed";

/// Feed endpoint path
pub const FEED_PATH: &str = "/feed";

/// Why a page could not be fetched
///
/// Only `message` is meant for display. The controller never branches on
/// the cause.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    /// User-displayable message
    pub message: String,
    /// HTTP status, when the failure came from a response
    pub status: Option<u16>,
}

impl FetchError {
    /// Create a fetch error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Attach an HTTP status
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// The message to display
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for FetchError {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_ERROR_MESSAGE)
    }
}

impl From<Error> for FetchError {
    fn from(err: Error) -> Self {
        Self {
            message: err
                .display_message()
                .unwrap_or(DEFAULT_FETCH_ERROR_MESSAGE)
                .to_string(),
            status: err.status(),
        }
    }
}

/// Source of feed pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch page `page_index` (0-based) holding up to `page_size` posts
    async fn fetch_page(&self, page_index: u32, page_size: u32) -> Result<Page, FetchError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch_page(&self, page_index: u32, page_size: u32) -> Result<Page, FetchError> {
        (**self).fetch_page(page_index, page_size).await
    }
}

/// Fetches pages from `GET /feed?page=N&size=M`
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: ApiClient,
}

impl HttpPageFetcher {
    /// Create a fetcher for `client`
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, page_index: u32, page_size: u32) -> Result<Page, FetchError> {
        let request = RequestConfig::new()
            .query("page", page_index)
            .query("size", page_size);

        let response: FeedResponse = self.client.get_json(FEED_PATH, request).await?;
        debug!(
            page = page_index,
            size = page_size,
            received = response.items.len(),
            "Fetched feed page"
        );
        Ok(Page::from(response))
    }
}
