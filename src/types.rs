//! Common types used throughout the feed client
//!
//! Wire records for the `/feed` endpoint and the immutable [`Page`]
//! the rest of the crate passes around.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// Post identifier, stable across pages
pub type PostId = i64;

/// Author (user) identifier
pub type UserId = i64;

// ============================================================================
// Wire Types
// ============================================================================

/// One post as it appears in a feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Unique post identifier
    pub post_id: PostId,
    /// Author of the post
    pub author_id: UserId,
    /// Post body
    pub content: String,
    /// Optional attached image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Body of a successful `GET /feed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedResponse {
    /// Posts on this page, newest first
    #[serde(default)]
    pub items: Vec<FeedItem>,
    /// Page index echoed by the server
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size echoed by the server
    #[serde(default)]
    pub size: Option<u32>,
}

/// Body of a failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short error class (e.g. "Unauthorized")
    #[serde(default)]
    pub error: Option<String>,
    /// Human readable message, shown verbatim
    #[serde(default)]
    pub message: Option<String>,
    /// Server timestamp
    #[serde(default)]
    pub timestamp: Option<String>,
}

// ============================================================================
// Page
// ============================================================================

/// Result of one fetch. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    items: Vec<FeedItem>,
    page: Option<u32>,
    size: Option<u32>,
}

impl Page {
    /// Create a page from items alone
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self {
            items,
            page: None,
            size: None,
        }
    }

    /// Items in display order
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    /// Number of items on the page
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Check if the page carried no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Page index the server reported, if any
    pub fn page_index(&self) -> Option<u32> {
        self.page
    }

    /// Page size the server reported, if any
    pub fn page_size(&self) -> Option<u32> {
        self.size
    }
}

impl From<FeedResponse> for Page {
    fn from(response: FeedResponse) -> Self {
        Self {
            items: response.items,
            page: response.page,
            size: response.size,
        }
    }
}

impl From<Vec<FeedItem>> for Page {
    fn from(items: Vec<FeedItem>) -> Self {
        Self::new(items)
    }
}
