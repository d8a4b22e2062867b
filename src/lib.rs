// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # MiniSocial Feed Client
//!
//! Incremental, scroll-driven loading of the MiniSocial home feed.
//!
//! ## Features
//!
//! - **Page-at-a-time loading**: `GET /feed?page=N&size=M`, one page per scroll
//! - **Single-flight**: overlapping scroll events never issue overlapping requests
//! - **De-duplication**: posts already on screen are never shown twice
//! - **Exhaustion**: a short or empty page ends the feed for good
//! - **Seeding**: hand over a first page fetched elsewhere, skipping the initial request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use minisocial_feed::{ApiClient, ClientConfig, HttpPageFetcher, PaginationController, Session};
//!
//! #[tokio::main]
//! async fn main() -> minisocial_feed::Result<()> {
//!     let config = ClientConfig::default().with_env_overrides()?;
//!     let page_size = config.page_size;
//!     let client = ApiClient::new(config, Session::with_token("..."))?;
//!
//!     let controller = PaginationController::new(HttpPageFetcher::new(client), page_size)?;
//!     controller.initialize(None).await;
//!     controller.load_next().await;
//!
//!     println!("{:?}", controller.view());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  visible   ┌──────────────────────┐  page, size  ┌────────────────┐
//! │ ScrollTrigger│ ─────────► │ PaginationController │ ───────────► │ HttpPageFetcher│
//! └──────────────┘            └──────────┬───────────┘              └───────┬────────┘
//!                                        │ watch                            │
//!                                        ▼                                  ▼
//!                                  FeedView / subscribers         ApiClient + Session
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the feed client
pub mod error;

/// Wire types and pages
pub mod types;

/// Client configuration
pub mod config;

/// Session token handling
pub mod session;

/// HTTP transport
pub mod http;

/// Pagination controller and feed state
pub mod feed;

/// Scroll-driven load triggering
pub mod scroll;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ClientConfig;
pub use feed::{FeedView, FetchError, HttpPageFetcher, LoadOutcome, PageFetcher, PaginationController, PaginationState, Seed};
pub use http::ApiClient;
pub use scroll::{ManualVisibility, ScrollTrigger, Sentinel, VisibilitySource};
pub use session::Session;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
