//! HTTP client module
//!
//! The transport every API call goes through.
//!
//! # Features
//!
//! - **Bearer Attachment**: the [`Session`](crate::session::Session) token is added to each request
//! - **Token Eviction**: a 401 clears the session and surfaces as `Error::Unauthorized`
//! - **Error Messages**: the `message` field of an error body is kept for display
//!
//! There is no automatic retry here. A failed request is reported once and
//! the caller decides whether to try again.

mod client;

pub use client::{ApiClient, RequestConfig};

#[cfg(test)]
mod tests;
