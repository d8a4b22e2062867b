//! Session token storage

use reqwest::RequestBuilder;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Shared handle to the current session token
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Create a session with no token
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session holding `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    /// Current token, if any
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Replace the token (e.g. after login)
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Drop the token. Returns the evicted value.
    pub async fn clear(&self) -> Option<String> {
        let evicted = self.token.write().await.take();
        if evicted.is_some() {
            debug!("Session token cleared");
        }
        evicted
    }

    /// Check if a token is present
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Attach `Authorization: Bearer <token>` when a token is present
    pub async fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never print the token itself
        let present = self.token.try_read().map(|t| t.is_some()).ok();
        f.debug_struct("Session")
            .field("has_token", &present)
            .finish()
    }
}
