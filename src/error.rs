//! Error types for the MiniSocial feed client
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! The feed controller never sees these directly; it works with the
//! narrower [`FetchError`](crate::feed::FetchError) descriptor.

use thiserror::Error;

/// The main error type for the feed client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Unauthorized: {}", message.as_deref().unwrap_or("session token rejected"))]
    Unauthorized { message: Option<String> },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    HttpStatus {
        status: u16,
        message: Option<String>,
    },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, message: Option<String>) -> Self {
        Self::HttpStatus { status, message }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Server-supplied message meant for display, if the server sent one
    pub fn display_message(&self) -> Option<&str> {
        match self {
            Error::HttpStatus { message, .. } | Error::Unauthorized { message } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// HTTP status associated with this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Unauthorized { .. } => Some(401),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the session was rejected by the server
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized { .. })
    }
}

/// Result type alias for the feed client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("base_url");
        assert_eq!(err.to_string(), "Missing required config field: base_url");

        let err = Error::http_status(404, Some("Not found".to_string()));
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::http_status(502, None);
        assert_eq!(err.to_string(), "HTTP 502: no message");
    }

    #[test]
    fn test_display_message() {
        let err = Error::http_status(500, Some("Database unavailable".to_string()));
        assert_eq!(err.display_message(), Some("Database unavailable"));

        let err = Error::Unauthorized {
            message: Some("Invalid or expired token".to_string()),
        };
        assert_eq!(err.display_message(), Some("Invalid or expired token"));

        assert_eq!(Error::http_status(500, None).display_message(), None);
        assert_eq!(Error::Timeout { timeout_ms: 10 }.display_message(), None);
        assert_eq!(Error::config("bad").display_message(), None);
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::http_status(503, None).status(), Some(503));
        assert_eq!(Error::Unauthorized { message: None }.status(), Some(401));
        assert_eq!(Error::decode("bad body").status(), None);
        assert!(Error::Unauthorized { message: None }.is_unauthorized());
        assert!(!Error::http_status(403, None).is_unauthorized());
    }
}
