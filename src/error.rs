//! Error types for the catalog client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == API Error Enum ==
/// Failure of a gateway operation. Every variant is surfaced to the caller;
/// none of them is retried or cached.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing credential or unusable base URL
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No response within the request timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The request failed before a complete successful response was read
    #[error("Transport error: {0}")]
    Transport(String),

    /// HTTP 401, the credential was rejected
    #[error("Unauthorized: invalid API credential")]
    Unauthorized,

    /// HTTP 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 429
    #[error("Rate limited by the remote service")]
    RateLimited,

    /// Any other non-2xx status
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// 2xx with an empty body, invalid JSON, or a body of the wrong shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    /// Returns the HTTP status behind this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::NotFound(_) => Some(404),
            ApiError::RateLimited => Some(429),
            ApiError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// == Storage Error Enum ==
/// Failure of the local key/value storage backing favorites and the cache
/// snapshot.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing would exceed the storage quota
    #[error("Storage quota exceeded writing {key}: {needed} bytes, quota {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// == Result Type Alias ==
/// Convenience Result type for gateway operations.
pub type Result<T> = std::result::Result<T, ApiError>;
