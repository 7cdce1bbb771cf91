//! Error types for locale synchronization.
//!
//! Two families of errors exist:
//!
//! - [`TranslateError`] is raised by a translation provider for a single
//!   value. The synchronizer recovers from it by keeping the source value.
//! - [`SyncError`] covers filesystem and input problems. It is never recovered
//!   locally and aborts the whole run.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure to translate a single value.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The provider answered with a non-success HTTP status.
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The provider rejected the request because of rate limiting.
    #[error("{provider} rate limit exceeded (429)")]
    RateLimited {
        provider: &'static str,
        retry_after: Option<Duration>,
    },

    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("Failed to send request to {provider}: {source}")]
    Network {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered but the body could not be understood.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },
}

impl TranslateError {
    /// Whether another attempt could succeed.
    ///
    /// Network failures, rate limits and 5xx responses are transient. Other
    /// 4xx responses (bad request, invalid key, unsupported language) are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslateError::Api { status, .. } => *status >= 500,
            TranslateError::RateLimited { .. } => true,
            TranslateError::Network { .. } => true,
            TranslateError::InvalidResponse { .. } => true,
        }
    }

    /// Minimum wait the provider asked for before the next request.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            TranslateError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Fatal error that aborts a synchronization run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to read source directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read resource file {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source file is not a JSON object.
    #[error("Malformed resource file {path:?}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write resource file {path:?}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize resource file {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
