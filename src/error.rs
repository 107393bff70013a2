//! Error types for the Streamr client.
//!
//! Every fallible operation in this crate returns [`Result`], whose error type is
//! [`StreamrError`]. Errors are never recovered from internally: there is no retry or
//! fallback anywhere in the request pipeline, so callers see exactly what went wrong and
//! pick their own policy.
//!
//! # Classification
//!
//! | Variant | Raised by | Meaning |
//! |---------|-----------|---------|
//! | [`InvalidUrl`](StreamrError::InvalidUrl) | request builder | path does not resolve against the base URL |
//! | [`InvalidApiKey`](StreamrError::InvalidApiKey) | request builder | key cannot be sent as a header |
//! | [`Serialization`](StreamrError::Serialization) | request builder | body could not be encoded as JSON |
//! | [`Transport`](StreamrError::Transport) | transport | network, DNS, TLS or timeout failure |
//! | [`Api`](StreamrError::Api) | transport | non-2xx status |
//! | [`Decode`](StreamrError::Decode) | transport | 2xx with malformed or mismatched JSON |
//! | [`InvalidStreamId`](StreamrError::InvalidStreamId) | stream service | id is empty or a dot-segment |
//! | [`EmptyResponse`](StreamrError::EmptyResponse) | stream service | 2xx with no body where a record was required |
//! | [`Entropy`](StreamrError::Entropy) | subscriptions | OS random source unavailable |
//! | [`Config`](StreamrError::Config) | configuration | missing or malformed setting |

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StreamrError>;

/// Errors produced by the Streamr client.
#[derive(Debug, Error)]
pub enum StreamrError {
    /// The relative path could not be resolved into an absolute URL.
    #[error("invalid URL '{input}': {source}")]
    InvalidUrl {
        /// The base URL or path that failed to resolve
        input: String,
        /// Parser failure
        #[source]
        source: url::ParseError,
    },

    /// The API key contains bytes that are not allowed in an HTTP header.
    #[error("API key cannot be used as an Authorization header value")]
    InvalidApiKey,

    /// A stream id that cannot name a single path segment (`""`, `"."` or `".."`).
    #[error("invalid stream id '{0}'")]
    InvalidStreamId(String),

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside 200..=299.
    #[error("{method} {url}: {}", .status.as_u16())]
    Api {
        /// Method of the failed request
        method: Method,
        /// Resolved URL of the failed request
        url: String,
        /// Status code returned by the server
        status: StatusCode,
    },

    /// A successful response carried a body that is not the expected JSON shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A successful response carried no body where a record was expected.
    #[error("{method} {url}: empty response body")]
    EmptyResponse {
        /// Method of the request
        method: Method,
        /// Resolved URL of the request
        url: String,
    },

    /// The operating system's random source failed.
    #[error("random source unavailable: {0}")]
    Entropy(rand::Error),

    /// Client configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl StreamrError {
    /// HTTP status carried by an [`Api`](StreamrError::Api) error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            StreamrError::Api { status, .. } => Some(*status),
            StreamrError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the server reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Whether the server rejected the API key (401) or its permissions (403).
    pub fn is_access_denied(&self) -> bool {
        self.status()
            .map(|status| crate::client::is_access_denied_status(status.as_u16()))
            .unwrap_or(false)
    }

    /// Whether repeating the same request might succeed.
    ///
    /// Only a hint for callers; the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            StreamrError::Transport(e) => e.is_timeout() || e.is_connect(),
            StreamrError::Api { status, .. } => {
                crate::client::is_retryable_status(status.as_u16())
            }
            _ => false,
        }
    }
}
