//! Response envelope.
//!
//! [`ApiResponse`] holds the outcome of one HTTP exchange with the body fully read, so
//! the underlying connection is already released by the time a caller sees it. It
//! classifies the status and decodes the body on demand.

use crate::client::utils::is_success_status;
use crate::error::{Result, StreamrError};
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Status, headers and body of one API exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    method: Method,
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    /// Assemble an envelope from its parts.
    pub fn new(
        method: Method,
        url: Url,
        status: StatusCode,
        headers: HeaderMap,
        body: impl Into<Bytes>,
    ) -> Self {
        ApiResponse {
            method,
            url,
            status,
            headers,
            body: body.into(),
        }
    }

    /// Method of the request that produced this response.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Resolved URL of the request.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Status is within 200..=299.
    pub fn is_success(&self) -> bool {
        is_success_status(self.status.as_u16())
    }

    /// Turn a non-2xx response into [`StreamrError::Api`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(StreamrError::Api {
                method: self.method,
                url: self.url.to_string(),
                status: self.status,
            })
        }
    }

    /// Decode the body as JSON.
    ///
    /// An empty (or whitespace-only) body yields `Ok(None)`, which is what `204 No Content`
    /// style answers look like.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&self.body)
            .map(Some)
            .map_err(StreamrError::Decode)
    }
}
