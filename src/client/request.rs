//! Authenticated request construction.
//!
//! [`RequestBuilder`] turns a method, a path relative to the API root, optional query
//! pairs and an optional JSON body into a ready-to-send [`reqwest::Request`]. No I/O
//! happens here.
//!
//! Every request carries:
//!
//! | Header | Value |
//! |--------|-------|
//! | `Authorization` | `Token <api-key>` |
//! | `Content-Type` | `application/json` (only with a body) |
//! | `Connection` | `close` |
//!
//! # Examples
//!
//! ```
//! use streamr_client::client::{RequestBuilder, NO_BODY};
//! use reqwest::Method;
//! use std::time::Duration;
//!
//! let builder = RequestBuilder::new(
//!     "https://www.streamr.com/api/v1",
//!     "my-api-key",
//!     Duration::from_secs(30),
//! )
//! .unwrap();
//!
//! let request = builder.build(Method::GET, "streams/abc", NO_BODY).unwrap();
//! assert_eq!(request.url().as_str(), "https://www.streamr.com/api/v1/streams/abc");
//! assert_eq!(request.headers()["authorization"], "Token my-api-key");
//! ```

use crate::client::utils::normalize_base_url;
use crate::error::{Result, StreamrError};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONNECTION, CONTENT_TYPE};
use reqwest::{Method, Request};
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Placeholder for requests without a body.
pub const NO_BODY: Option<&()> = None;

/// Builds authenticated JSON requests against one API root.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
    authorization: HeaderValue,
    timeout: Duration,
}

impl RequestBuilder {
    /// Create a builder for `base_url` authenticating with `api_key`.
    ///
    /// The base URL gets a trailing slash if it lacks one.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let normalized = normalize_base_url(base_url);
        let base_url = Url::parse(&normalized).map_err(|source| StreamrError::InvalidUrl {
            input: normalized.clone(),
            source,
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StreamrError::InvalidUrl {
                input: normalized,
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }

        let mut authorization = HeaderValue::from_str(&format!("Token {}", api_key))
            .map_err(|_| StreamrError::InvalidApiKey)?;
        authorization.set_sensitive(true);

        Ok(RequestBuilder {
            base_url,
            authorization,
            timeout,
        })
    }

    /// The normalized API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` against the base URL.
    ///
    /// Relative paths are joined below the base; paths starting with `/` replace the
    /// base's path; absolute URLs replace it entirely.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|source| StreamrError::InvalidUrl {
                input: path.to_string(),
                source,
            })
    }

    /// Build a request without query parameters.
    pub fn build<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        self.build_with_query(method, path, &[], body)
    }

    /// Build a request, appending `query` to the resolved URL.
    pub fn build_with_query<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let mut url = self.resolve(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let mut request = Request::new(method, url);
        *request.timeout_mut() = Some(self.timeout);

        let headers = request.headers_mut();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(CONNECTION, HeaderValue::from_static("close"));

        if let Some(body) = body {
            // serde_json leaves '<', '>' and '&' unescaped
            let bytes = serde_json::to_vec(body).map_err(StreamrError::Serialization)?;
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            *request.body_mut() = Some(bytes.into());
        }

        Ok(request)
    }
}
