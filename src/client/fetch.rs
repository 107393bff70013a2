//! Main Streamr transport client.
//!
//! [`StreamrClient`] owns the configuration, the [`RequestBuilder`] and the underlying
//! `reqwest` client. Every higher level operation goes through [`StreamrClient::execute`]
//! or [`StreamrClient::execute_json`].
//!
//! # Examples
//!
//! ## Raw request
//!
//! ```ignore
//! use streamr_client::{StreamrClient, client::NO_BODY};
//! use reqwest::Method;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StreamrClient::new("my-api-key")?;
//!     let request = client.build_request(Method::GET, "streams", NO_BODY)?;
//!     let response = client.execute(request).await?;
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Decoding into a type
//!
//! ```ignore
//! use streamr_client::{Stream, StreamrClient, client::NO_BODY};
//! use reqwest::Method;
//!
//! let request = client.build_request(Method::GET, "streams/abc", NO_BODY)?;
//! let (response, stream) = client.execute_json::<Stream>(request).await?;
//! ```

use crate::client::config::ClientConfig;
use crate::client::request::RequestBuilder;
use crate::client::response::ApiResponse;
use crate::client::utils::is_success_status;
use crate::error::{Result, StreamrError};
use reqwest::{Method, Request};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// The Streamr API transport client.
///
/// Holds no per-request state, so one instance (or its clones, which share the same
/// connection settings) can serve any number of concurrent callers.
///
/// # Transport settings
///
/// - redirects are never followed
/// - no idle connections are kept; each request carries `Connection: close`
/// - every request has a deadline (`request_timeout_ms`)
#[derive(Clone)]
pub struct StreamrClient {
    client: reqwest::Client,
    builder: RequestBuilder,
    config: Arc<ClientConfig>,
}

impl StreamrClient {
    /// Create a client for the production API with default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Create a client against another API root, mostly for tests.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key).with_base_url(base_url))
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let builder = RequestBuilder::new(
            &config.base_url,
            &config.api_key,
            config.request_timeout(),
        )?;

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(StreamrClient {
            client,
            builder,
            config: Arc::new(config),
        })
    }

    /// Build an authenticated request for `path`.
    pub fn build_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        self.builder.build(method, path, body)
    }

    /// Build an authenticated request for `path` with query parameters.
    pub fn build_request_with_query<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        self.builder.build_with_query(method, path, query, body)
    }

    /// Dispatch `request` and classify the response.
    ///
    /// Fails with [`StreamrError::Transport`] if no response arrives and with
    /// [`StreamrError::Api`] for any status outside 200..=299. The body is read in full
    /// before returning; on a non-2xx status it is discarded unread.
    pub async fn execute(&self, request: Request) -> Result<ApiResponse> {
        let method = request.method().clone();
        let url = request.url().clone();
        let start = Instant::now();

        let response = self.client.execute(request).await.map_err(|e| {
            if self.config.enable_logging {
                tracing::warn!(%method, %url, error = %e, "request failed");
            }
            StreamrError::Transport(e)
        })?;

        let status = response.status();
        if self.config.enable_logging {
            tracing::debug!(
                %method,
                %url,
                status = status.as_u16(),
                elapsed = ?start.elapsed(),
                "response received"
            );
        }

        if !is_success_status(status.as_u16()) {
            if self.config.enable_logging {
                tracing::warn!(%method, %url, status = status.as_u16(), "API error");
            }
            return Err(StreamrError::Api {
                method,
                url: url.to_string(),
                status,
            });
        }

        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(ApiResponse::new(method, url, status, headers, body))
    }

    /// Dispatch `request`, classify it and decode the body as JSON.
    ///
    /// Errors take precedence in the order transport, API status, decode. An empty body
    /// on success decodes to `None`.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<(ApiResponse, Option<T>)> {
        let response = self.execute(request).await?;
        let value = response.decode()?;
        Ok((response, value))
    }

    /// The normalized API root.
    pub fn base_url(&self) -> &url::Url {
        self.builder.base_url()
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl std::fmt::Debug for StreamrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamrClient")
            .field("base_url", &self.builder.base_url().as_str())
            .field("request_timeout_ms", &self.config.request_timeout_ms)
            .finish_non_exhaustive()
    }
}
