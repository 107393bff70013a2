//! Streamr HTTP transport.
//!
//! This module is the request/response pipeline shared by every API operation:
//!
//! - **Build** an authenticated JSON request from a relative path
//! - **Execute** it over `reqwest`
//! - **Classify** the status (2xx is success, anything else is [`StreamrError::Api`])
//! - **Decode** the body into a caller-chosen type
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch    - StreamrClient and request execution
//! ├── request  - RequestBuilder (URL resolution, auth and JSON body)
//! ├── response - ApiResponse envelope
//! ├── config   - Client configuration
//! └── utils    - Utility functions
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StreamrClient`] | Transport client |
//! | [`RequestBuilder`] | Authenticated request construction |
//! | [`ApiResponse`] | Envelope around one HTTP exchange |
//! | [`ClientConfig`] | Client configuration options |
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```
//! use streamr_client::client::{ClientConfig, StreamrClient};
//!
//! // Default configuration
//! let client = StreamrClient::new("my-api-key").unwrap();
//!
//! // Custom configuration
//! let config = ClientConfig {
//!     api_key: "my-api-key".to_string(),
//!     base_url: "http://localhost:8081/streamr-core/api/v1".to_string(),
//!     request_timeout_ms: 5_000,
//!     ..Default::default()
//! };
//! let client = StreamrClient::with_config(config).unwrap();
//! assert_eq!(
//!     client.base_url().as_str(),
//!     "http://localhost:8081/streamr-core/api/v1/"
//! );
//! ```
//!
//! ## Utility Functions
//!
//! ```
//! use streamr_client::client::{is_retryable_status, is_success_status};
//!
//! assert!(is_success_status(204));
//! assert!(!is_success_status(302));
//! assert!(is_retryable_status(503));
//! assert!(!is_retryable_status(404));
//! ```
//!
//! [`StreamrError::Api`]: crate::StreamrError::Api

mod config;
mod fetch;
mod request;
mod response;
mod utils;

pub use config::{ClientConfig, DEFAULT_BASE_URL, ENV_API_KEY, ENV_BASE_URL, ENV_TIMEOUT_MS};
pub use fetch::StreamrClient;
pub use request::{RequestBuilder, NO_BODY};
pub use response::ApiResponse;
pub use utils::*;
