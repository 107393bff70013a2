#![warn(missing_docs)]

//! # Streamr client
//!
//! An async client for the Streamr HTTP API: authenticate with an API key, push data
//! records to streams, fetch, list and create streams, and register callback-based
//! subscriptions.
//!
//! ## Overview
//!
//! Every API call goes through the same pipeline:
//!
//! 1. **Build** - [`RequestBuilder`](client::RequestBuilder) resolves the path against the
//!    base URL, encodes the JSON body and adds `Authorization: Token <api-key>`
//! 2. **Execute** - [`StreamrClient`] sends it with `reqwest`
//! 3. **Classify** - any status outside `200..=299` becomes [`StreamrError::Api`]
//! 4. **Decode** - [`ApiResponse`](client::ApiResponse) turns the body into a typed value;
//!    an empty body decodes to "no value"
//!
//! [`StreamService`] builds the stream operations on top of that pipeline and keeps a
//! [`SubscriptionRegistry`] of local subscriptions.
//!
//! ## Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | Produce | `POST` | `streams/{id}/data` |
//! | Get | `GET` | `streams/{id}` |
//! | List | `GET` | `streams` |
//! | Create | `POST` | `streams` |
//!
//! ## Usage
//!
//! ```ignore
//! use streamr_client::{StreamService, StreamrClient, StreamQuery};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StreamrClient::new("my-api-key")?;
//!     let streams = StreamService::new(client);
//!
//!     // Push data
//!     streams.produce("xyz123", &json!({"name": "foobar", "age": 99})).await?;
//!
//!     // Read metadata
//!     let stream = streams.get("xyz123").await?;
//!     println!("{} was created at {:?}", stream.name, stream.date_created);
//!
//!     for stream in streams.list(&StreamQuery::new().with_search("sensor")).await? {
//!         println!("{}: {}", stream.id, stream.name);
//!     }
//!
//!     // Register a subscription (no network I/O)
//!     let sub = streams.subscribe("xyz123", |msg| println!("message: {}", msg))?;
//!     println!("subscription {}", sub.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors and retries
//!
//! Nothing in this crate retries. Failures are reported as [`StreamrError`] and
//! [`StreamrError::is_retryable`] tells callers which ones are worth repeating.
//!
//! ## Module Structure
//!
//! - **[client]** - Transport: configuration, request builder, response envelope
//! - **[streams]** - Stream operations and the subscription registry
//! - **[types]** - Stream records and query types
//! - **[error]** - Error types and result handling

pub mod client;
pub mod error;
pub mod streams;
pub mod types;

pub use client::{ApiResponse, ClientConfig, StreamrClient};
pub use error::{Result, StreamrError};
pub use streams::{StreamService, Subscription, SubscriptionId, SubscriptionRegistry};
pub use types::{NewStream, SortOrder, Stream, StreamQuery};

#[cfg(test)]
mod tests;
