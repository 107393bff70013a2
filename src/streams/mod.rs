//! Streams and subscriptions.
//!
//! # Module Organization
//!
//! ```text
//! streams/
//! ├── service      - StreamService (produce, get, list, create, subscribe)
//! ├── subscription - Subscription records and identifiers
//! └── registry     - SubscriptionRegistry (by-id and by-stream indices)
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use streamr_client::{StreamService, StreamrClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let streams = StreamService::new(StreamrClient::new("my-api-key")?);
//!
//!     let stream = streams.get_or_create("temperature").await?;
//!     streams.produce(&stream.id, &json!({"celsius": 21.5})).await?;
//!
//!     let sub = streams.subscribe(&stream.id, |msg| println!("got {}", msg))?;
//!     println!("registered {}", sub.id);
//!     Ok(())
//! }
//! ```

mod registry;
mod service;
mod subscription;

pub use registry::SubscriptionRegistry;
pub use service::StreamService;
pub use subscription::{MessageCallback, Subscription, SubscriptionId, SubscriptionOptions};
