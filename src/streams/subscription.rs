//! Subscription records and identifiers.
//!
//! A [`Subscription`] is plain data: which stream, which partition, which credential.
//! The callback that should receive messages is kept next to it in the
//! [`SubscriptionRegistry`](super::SubscriptionRegistry), never inside the record, so a
//! subscription can be cloned, logged or serialized freely.

use crate::error::{Result, StreamrError};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Callback invoked with the payload of each message delivered to a subscription.
pub type MessageCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Client-generated subscription identifier.
///
/// 16 random bytes rendered as upper-case hex in 8-4-4-4-12 groups, e.g.
/// `0F8E3C1A-92B4-47D1-A3C0-5E6F7A8B9C0D`. Only the shape is UUID-like; version and
/// variant bits are whatever the random source produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(String);

impl SubscriptionId {
    /// Draw a fresh identifier from the operating system's random source.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(StreamrError::Entropy)?;
        Ok(Self::from_bytes(bytes))
    }

    /// Format raw bytes as an identifier.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        let mut buf = uuid::Uuid::encode_buffer();
        let formatted = uuid::Uuid::from_bytes(bytes)
            .hyphenated()
            .encode_upper(&mut buf);
        SubscriptionId(formatted.to_string())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SubscriptionId {
    fn from(id: String) -> Self {
        SubscriptionId(id)
    }
}

impl From<&str> for SubscriptionId {
    fn from(id: &str) -> Self {
        SubscriptionId(id.to_string())
    }
}

/// Optional settings for a new subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionOptions {
    /// Stream partition; empty means the default partition
    pub stream_partition: String,
    /// Credential for the stream; empty means the client's own key is used
    pub api_key: String,
}

impl SubscriptionOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a specific partition.
    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.stream_partition = partition.into();
        self
    }

    /// Use a different credential for this stream.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }
}

/// A registered interest in a stream's messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Unique identifier
    pub id: SubscriptionId,
    /// Stream the subscription listens to
    pub stream_id: String,
    /// Partition key, empty for the default partition
    pub stream_partition: String,
    /// Access credential, may differ from the client's key
    pub api_key: String,
}

impl Subscription {
    /// Create a subscription with a freshly generated identifier.
    pub fn new(stream_id: impl Into<String>, options: SubscriptionOptions) -> Result<Self> {
        Ok(Subscription {
            id: SubscriptionId::generate()?,
            stream_id: stream_id.into(),
            stream_partition: options.stream_partition,
            api_key: options.api_key,
        })
    }
}
