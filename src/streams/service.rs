//! Stream operations.
//!
//! | Operation | Method | Path | Body | Decoded response |
//! |-----------|--------|------|------|------------------|
//! | [`produce`](StreamService::produce) | POST | `streams/{id}/data` | any JSON | none |
//! | [`get`](StreamService::get) | GET | `streams/{id}` | - | [`Stream`] |
//! | [`list`](StreamService::list) | GET | `streams?…` | - | `Vec<Stream>` |
//! | [`create`](StreamService::create) | POST | `streams` | `{"name": …}` | [`Stream`] |
//!
//! [`subscribe`](StreamService::subscribe) performs no I/O; it only records the
//! subscription in the registry.

use super::registry::SubscriptionRegistry;
use super::subscription::{MessageCallback, Subscription, SubscriptionId, SubscriptionOptions};
use crate::client::{stream_path_segment, ApiResponse, StreamrClient, NO_BODY};
use crate::error::{Result, StreamrError};
use crate::types::{NewStream, Stream, StreamQuery};
use reqwest::{Method, Request};
use serde::Serialize;
use std::sync::Arc;

/// Stream API operations and the subscriptions registered through them.
///
/// Cloning shares both the transport and the subscription registry.
#[derive(Debug, Clone)]
pub struct StreamService {
    client: StreamrClient,
    subscriptions: SubscriptionRegistry,
}

impl StreamService {
    /// Create a service on top of `client` with an empty registry.
    pub fn new(client: StreamrClient) -> Self {
        StreamService {
            client,
            subscriptions: SubscriptionRegistry::new(),
        }
    }

    /// The underlying transport.
    pub fn client(&self) -> &StreamrClient {
        &self.client
    }

    /// Registry of subscriptions made through this service.
    pub fn subscriptions(&self) -> &SubscriptionRegistry {
        &self.subscriptions
    }

    /// Push one data record to a stream.
    ///
    /// `data` can be any JSON-serializable value. Success is the 2xx status alone; the
    /// response body is not decoded. Ids that are empty or dot-segments are rejected
    /// before any request is sent.
    pub async fn produce<T>(&self, stream_id: &str, data: &T) -> Result<ApiResponse>
    where
        T: Serialize + ?Sized,
    {
        let path = format!("streams/{}/data", stream_path_segment(stream_id)?);
        let request = self.client.build_request(Method::POST, &path, Some(data))?;
        self.client.execute(request).await
    }

    /// Fetch a stream by id.
    ///
    /// Fails with [`StreamrError::InvalidStreamId`] for `""`, `"."` or `".."` without
    /// sending a request.
    pub async fn get(&self, stream_id: &str) -> Result<Stream> {
        let path = format!("streams/{}", stream_path_segment(stream_id)?);
        let request = self.client.build_request(Method::GET, &path, NO_BODY)?;
        self.fetch_stream(request).await
    }

    /// List streams matching `query`.
    ///
    /// Each call issues a fresh request. An empty body counts as no streams.
    pub async fn list(&self, query: &StreamQuery) -> Result<Vec<Stream>> {
        let request = self.client.build_request_with_query(
            Method::GET,
            "streams",
            &query.to_query_pairs(),
            NO_BODY,
        )?;
        let (_, streams) = self.client.execute_json::<Vec<Stream>>(request).await?;
        Ok(streams.unwrap_or_default())
    }

    /// Create a stream with the given name.
    pub async fn create(&self, name: &str) -> Result<Stream> {
        self.create_stream(&NewStream::new(name)).await
    }

    /// Create a stream from a full creation request.
    pub async fn create_stream(&self, stream: &NewStream) -> Result<Stream> {
        let request = self
            .client
            .build_request(Method::POST, "streams", Some(stream))?;
        let created = self.fetch_stream(request).await?;
        tracing::debug!(id = %created.id, name = %created.name, "stream created");
        Ok(created)
    }

    /// Find a stream whose name is exactly `name`.
    ///
    /// Returns `Ok(None)` when no stream has that name. If several do, the first one the
    /// server lists wins.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Stream>> {
        let streams = self.list(&StreamQuery::new().with_name(name)).await?;
        Ok(streams.into_iter().find(|stream| stream.name == name))
    }

    /// Return the stream named `name`, creating it if none exists.
    ///
    /// Lookup and creation are two separate requests; two callers racing on the same
    /// name can both create a stream.
    pub async fn get_or_create(&self, name: &str) -> Result<Stream> {
        match self.get_by_name(name).await? {
            Some(stream) => Ok(stream),
            None => self.create(name).await,
        }
    }

    /// Register interest in a stream's messages.
    ///
    /// Uses the default partition and no stream-specific credential. No request is
    /// sent; `callback` is invoked by whatever delivers messages into
    /// [`SubscriptionRegistry::deliver`].
    pub fn subscribe<F>(&self, stream_id: &str, callback: F) -> Result<Subscription>
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.subscribe_with(stream_id, SubscriptionOptions::default(), callback)
    }

    /// Register interest in a stream's messages with explicit partition or credential.
    pub fn subscribe_with<F>(
        &self,
        stream_id: &str,
        options: SubscriptionOptions,
        callback: F,
    ) -> Result<Subscription>
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let subscription = Subscription::new(stream_id, options)?;
        let callback: MessageCallback = Arc::new(callback);
        self.subscriptions.insert(subscription.clone(), callback);
        tracing::debug!(id = %subscription.id, stream_id, "subscription registered");
        Ok(subscription)
    }

    /// Drop a subscription. Returns it if it was registered.
    pub fn unsubscribe(&self, id: &SubscriptionId) -> Option<Subscription> {
        self.subscriptions.remove(id)
    }

    async fn fetch_stream(&self, request: Request) -> Result<Stream> {
        let method = request.method().clone();
        let url = request.url().to_string();
        let (_, stream) = self.client.execute_json::<Stream>(request).await?;
        stream.ok_or(StreamrError::EmptyResponse { method, url })
    }
}
