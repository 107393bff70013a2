//! In-memory index of active subscriptions.
//!
//! The registry keeps two views over the same set of subscriptions:
//!
//! - by subscription id, for lookup and cancellation
//! - by stream id, in registration order, for "every subscriber of stream X"
//!
//! Both views live behind one `parking_lot::RwLock`, so an insert or removal updates
//! them together and readers never observe one without the other.

use super::subscription::{MessageCallback, Subscription, SubscriptionId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

struct Entry {
    subscription: Subscription,
    callback: MessageCallback,
}

#[derive(Default)]
struct Indices {
    by_id: HashMap<SubscriptionId, Entry>,
    /// Stream id -> subscription ids in insertion order
    by_stream: HashMap<String, Vec<SubscriptionId>>,
}

/// Thread-safe registry of subscriptions and their callbacks.
///
/// Cloning yields another handle to the same registry.
///
/// # Examples
///
/// ```
/// use streamr_client::streams::{Subscription, SubscriptionOptions, SubscriptionRegistry};
/// use std::sync::Arc;
///
/// let registry = SubscriptionRegistry::new();
/// let sub = Subscription::new("xyz123", SubscriptionOptions::new()).unwrap();
/// registry.insert(sub.clone(), Arc::new(|msg: &str| println!("{}", msg)));
///
/// assert_eq!(registry.lookup(&sub.id), Some(sub.clone()));
/// assert_eq!(registry.list_by_stream("xyz123"), vec![sub]);
/// ```
#[derive(Clone, Default)]
pub struct SubscriptionRegistry {
    inner: Arc<RwLock<Indices>>,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscription and its callback.
    ///
    /// # Panics
    ///
    /// If a subscription with the same id is already registered. Ids are generated
    /// fresh for every subscription, so this indicates a bug in the caller.
    pub fn insert(&self, subscription: Subscription, callback: MessageCallback) {
        let mut indices = self.inner.write();
        assert!(
            !indices.by_id.contains_key(&subscription.id),
            "subscription id {} registered twice",
            subscription.id
        );

        indices
            .by_stream
            .entry(subscription.stream_id.clone())
            .or_default()
            .push(subscription.id.clone());
        indices.by_id.insert(
            subscription.id.clone(),
            Entry {
                subscription,
                callback,
            },
        );
    }

    /// Find a subscription by id.
    pub fn lookup(&self, id: &SubscriptionId) -> Option<Subscription> {
        self.inner
            .read()
            .by_id
            .get(id)
            .map(|entry| entry.subscription.clone())
    }

    /// Subscriptions of a stream in registration order; empty if there are none.
    pub fn list_by_stream(&self, stream_id: &str) -> Vec<Subscription> {
        let indices = self.inner.read();
        indices
            .by_stream
            .get(stream_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| indices.by_id.get(id))
                    .map(|entry| entry.subscription.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Remove a subscription from both indices.
    pub fn remove(&self, id: &SubscriptionId) -> Option<Subscription> {
        let mut indices = self.inner.write();
        let entry = indices.by_id.remove(id)?;

        let stream_id = &entry.subscription.stream_id;
        if let Some(ids) = indices.by_stream.get_mut(stream_id) {
            ids.retain(|other| other != id);
            if ids.is_empty() {
                indices.by_stream.remove(stream_id);
            }
        }
        Some(entry.subscription)
    }

    /// Streams that have at least one subscriber, in arbitrary order.
    pub fn stream_ids(&self) -> Vec<String> {
        self.inner.read().by_stream.keys().cloned().collect()
    }

    /// Number of registered subscriptions.
    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    /// No subscriptions are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().by_id.is_empty()
    }

    /// Hand a message to every subscriber of `stream_id`, in registration order.
    ///
    /// Entry point for whatever real-time transport receives stream messages. Callbacks
    /// run after the lock is released, so they may subscribe or unsubscribe. Returns the
    /// number of callbacks invoked.
    pub fn deliver(&self, stream_id: &str, message: &str) -> usize {
        let callbacks: Vec<MessageCallback> = {
            let indices = self.inner.read();
            match indices.by_stream.get(stream_id) {
                Some(ids) => ids
                    .iter()
                    .filter_map(|id| indices.by_id.get(id))
                    .map(|entry| Arc::clone(&entry.callback))
                    .collect(),
                None => Vec::new(),
            }
        };

        for callback in &callbacks {
            callback(message);
        }
        callbacks.len()
    }
}

impl std::fmt::Debug for SubscriptionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let indices = self.inner.read();
        f.debug_struct("SubscriptionRegistry")
            .field("subscriptions", &indices.by_id.len())
            .field("streams", &indices.by_stream.len())
            .finish()
    }
}
