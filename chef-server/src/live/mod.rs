//! Live update hub
//!
//! In-process change-notification stream backing the dashboard and list
//! views. A view registers interest with [`SubscriptionHub::subscribe`]
//! and receives every published [`ChangeEvent`] until it releases the
//! returned [`Subscription`]. Registration and release are explicit;
//! holding a `Subscription` past the life of its view keeps a live
//! callback registration around, which is a resource-lifecycle bug —
//! [`SubscriptionHub::active_subscriptions`] exists so tests and
//! diagnostics can catch it.
//!
//! # Message flow
//!
//! ```text
//! Handler ──▶ ServerState::broadcast_sync() ──▶ SubscriptionHub ──▶ subscribers
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::broadcast;

/// Resource version manager
///
/// Each resource type keeps an independent, atomically incremented
/// version number so subscribers can order the snapshots they receive.
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the version of a resource and return the new value
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version of a resource (0 if never published)
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

/// One change notification
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    /// Resource type ("inventory", "journal", "notification", ...)
    pub resource: String,
    /// Monotonic per-resource version
    pub version: u64,
    /// Change type ("created", "updated", "deleted")
    pub action: String,
    /// Resource id
    pub id: String,
    /// Resource data (None for deletions)
    pub data: Option<serde_json::Value>,
}

/// Default broadcast channel capacity
const DEFAULT_CAPACITY: usize = 1024;

/// Change-notification hub
#[derive(Debug, Clone)]
pub struct SubscriptionHub {
    tx: broadcast::Sender<ChangeEvent>,
    versions: Arc<ResourceVersions>,
    /// Active registrations: subscription id -> view label
    active: Arc<DashMap<u64, String>>,
    next_id: Arc<AtomicU64>,
}

impl SubscriptionHub {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            versions: Arc::new(ResourceVersions::new()),
            active: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Publish a change to every subscriber.
    ///
    /// Returns the version assigned to the event. Lossy by design of the
    /// broadcast channel: a subscriber that lags past the channel
    /// capacity misses events and must refetch.
    pub fn publish(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<serde_json::Value>,
    ) -> u64 {
        let version = self.versions.increment(resource);
        let event = ChangeEvent {
            resource: resource.to_string(),
            version,
            action: action.to_string(),
            id: id.to_string(),
            data,
        };
        // Send fails only when nobody is subscribed
        let _ = self.tx.send(event);
        version
    }

    /// Register a subscriber.
    ///
    /// `label` names the consuming view for diagnostics. `resource`
    /// filters events to one resource type; `None` receives everything.
    pub fn subscribe(&self, label: &str, resource: Option<&str>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.active.insert(id, label.to_string());
        tracing::debug!(id, label, "Live subscription registered");

        Subscription {
            id,
            label: label.to_string(),
            resource: resource.map(str::to_string),
            rx: self.tx.subscribe(),
            active: self.active.clone(),
        }
    }

    /// Number of currently registered subscriptions
    pub fn active_subscriptions(&self) -> usize {
        self.active.len()
    }

    /// Current version of a resource
    pub fn version_of(&self, resource: &str) -> u64 {
        self.versions.get(resource)
    }
}

impl Default for SubscriptionHub {
    fn default() -> Self {
        Self::new()
    }
}

/// A live registration. Release it by dropping (scoped acquisition) or
/// explicitly via [`Subscription::dispose`] on view teardown.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    label: String,
    resource: Option<String>,
    rx: broadcast::Receiver<ChangeEvent>,
    active: Arc<DashMap<u64, String>>,
}

impl Subscription {
    /// Next matching event, or `None` once the hub is gone.
    ///
    /// A lagged receiver skips ahead; the consuming view is expected to
    /// refetch its snapshot when that happens.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => {
                    if let Some(ref filter) = self.resource
                        && &event.resource != filter
                    {
                        continue;
                    }
                    return Some(event);
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(
                        label = %self.label,
                        missed,
                        "Live subscription lagged, events dropped"
                    );
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Explicit release on view teardown
    pub fn dispose(self) {
        // Drop does the actual deregistration
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.remove(&self.id);
        tracing::debug!(id = self.id, label = %self.label, "Live subscription released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_reach_subscribers_in_order() {
        let hub = SubscriptionHub::new();
        let mut sub = hub.subscribe("dashboard", None);

        hub.publish("inventory", "updated", "inventory:a", None);
        hub.publish("inventory", "updated", "inventory:a", None);

        let first = sub.recv().await.unwrap();
        let second = sub.recv().await.unwrap();
        assert_eq!(first.version, 1);
        assert_eq!(second.version, 2);
    }

    #[tokio::test]
    async fn resource_filter_skips_other_resources() {
        let hub = SubscriptionHub::new();
        let mut sub = hub.subscribe("journal-history", Some("journal"));

        hub.publish("inventory", "updated", "inventory:a", None);
        hub.publish("journal", "created", "journals:j1", None);

        let event = sub.recv().await.unwrap();
        assert_eq!(event.resource, "journal");
    }

    #[tokio::test]
    async fn dispose_releases_the_registration() {
        let hub = SubscriptionHub::new();
        let sub = hub.subscribe("inventory-list", Some("inventory"));
        let other = hub.subscribe("dashboard", None);
        assert_eq!(hub.active_subscriptions(), 2);

        sub.dispose();
        assert_eq!(hub.active_subscriptions(), 1);

        drop(other);
        assert_eq!(hub.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn versions_are_independent_per_resource() {
        let hub = SubscriptionHub::new();
        hub.publish("inventory", "updated", "inventory:a", None);
        hub.publish("inventory", "updated", "inventory:b", None);
        hub.publish("journal", "created", "journals:j1", None);

        assert_eq!(hub.version_of("inventory"), 2);
        assert_eq!(hub.version_of("journal"), 1);
        assert_eq!(hub.version_of("product"), 0);
    }
}
