//! The subscription hub: event type to listener bindings.

use crate::component::ComponentHandle;
use crate::types::ListenerId;
use dashmap::DashSet;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Sentinel event type. Always a member of [`EventRegistry::event_types`],
/// and recorded by the static introspector when a trigger's target event
/// cannot be determined at load time.
pub const WILDCARD_EVENT: &str = "*";

type SubscriberMap = BTreeMap<ListenerId, Arc<dyn ComponentHandle>>;

/// Mapping from event type to the set of subscribed listeners.
///
/// Event-type keys are case-insensitive: every lookup and mutation
/// normalizes to lower-case. Within one event type each [`ListenerId`] is
/// bound at most once; re-subscribing replaces the previous handle.
///
/// The whole mapping lives behind a single lock so that [`clear`] is atomic
/// relative to concurrent readers: a reader observes either the old registry
/// or the empty one, never a partial view. Readers copy subscriber snapshots
/// out, so no lock is ever held while a subscriber callback runs.
///
/// [`clear`]: EventRegistry::clear
pub struct EventRegistry {
    subscriptions: RwLock<BTreeMap<String, SubscriberMap>>,
    managed: DashSet<String>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(BTreeMap::new()),
            managed: DashSet::new(),
        }
    }

    /// Inserts or replaces the binding for `id` under the normalized event
    /// type. Returns the previously bound handle, if any, so callers can
    /// clean up after the replaced registration.
    pub fn subscribe(
        &self,
        event_type: &str,
        id: ListenerId,
        handle: Arc<dyn ComponentHandle>,
    ) -> Option<Arc<dyn ComponentHandle>> {
        let key = normalize(event_type);
        let mut subscriptions = self.subscriptions.write();
        subscriptions.entry(key).or_default().insert(id, handle)
    }

    /// Removes the binding for `id` under the event type. No-op when absent.
    pub fn unsubscribe(
        &self,
        event_type: &str,
        id: &ListenerId,
    ) -> Option<Arc<dyn ComponentHandle>> {
        let key = normalize(event_type);
        let mut subscriptions = self.subscriptions.write();
        let subscribers = subscriptions.get_mut(&key)?;
        let removed = subscribers.remove(id);
        if subscribers.is_empty() {
            subscriptions.remove(&key);
        }
        removed
    }

    /// Snapshot of the current bindings for the event type, in identity
    /// order. The snapshot is detached: later mutations do not affect it.
    pub fn snapshot(&self, event_type: &str) -> Vec<(ListenerId, Arc<dyn ComponentHandle>)> {
        let subscriptions = self.subscriptions.read();
        subscriptions
            .get(&normalize(event_type))
            .map(|subscribers| {
                subscribers
                    .iter()
                    .map(|(id, handle)| (id.clone(), handle.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The currently bound handles for the event type; empty if none.
    pub fn listeners(&self, event_type: &str) -> Vec<Arc<dyn ComponentHandle>> {
        self.snapshot(event_type)
            .into_iter()
            .map(|(_, handle)| handle)
            .collect()
    }

    pub fn has_listeners(&self, event_type: &str) -> bool {
        let subscriptions = self.subscriptions.read();
        subscriptions
            .get(&normalize(event_type))
            .is_some_and(|subscribers| !subscribers.is_empty())
    }

    /// Drops every subscription. Managed event types are declarative
    /// configuration, not subscription state, and survive.
    pub fn clear(&self) {
        self.subscriptions.write().clear();
    }

    /// Every event type with at least one subscriber, plus the wildcard
    /// sentinel.
    pub fn event_types(&self) -> BTreeSet<String> {
        let subscriptions = self.subscriptions.read();
        let mut types: BTreeSet<String> = subscriptions
            .iter()
            .filter(|(_, subscribers)| !subscribers.is_empty())
            .map(|(event_type, _)| event_type.clone())
            .collect();
        types.insert(WILDCARD_EVENT.to_string());
        types
    }

    /// Declares event types as managed regardless of subscriber presence.
    pub fn add_managed_events<I, S>(&self, event_types: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for event_type in event_types {
            self.managed.insert(normalize(event_type.as_ref()));
        }
    }

    /// Whether the event type was declared managed, or currently has at
    /// least one live subscriber.
    pub fn is_managed_event(&self, event_type: &str) -> bool {
        let key = normalize(event_type);
        self.managed.contains(key.as_str()) || self.has_listeners(&key)
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn normalize(event_type: &str) -> String {
    event_type.to_lowercase()
}
