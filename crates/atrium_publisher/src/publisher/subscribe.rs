/// Subscription registration methods
use super::core::Publisher;
use crate::component::{IdentityAddressable, ListenerCapability};
use crate::types::ListenerId;
use tracing::debug;

impl Publisher {
    /// Subscribes a listener to an event type.
    ///
    /// The listener's capability is resolved exactly once, here. An object
    /// that exposes no component handle cannot be addressed by the hub and
    /// is silently skipped: subscription happens as a side effect of page
    /// construction and a resolution failure must never abort it.
    ///
    /// Re-subscribing the same identity replaces the previous binding.
    pub fn subscribe(&self, event_type: &str, listener: &dyn IdentityAddressable) {
        let handle = match listener.capability() {
            ListenerCapability::Component(handle) => handle,
            ListenerCapability::Lifecycle(_) => {
                debug!("listener for {} has no component handle, not subscribing", event_type);
                return;
            }
            ListenerCapability::Neither => {
                debug!("unresolvable listener for {}, not subscribing", event_type);
                return;
            }
        };

        let id = handle.complete_id();

        if let Some(previous) = self.registry.subscribe(event_type, id.clone(), handle) {
            self.diagnostics
                .remove_listener(event_type, &previous.complete_id());
        }
        self.diagnostics.add_listener(event_type, id.clone());

        let mut stats = self.stats.write();
        stats.subscriptions += 1;
        drop(stats);

        debug!("📝 subscribed {} to {}", id, event_type);
    }

    /// Removes the listener's binding for the event type, if present.
    pub fn unsubscribe(&self, event_type: &str, id: &ListenerId) {
        if self.registry.unsubscribe(event_type, id).is_some() {
            self.diagnostics.remove_listener(event_type, id);
            debug!("unsubscribed {} from {}", id, event_type);
        }
    }
}
