/// Publisher lifecycle and diagnostic read surface
use super::core::Publisher;
use crate::types::{ListenerId, MethodRef};
use std::collections::BTreeSet;
use tracing::info;

impl Publisher {
    /// Drops every subscription and every diagnostic record.
    ///
    /// Called when the set of component classes changes (hot reload in the
    /// host environment): all bindings are stale at that point and must be
    /// re-established by listeners re-subscribing. The subscription drop is
    /// atomic relative to concurrent readers. Managed event declarations
    /// survive, they are configuration rather than subscription state.
    pub fn reset(&self) {
        self.registry.clear();
        self.diagnostics.clear();

        let mut stats = self.stats.write();
        stats.resets += 1;
        drop(stats);

        info!("🗑️ publisher reset, all subscriptions dropped");
    }

    /// Declares event types as managed regardless of subscriber presence.
    pub fn add_managed_events<I, S>(&self, event_types: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.registry.add_managed_events(event_types);
    }

    /// Whether request-scoped metadata should be attached to links for this
    /// event type: true when it was declared managed or currently has a
    /// live subscriber.
    pub fn is_managed_event(&self, event_type: &str) -> bool {
        self.registry.is_managed_event(event_type)
    }

    /// Every event type with at least one subscriber, plus the wildcard.
    pub fn event_types(&self) -> BTreeSet<String> {
        self.registry.event_types()
    }

    /// Identities subscribed to the event type (dashboard view).
    pub fn listeners_of(&self, event_type: &str) -> Vec<ListenerId> {
        self.diagnostics.listeners(event_type)
    }

    /// Methods statically discovered to trigger the event type.
    pub fn triggers_of(&self, event_type: &str) -> Vec<MethodRef> {
        self.diagnostics.triggers(event_type)
    }

    /// Methods statically discovered to handle the event type.
    pub fn handlers_of(&self, event_type: &str) -> Vec<MethodRef> {
        self.diagnostics.handlers(event_type)
    }
}
