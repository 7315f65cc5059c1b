//! Introspection registries backing the operator dashboard.
//!
//! Listener, trigger and handler records are descriptive only: dispatch
//! never reads them. They are rebuilt from scratch after every reset.

use crate::registry::normalize;
use crate::types::{ListenerId, MethodRef};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Default)]
struct DiagnosticsInner {
    listeners: BTreeMap<String, Vec<ListenerId>>,
    triggers: BTreeMap<String, Vec<MethodRef>>,
    handlers: BTreeMap<String, Vec<MethodRef>>,
}

/// Diagnostic mirror of the hub: who listens to what, which methods trigger
/// which events, and which methods handle them.
pub struct DiagnosticsRegistry {
    inner: RwLock<DiagnosticsInner>,
}

impl DiagnosticsRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(DiagnosticsInner::default()),
        }
    }

    pub fn add_listener(&self, event_type: &str, id: ListenerId) {
        let mut inner = self.inner.write();
        inner
            .listeners
            .entry(normalize(event_type))
            .or_default()
            .push(id);
    }

    /// Removes one occurrence of `id` from the event type's listener list.
    pub fn remove_listener(&self, event_type: &str, id: &ListenerId) {
        let mut inner = self.inner.write();
        if let Some(listeners) = inner.listeners.get_mut(&normalize(event_type)) {
            if let Some(position) = listeners.iter().position(|entry| entry == id) {
                listeners.remove(position);
            }
        }
    }

    pub fn add_trigger(&self, event_type: &str, method: MethodRef) {
        let mut inner = self.inner.write();
        inner
            .triggers
            .entry(normalize(event_type))
            .or_default()
            .push(method);
    }

    pub fn add_event_handler(&self, event_type: &str, method: MethodRef) {
        let mut inner = self.inner.write();
        inner
            .handlers
            .entry(normalize(event_type))
            .or_default()
            .push(method);
    }

    pub fn listeners(&self, event_type: &str) -> Vec<ListenerId> {
        self.inner
            .read()
            .listeners
            .get(&normalize(event_type))
            .cloned()
            .unwrap_or_default()
    }

    pub fn triggers(&self, event_type: &str) -> Vec<MethodRef> {
        self.inner
            .read()
            .triggers
            .get(&normalize(event_type))
            .cloned()
            .unwrap_or_default()
    }

    pub fn handlers(&self, event_type: &str) -> Vec<MethodRef> {
        self.inner
            .read()
            .handlers
            .get(&normalize(event_type))
            .cloned()
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.listeners.clear();
        inner.triggers.clear();
        inner.handlers.clear();
    }
}

impl Default for DiagnosticsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
