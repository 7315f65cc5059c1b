//! Capability traits connecting host components to the publisher.
//!
//! A listener object never hands the hub raw access to its internals.
//! Instead it exposes a [`ListenerCapability`] through [`IdentityAddressable`],
//! resolved exactly once at subscribe time. Objects that resolve to
//! [`ListenerCapability::Neither`] simply never become subscribers.

use crate::error::PublishError;
use crate::types::{EventContext, ListenerId};
use async_trait::async_trait;
use std::sync::Arc;

/// Opaque result sink threaded through dispatch to every subscriber.
///
/// Handlers that produce a value push it here; returning `true` tells the
/// component that event processing is complete. The hub itself never reads
/// the result.
pub trait EventCallback: Send + Sync {
    fn handle_result(&self, value: serde_json::Value) -> bool;
}

/// Per-page lifecycle hook registry.
///
/// Page-loaded callbacks run exactly once, after the owning page instance is
/// fully assembled. This is the point at which auto-subscription fires.
pub trait PageLifecycleHub: Send + Sync {
    fn add_page_loaded_callback(&self, callback: Box<dyn FnOnce() + Send>);
}

/// The handle stored in the registry for each subscription: everything the
/// hub needs to address a component and hand it an event.
#[async_trait]
pub trait ComponentHandle: Send + Sync {
    /// Stable unique identity of this component instance.
    fn complete_id(&self) -> ListenerId;

    /// Name of the page that owns this component.
    fn page_name(&self) -> String;

    /// The lifecycle hub of the owning page, when the component knows it.
    fn page_lifecycle(&self) -> Option<Arc<dyn PageLifecycleHub>>;

    /// Delivers an event to this component. Returns whether the component
    /// handled it. Errors are the component's own and propagate untouched.
    async fn deliver_event(
        &self,
        event_type: &str,
        context: &EventContext,
        callback: Option<&dyn EventCallback>,
    ) -> Result<bool, PublishError>;
}

/// What a listener object turned out to be, resolved once at subscribe time.
pub enum ListenerCapability {
    /// The object is itself a page lifecycle hub (but not addressable as a
    /// component).
    Lifecycle(Arc<dyn PageLifecycleHub>),
    /// The object is a page component with a registry handle.
    Component(Arc<dyn ComponentHandle>),
    /// Neither: treated as a resolution failure, the object is silently
    /// never subscribed.
    Neither,
}

/// Capability a listener must implement to be subscribable.
pub trait IdentityAddressable: Send + Sync {
    fn capability(&self) -> ListenerCapability;
}
