//! Declarative auto-subscription.
//!
//! Classes carrying a subscribe marker get their instances subscribed to the
//! declared event types automatically, once the owning page finishes
//! loading. Marker misuse is fatal at class-load time.

use crate::error::TransformError;
use crate::introspect::handler_event_type;
use crate::model::{ComponentClass, ComponentMethod};
use atrium_publisher::{IdentityAddressable, ListenerCapability, Publisher};
use std::sync::Arc;
use tracing::debug;

/// Validates subscribe markers on a component class and turns them into a
/// [`SubscriptionPlan`].
pub struct SubscribeWorker {
    publisher: Arc<Publisher>,
}

impl SubscribeWorker {
    pub fn new(publisher: Arc<Publisher>) -> Self {
        Self { publisher }
    }

    /// Collects the declared event types for the class.
    ///
    /// Returns `Ok(None)` when the class declares nothing. Marker misuse
    /// (a bare class-level marker, or a method-level marker carrying event
    /// names) fails class loading with a descriptive error.
    pub fn transform(
        &self,
        class: &ComponentClass,
    ) -> Result<Option<SubscriptionPlan>, TransformError> {
        let mut event_types = Vec::new();

        self.collect_class_events(class, &mut event_types)?;
        self.collect_method_events(class, &mut event_types)?;

        if event_types.is_empty() {
            return Ok(None);
        }

        Ok(Some(SubscriptionPlan {
            class_name: class.name.clone(),
            event_types,
            publisher: self.publisher.clone(),
        }))
    }

    fn collect_class_events(
        &self,
        class: &ComponentClass,
        event_types: &mut Vec<String>,
    ) -> Result<(), TransformError> {
        let Some(values) = &class.subscribe else {
            return Ok(());
        };
        if values.is_empty() {
            return Err(TransformError::ClassMarkerWithoutEvents {
                class: class.name.clone(),
            });
        }
        event_types.extend(values.iter().cloned());
        Ok(())
    }

    fn collect_method_events(
        &self,
        class: &ComponentClass,
        event_types: &mut Vec<String>,
    ) -> Result<(), TransformError> {
        for method in &class.methods {
            let Some(values) = &method.subscribe else {
                continue;
            };
            if !values.is_empty() {
                return Err(TransformError::MethodMarkerWithEvents {
                    method: method_identifier(class, method),
                    values: values.clone(),
                });
            }
            event_types.push(self.extract_event_type(class, method)?);
        }
        Ok(())
    }

    /// The explicit event-name annotation takes precedence; the naming
    /// convention is the fallback.
    fn extract_event_type(
        &self,
        class: &ComponentClass,
        method: &ComponentMethod,
    ) -> Result<String, TransformError> {
        if let Some(event_type) = &method.on_event {
            return Ok(event_type.clone());
        }
        handler_event_type(&method.name).ok_or_else(|| TransformError::MethodMarkerUnresolvable {
            method: method_identifier(class, method),
        })
    }
}

fn method_identifier(class: &ComponentClass, method: &ComponentMethod) -> String {
    format!("{}::{}", class.name, method.name)
}

/// The event types a class's instances subscribe to, plus the wiring that
/// makes it happen.
///
/// Per instance the lifecycle is `Constructed -> awaiting page-loaded ->
/// Subscribed`, and `Subscribed` is terminal: the page-loaded callback runs
/// once and is consumed. A recreated page produces a fresh instance that
/// goes through the same steps independently.
#[derive(Debug)]
pub struct SubscriptionPlan {
    class_name: String,
    event_types: Vec<String>,
    publisher: Arc<Publisher>,
}

impl SubscriptionPlan {
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn event_types(&self) -> &[String] {
        &self.event_types
    }

    /// Hooks a freshly constructed instance up for auto-subscription: once
    /// its page reports loaded, the instance is subscribed to every declared
    /// event type.
    ///
    /// An instance whose capability yields no lifecycle hub cannot be wired
    /// and is silently skipped, like any other resolution failure.
    pub fn wire(&self, instance: Arc<dyn IdentityAddressable>) {
        let hub = match instance.capability() {
            ListenerCapability::Lifecycle(hub) => hub,
            ListenerCapability::Component(handle) => match handle.page_lifecycle() {
                Some(hub) => hub,
                None => {
                    debug!("instance of {} has no page lifecycle hub, not wiring", self.class_name);
                    return;
                }
            },
            ListenerCapability::Neither => {
                debug!("unresolvable instance of {}, not wiring", self.class_name);
                return;
            }
        };

        let publisher = self.publisher.clone();
        let event_types = self.event_types.clone();
        let class_name = self.class_name.clone();
        hub.add_page_loaded_callback(Box::new(move || {
            for event_type in &event_types {
                publisher.subscribe(event_type, instance.as_ref());
            }
            debug!(
                "subscribed instance of {} to {} event type(s)",
                class_name,
                event_types.len()
            );
        }));
    }
}
