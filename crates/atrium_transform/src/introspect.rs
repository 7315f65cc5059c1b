//! Static discovery of trigger and handler relationships.
//!
//! Runs once per class definition, at load time. The records it produces
//! feed the operator dashboard only; runtime dispatch never reads them.

use crate::model::{ComponentClass, ComponentMethod, Insn};
use atrium_publisher::{MethodRef, Publisher, WILDCARD_EVENT};
use std::sync::Arc;
use tracing::debug;

/// Type name of the publisher interface as it appears in compiled method
/// bodies.
pub const PUBLISHER_TYPE: &str = "Publisher";
/// Type name of the component handle interface in compiled method bodies.
pub const COMPONENT_HANDLE_TYPE: &str = "ComponentHandle";

const TRIGGER_METHOD_PREFIX: &str = "trigger";
const EVENT_LINK_METHOD_PREFIX: &str = "create_event_link";
const HANDLER_METHOD_PREFIX: &str = "on_";
const HANDLER_COMPONENT_QUALIFIER: &str = "_from_";

/// Scans every method of a component class for calls that trigger events
/// and for methods that handle them, recording both into the publisher's
/// diagnostics.
pub struct TriggersIntrospector {
    publisher: Arc<Publisher>,
}

impl TriggersIntrospector {
    pub fn new(publisher: Arc<Publisher>) -> Self {
        Self { publisher }
    }

    pub fn transform(&self, class: &ComponentClass) {
        for method in &class.methods {
            for (index, insn) in method.body.iter().enumerate() {
                if let Insn::Invoke { owner, method: callee } = insn {
                    self.check_trigger_call(
                        class,
                        method,
                        index,
                        owner,
                        callee,
                        PUBLISHER_TYPE,
                        TRIGGER_METHOD_PREFIX,
                    );
                    self.check_trigger_call(
                        class,
                        method,
                        index,
                        owner,
                        callee,
                        COMPONENT_HANDLE_TYPE,
                        EVENT_LINK_METHOD_PREFIX,
                    );
                }
            }

            if !self.record_annotated_handler(class, method) {
                self.record_conventional_handler(class, method);
            }
        }
    }

    /// Records a trigger when `callee` on `owner` matches a trigger entry
    /// point of `target_type`.
    ///
    /// The event type is recovered by walking backward from the call site to
    /// the instruction that loaded the receiver (a field typed as the target
    /// interface). The instruction that follows the receiver load is the
    /// first argument: a string constant names the event; anything else
    /// could be any event type, recorded as the wildcard. No receiver load
    /// means this call site tells us nothing.
    #[allow(clippy::too_many_arguments)]
    fn check_trigger_call(
        &self,
        class: &ComponentClass,
        method: &ComponentMethod,
        call_index: usize,
        owner: &str,
        callee: &str,
        target_type: &str,
        method_prefix: &str,
    ) {
        if owner != target_type || !callee.starts_with(method_prefix) {
            return;
        }

        let Some(receiver_index) = method.body[..call_index].iter().rposition(
            |insn| matches!(insn, Insn::LoadField { type_name, .. } if type_name == target_type),
        ) else {
            return;
        };

        let event_type = match method.body.get(receiver_index + 1) {
            Some(Insn::LoadConst(value)) => value.clone(),
            //  Variable? Could be any event type.
            _ => WILDCARD_EVENT.to_string(),
        };

        debug!("recording trigger of {} in {}::{}", event_type, class.name, method.name);
        self.publisher
            .diagnostics()
            .add_trigger(&event_type, MethodRef::new(&class.name, &method.name));
    }

    fn record_annotated_handler(&self, class: &ComponentClass, method: &ComponentMethod) -> bool {
        let Some(event_type) = &method.on_event else {
            return false;
        };
        self.publisher
            .diagnostics()
            .add_event_handler(event_type, MethodRef::new(&class.name, &method.name));
        true
    }

    fn record_conventional_handler(&self, class: &ComponentClass, method: &ComponentMethod) -> bool {
        let Some(event_type) = handler_event_type(&method.name) else {
            return false;
        };
        self.publisher
            .diagnostics()
            .add_event_handler(&event_type, MethodRef::new(&class.name, &method.name));
        true
    }
}

/// Derives the event type a handler method reacts to from its name:
/// `on_checkout` handles `checkout`, `on_checkout_from_cart` strips the
/// component qualifier and also handles `checkout`. Returns `None` for
/// names outside the convention.
pub(crate) fn handler_event_type(method_name: &str) -> Option<String> {
    let rest = method_name.strip_prefix(HANDLER_METHOD_PREFIX)?;
    let event_type = match rest.find(HANDLER_COMPONENT_QUALIFIER) {
        Some(index) => &rest[..index],
        None => rest,
    };
    if event_type.is_empty() {
        None
    } else {
        Some(event_type.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_event_type_follows_the_naming_convention() {
        assert_eq!(handler_event_type("on_checkout"), Some("checkout".to_string()));
        assert_eq!(
            handler_event_type("on_checkout_from_cart"),
            Some("checkout".to_string())
        );
        assert_eq!(handler_event_type("render"), None);
        assert_eq!(handler_event_type("on_"), None);
        assert_eq!(handler_event_type("on_from_cart"), None);
    }
}
