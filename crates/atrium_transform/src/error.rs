/// Load-time configuration errors.
///
/// These indicate a programming error in a component author's code and are
/// fatal: class loading fails and the error must never be caught or
/// downgraded.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// A method-level subscribe marker named event types. Event names on
    /// methods must come from the explicit event-name annotation.
    #[error(
        "subscribe marker on method {method} must not name event types ({values:?}); \
         use the event-name annotation to specify the event"
    )]
    MethodMarkerWithEvents { method: String, values: Vec<String> },

    /// A class-level subscribe marker named no event types.
    #[error("subscribe marker on class {class} must name at least one event type")]
    ClassMarkerWithoutEvents { class: String },

    /// A subscribe-marked method has no event-name annotation and its name
    /// does not follow the handler naming convention.
    #[error(
        "cannot derive an event type for subscribe-marked method {method}; \
         name it on_<event> or add the event-name annotation"
    )]
    MethodMarkerUnresolvable { method: String },
}
