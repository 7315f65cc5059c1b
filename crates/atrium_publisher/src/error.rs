use crate::types::ListenerId;

/// Errors that can surface from the publisher at dispatch time.
///
/// Subscription-side failures are deliberately absent: an unresolvable
/// listener is a silent no-op, because subscription happens as a side effect
/// of component construction and must never abort page assembly.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// A subscriber's event callback failed. The hub does not catch this;
    /// it propagates to whoever invoked the trigger.
    #[error("delivery to {listener} failed: {message}")]
    Delivery {
        listener: ListenerId,
        message: String,
    },
    /// A target page could not be materialized during the attach phase,
    /// before any delivery started.
    #[error("failed to attach page {page}: {message}")]
    Attach { page: String, message: String },
    /// Payload coercion failed when converting values to the opaque
    /// payload sequence.
    #[error("payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
