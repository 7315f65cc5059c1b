//! Core identifier and payload types shared across the publisher.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::PublishError;

/// Unique identifier for a subscribed listener.
///
/// The identity is the hierarchical path of a component within its containing
/// page, in `"PageName:component.path"` form (a bare page is just
/// `"PageName"`). It is stable for the lifetime of a component instance and
/// unique among live instances, which is what lets the registry use
/// last-registration-wins semantics per identity.
///
/// # Examples
///
/// ```rust
/// use atrium_publisher::ListenerId;
///
/// let id = ListenerId::new("checkout:cart.total");
/// assert_eq!(id.page_name(), "checkout");
///
/// let page = ListenerId::new("checkout");
/// assert_eq!(page.page_name(), "checkout");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListenerId(String);

impl ListenerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the page that owns this listener: the path prefix before the
    /// first `:`, or the whole identity for a bare page.
    pub fn page_name(&self) -> &str {
        match self.0.split_once(':') {
            Some((page, _)) => page,
            None => &self.0,
        }
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ListenerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ListenerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque event payload: an ordered sequence of JSON values.
///
/// The hub never inspects the payload; it is carried verbatim to every
/// eligible subscriber. Both trigger entry points converge on this type, so
/// how callers package their values is their own business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventContext {
    values: Vec<Value>,
}

impl EventContext {
    /// An empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Coerces arbitrary serializable values into a payload sequence.
    pub fn coerce<T: Serialize>(values: &[T]) -> Result<Self, PublishError> {
        let values = values
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { values })
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl From<Vec<Value>> for EventContext {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

/// Diagnostic reference to a method discovered by the load-time introspector:
/// the declaring class plus the method name.
///
/// These records feed the operator dashboard only; runtime dispatch never
/// consults them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRef {
    pub class_name: String,
    pub method_name: String,
}

impl MethodRef {
    pub fn new(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
        }
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.class_name, self.method_name)
    }
}
