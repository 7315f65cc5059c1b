//! Event link decoration.
//!
//! Component event links for managed event types carry the active-page
//! parameter, so that when the resulting request arrives the filter can
//! scope delivery back to the page the link was rendered on. This is a pure
//! hint: nothing in dispatch depends on it.

use crate::registry::EventRegistry;
use crate::request::ACTIVE_PAGE_PARAMETER;
use std::collections::BTreeMap;

/// A component event link under construction: a base URI plus query
/// parameters.
#[derive(Debug, Clone, Default)]
pub struct EventLink {
    base: String,
    parameters: BTreeMap<String, String>,
}

impl EventLink {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn add_parameter(&mut self, name: &str, value: &str) {
        self.parameters.insert(name.to_string(), value.to_string());
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn to_uri(&self) -> String {
        if self.parameters.is_empty() {
            return self.base.clone();
        }
        let query = self
            .parameters
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.base, query)
    }
}

/// Appends the active-page parameter to a freshly created component event
/// link when its event type is managed.
pub fn add_active_page_parameter(
    registry: &EventRegistry,
    link: &mut EventLink,
    event_type: &str,
    active_page_name: &str,
) {
    if registry.is_managed_event(event_type) {
        link.add_parameter(ACTIVE_PAGE_PARAMETER, active_page_name);
    }
}
