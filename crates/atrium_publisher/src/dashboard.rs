//! Read-only operator view over the publisher's registries.

use crate::error::PublishError;
use crate::publisher::Publisher;
use crate::request::PageSource;
use crate::types::{ListenerId, MethodRef};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Operator-facing dashboard: which event types exist, who listens, and
/// which methods were discovered to trigger or handle each one. Never used
/// by business logic.
pub struct PublisherDashboard {
    publisher: Arc<Publisher>,
}

impl PublisherDashboard {
    pub fn new(publisher: Arc<Publisher>) -> Self {
        Self { publisher }
    }

    pub fn event_types(&self) -> BTreeSet<String> {
        self.publisher.event_types()
    }

    pub fn listeners(&self, event_type: &str) -> Vec<ListenerId> {
        self.publisher.listeners_of(event_type)
    }

    pub fn triggers(&self, event_type: &str) -> Vec<MethodRef> {
        self.publisher.triggers_of(event_type)
    }

    pub fn handlers(&self, event_type: &str) -> Vec<MethodRef> {
        self.publisher.handlers_of(event_type)
    }

    /// Materializes every known page so lazily-constructed components get a
    /// chance to register their subscriptions before the dashboard renders.
    pub async fn force_load(&self, pages: &dyn PageSource) -> Result<(), PublishError> {
        for page_name in pages.page_names() {
            pages.load(&page_name).await?;
        }
        Ok(())
    }
}
