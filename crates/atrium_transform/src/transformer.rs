//! The load-time transform pipeline.

use crate::error::TransformError;
use crate::introspect::TriggersIntrospector;
use crate::model::ComponentClass;
use crate::worker::{SubscribeWorker, SubscriptionPlan};
use atrium_publisher::Publisher;
use std::sync::Arc;
use tracing::info;

/// Runs every load-time pass over each component class: the trigger/handler
/// introspection first, then subscribe-marker processing.
pub struct ComponentTransformer {
    publisher: Arc<Publisher>,
    introspector: TriggersIntrospector,
    worker: SubscribeWorker,
}

impl ComponentTransformer {
    pub fn new(publisher: Arc<Publisher>) -> Self {
        Self {
            introspector: TriggersIntrospector::new(publisher.clone()),
            worker: SubscribeWorker::new(publisher.clone()),
            publisher,
        }
    }

    /// Processes one class definition. Returns its subscription plan when it
    /// carries subscribe markers; marker misuse fails the load.
    pub fn load_class(
        &self,
        class: &ComponentClass,
    ) -> Result<Option<SubscriptionPlan>, TransformError> {
        self.introspector.transform(class);
        self.worker.transform(class)
    }

    /// Handles a component class reload: drops every subscription and
    /// diagnostic record, then re-processes the new set of classes.
    /// Listeners re-establish their bindings as their pages reload.
    pub fn reload<'a, I>(&self, classes: I) -> Result<Vec<SubscriptionPlan>, TransformError>
    where
        I: IntoIterator<Item = &'a ComponentClass>,
    {
        self.publisher.reset();

        let mut plans = Vec::new();
        for class in classes {
            if let Some(plan) = self.load_class(class)? {
                plans.push(plan);
            }
        }

        info!("reloaded component classes, {} subscription plan(s)", plans.len());
        Ok(plans)
    }
}
