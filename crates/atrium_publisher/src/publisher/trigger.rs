/// Event trigger methods
use super::core::Publisher;
use crate::component::EventCallback;
use crate::error::PublishError;
use crate::types::EventContext;
use futures::future::try_join_all;
use serde_json::Value;
use tracing::debug;

impl Publisher {
    /// Triggers an event with positional payload values.
    ///
    /// Returns whether any subscriber handled the event.
    pub async fn trigger_event(
        &self,
        event_type: &str,
        values: Vec<Value>,
        callback: Option<&dyn EventCallback>,
    ) -> Result<bool, PublishError> {
        let context = EventContext::from_values(values);
        self.dispatch(event_type, &context, callback).await
    }

    /// Triggers an event with an already-packaged payload context.
    pub async fn trigger_context_event(
        &self,
        event_type: &str,
        context: &EventContext,
        callback: Option<&dyn EventCallback>,
    ) -> Result<bool, PublishError> {
        self.dispatch(event_type, context, callback).await
    }

    /// Internal dispatch implementation shared by both trigger entry points.
    ///
    /// The subscriber set is a snapshot taken up front: subscriptions added
    /// while dispatch runs are not retroactively included, and no registry
    /// lock is held while subscriber callbacks execute, so callbacks may
    /// freely re-enter the publisher.
    async fn dispatch(
        &self,
        event_type: &str,
        context: &EventContext,
        callback: Option<&dyn EventCallback>,
    ) -> Result<bool, PublishError> {
        let snapshot = self.registry.snapshot(event_type);
        if snapshot.is_empty() {
            return Ok(false);
        }

        {
            let mut stats = self.stats.write();
            stats.events_triggered += 1;
        }

        let mut eligible = Vec::with_capacity(snapshot.len());
        for (id, handle) in snapshot {
            if self.filter.is_active(&id).await {
                eligible.push((id, handle));
            }
        }

        // Every target page must be attached to the current request before
        // any callback fires; delivering to a component on an unattached
        // page is undefined in the host environment.
        try_join_all(eligible.iter().map(|(id, _)| self.filter.attach(id))).await?;

        let mut handled = false;
        for (id, handle) in &eligible {
            debug!("📤 delivering {} to {}", event_type, id);
            handled |= handle.deliver_event(event_type, context, callback).await?;
        }

        let mut stats = self.stats.write();
        stats.deliveries += eligible.len() as u64;
        if handled {
            stats.events_handled += 1;
        }

        Ok(handled)
    }
}
