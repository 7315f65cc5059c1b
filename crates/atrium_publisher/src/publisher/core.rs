/// Core Publisher implementation
use crate::diagnostics::DiagnosticsRegistry;
use crate::registry::EventRegistry;
use crate::request::ActivePageFilter;
use crate::stats::PublisherStats;
use parking_lot::RwLock;
use std::sync::Arc;

/// The component event publish/subscribe hub.
///
/// This is the central meeting point between components that subscribe to
/// named events and the code that triggers them. Subscriptions are
/// request-thread safe; delivery is scoped to the currently active page by
/// the [`ActivePageFilter`] collaborator.
pub struct Publisher {
    /// Live event-type to listener bindings
    pub(super) registry: EventRegistry,
    /// Descriptive records for the operator dashboard
    pub(super) diagnostics: DiagnosticsRegistry,
    /// Decides delivery eligibility and attaches target pages
    pub(super) filter: Arc<dyn ActivePageFilter>,
    /// Usage counters for monitoring
    pub(super) stats: RwLock<PublisherStats>,
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("registry", &"[registry]")
            .field("diagnostics", &"[diagnostics]")
            .field("stats", &self.stats.read())
            .finish()
    }
}

impl Publisher {
    /// Creates a new publisher with no subscriptions.
    pub fn new(filter: Arc<dyn ActivePageFilter>) -> Self {
        Self {
            registry: EventRegistry::new(),
            diagnostics: DiagnosticsRegistry::new(),
            filter,
            stats: RwLock::new(PublisherStats::default()),
        }
    }

    /// The live subscription registry.
    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    /// The diagnostic record registries (dashboard only).
    pub fn diagnostics(&self) -> &DiagnosticsRegistry {
        &self.diagnostics
    }

    /// Gets the current publisher usage counters.
    pub fn stats(&self) -> PublisherStats {
        self.stats.read().clone()
    }
}
