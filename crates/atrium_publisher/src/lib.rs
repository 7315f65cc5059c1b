//! # Atrium Publisher
//!
//! Component event publish/subscribe hub for the Atrium component framework.
//! Components subscribe to named events as a side effect of their page
//! loading; any code can later trigger an event by name and the hub delivers
//! it to every subscriber on the currently active page.
//!
//! ## Core Pieces
//!
//! - **[`EventRegistry`]**: case-insensitive mapping from event type to the
//!   listeners bound to it, safe for concurrent request threads, with an
//!   atomic [`EventRegistry::clear`] for component class reloads.
//! - **[`Publisher`]**: subscription registration plus the trigger entry
//!   points. Dispatch snapshots the subscriber set, filters it through the
//!   [`ActivePageFilter`] collaborator, attaches every surviving page to the
//!   current request, then invokes every survivor and OR-aggregates their
//!   "handled" results.
//! - **[`DiagnosticsRegistry`]** and [`PublisherDashboard`]: descriptive
//!   trigger/handler/listener records for operators; never consulted by
//!   dispatch.
//!
//! Listeners plug in through capability traits ([`IdentityAddressable`],
//! [`ComponentHandle`]) rather than reflection; an object that resolves to
//! no capability is silently never subscribed.
//!
//! ## Quick Start Example
//!
//! ```rust
//! use atrium_publisher::{
//!     create_publisher, ActivePageFilter, ComponentHandle, EventCallback, EventContext,
//!     IdentityAddressable, ListenerCapability, ListenerId, PageLifecycleHub, PublishError,
//! };
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct EveryPageActive;
//!
//! #[async_trait]
//! impl ActivePageFilter for EveryPageActive {
//!     async fn is_active(&self, _listener: &ListenerId) -> bool {
//!         true
//!     }
//!     async fn attach(&self, _listener: &ListenerId) -> Result<(), PublishError> {
//!         Ok(())
//!     }
//! }
//!
//! struct RefreshButton;
//!
//! #[async_trait]
//! impl ComponentHandle for RefreshButton {
//!     fn complete_id(&self) -> ListenerId {
//!         ListenerId::new("orders:refresh")
//!     }
//!     fn page_name(&self) -> String {
//!         "orders".to_string()
//!     }
//!     fn page_lifecycle(&self) -> Option<Arc<dyn PageLifecycleHub>> {
//!         None
//!     }
//!     async fn deliver_event(
//!         &self,
//!         _event_type: &str,
//!         _context: &EventContext,
//!         _callback: Option<&dyn EventCallback>,
//!     ) -> Result<bool, PublishError> {
//!         Ok(true)
//!     }
//! }
//!
//! struct Listener(Arc<RefreshButton>);
//!
//! impl IdentityAddressable for Listener {
//!     fn capability(&self) -> ListenerCapability {
//!         ListenerCapability::Component(self.0.clone())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), PublishError> {
//!     let publisher = create_publisher(Arc::new(EveryPageActive));
//!
//!     publisher.subscribe("Refresh", &Listener(Arc::new(RefreshButton)));
//!
//!     // Event type matching is case-insensitive.
//!     let handled = publisher.trigger_event("refresh", Vec::new(), None).await?;
//!     assert!(handled);
//!     Ok(())
//! }
//! ```

mod component;
mod dashboard;
mod diagnostics;
mod error;
mod links;
mod publisher;
mod registry;
mod request;
mod stats;
mod types;


pub use component::{
    ComponentHandle, EventCallback, IdentityAddressable, ListenerCapability, PageLifecycleHub,
};
pub use dashboard::PublisherDashboard;
pub use diagnostics::DiagnosticsRegistry;
pub use error::PublishError;
pub use links::{add_active_page_parameter, EventLink};
pub use publisher::{create_publisher, create_publisher_with_managed_events, Publisher};
pub use registry::{EventRegistry, WILDCARD_EVENT};
pub use request::{
    store_active_page, ActivePageFilter, PageSource, Request, RequestActivePageFilter,
    ACTIVE_PAGE_PARAMETER,
};
pub use stats::PublisherStats;
pub use types::{EventContext, ListenerId, MethodRef};
