/// Publisher service, broken down into manageable components
mod core;
mod management;
mod subscribe;
mod trigger;

pub use self::core::Publisher;

use crate::request::ActivePageFilter;
use std::sync::Arc;

/// Helper function to create a ready-to-share publisher
pub fn create_publisher(filter: Arc<dyn ActivePageFilter>) -> Arc<Publisher> {
    Arc::new(Publisher::new(filter))
}

/// Helper function to create a publisher with pre-declared managed events
pub fn create_publisher_with_managed_events<I, S>(
    filter: Arc<dyn ActivePageFilter>,
    managed_events: I,
) -> Arc<Publisher>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let publisher = Publisher::new(filter);
    publisher.add_managed_events(managed_events);
    Arc::new(publisher)
}
