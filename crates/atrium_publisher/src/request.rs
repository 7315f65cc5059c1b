//! Active-page scoping: the collaborator deciding which subscribers are
//! eligible in the current request, plus the request-backed production
//! implementation.

use crate::error::PublishError;
use crate::types::ListenerId;
use async_trait::async_trait;
use std::sync::Arc;

/// Name of the URL parameter and request attribute carrying the active page
/// name. It is appended to event links for managed event types and stored
/// back into the request on form submission.
pub const ACTIVE_PAGE_PARAMETER: &str = "t:ap";

/// Decides which listeners are eligible for delivery in the current request
/// context, and materializes their owning pages before dispatch.
#[async_trait]
pub trait ActivePageFilter: Send + Sync {
    /// Whether the listener belongs to the currently active page.
    async fn is_active(&self, listener: &ListenerId) -> bool;

    /// Ensures the listener's owning page is attached to the current
    /// request. Called for every eligible listener before any delivery.
    async fn attach(&self, listener: &ListenerId) -> Result<(), PublishError>;
}

/// Minimal view of the current request the filter needs.
pub trait Request: Send + Sync {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn parameter(&self, name: &str) -> Option<String>;
}

/// Page cache collaborator: loads pages into the current request and
/// enumerates the known page names.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn load(&self, page_name: &str) -> Result<(), PublishError>;

    fn page_names(&self) -> Vec<String>;
}

/// Stores the submitted active-page name as a request attribute, so lookups
/// later in the same request see it before falling back to URL parameters.
pub fn store_active_page(request: &dyn Request, active_page_name: &str) {
    request.set_attribute(ACTIVE_PAGE_PARAMETER, active_page_name);
}

/// [`ActivePageFilter`] backed by the current request: a listener is active
/// when its page matches the request's active-page attribute or parameter,
/// and attaching goes through the page cache.
pub struct RequestActivePageFilter {
    request: Arc<dyn Request>,
    pages: Arc<dyn PageSource>,
}

impl RequestActivePageFilter {
    pub fn new(request: Arc<dyn Request>, pages: Arc<dyn PageSource>) -> Self {
        Self { request, pages }
    }

    fn active_page_name(&self) -> Option<String> {
        self.request
            .attribute(ACTIVE_PAGE_PARAMETER)
            .or_else(|| self.request.parameter(ACTIVE_PAGE_PARAMETER))
    }
}

#[async_trait]
impl ActivePageFilter for RequestActivePageFilter {
    async fn is_active(&self, listener: &ListenerId) -> bool {
        match self.active_page_name() {
            Some(active) => listener.page_name() == active,
            None => false,
        }
    }

    async fn attach(&self, listener: &ListenerId) -> Result<(), PublishError> {
        self.pages.load(listener.page_name()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeRequest {
        attributes: Mutex<HashMap<String, String>>,
        parameters: HashMap<String, String>,
    }

    impl FakeRequest {
        fn new() -> Self {
            Self {
                attributes: Mutex::new(HashMap::new()),
                parameters: HashMap::new(),
            }
        }

        fn with_parameter(mut self, name: &str, value: &str) -> Self {
            self.parameters.insert(name.to_string(), value.to_string());
            self
        }
    }

    impl Request for FakeRequest {
        fn attribute(&self, name: &str) -> Option<String> {
            self.attributes.lock().unwrap().get(name).cloned()
        }

        fn set_attribute(&self, name: &str, value: &str) {
            self.attributes
                .lock()
                .unwrap()
                .insert(name.to_string(), value.to_string());
        }

        fn parameter(&self, name: &str) -> Option<String> {
            self.parameters.get(name).cloned()
        }
    }

    struct FakePages {
        loaded: Mutex<Vec<String>>,
    }

    impl FakePages {
        fn new() -> Self {
            Self {
                loaded: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageSource for FakePages {
        async fn load(&self, page_name: &str) -> Result<(), PublishError> {
            self.loaded.lock().unwrap().push(page_name.to_string());
            Ok(())
        }

        fn page_names(&self) -> Vec<String> {
            vec!["checkout".to_string(), "orders".to_string()]
        }
    }

    #[tokio::test]
    async fn parameter_marks_page_active() {
        let request = Arc::new(FakeRequest::new().with_parameter(ACTIVE_PAGE_PARAMETER, "checkout"));
        let filter = RequestActivePageFilter::new(request, Arc::new(FakePages::new()));

        assert!(filter.is_active(&ListenerId::new("checkout:cart")).await);
        assert!(!filter.is_active(&ListenerId::new("orders:grid")).await);
    }

    #[tokio::test]
    async fn stored_attribute_wins_over_parameter() {
        let request = Arc::new(FakeRequest::new().with_parameter(ACTIVE_PAGE_PARAMETER, "orders"));
        store_active_page(request.as_ref(), "checkout");
        let filter = RequestActivePageFilter::new(request, Arc::new(FakePages::new()));

        assert!(filter.is_active(&ListenerId::new("checkout:cart")).await);
    }

    #[tokio::test]
    async fn no_active_page_means_nothing_is_active() {
        let request = Arc::new(FakeRequest::new());
        let filter = RequestActivePageFilter::new(request, Arc::new(FakePages::new()));

        assert!(!filter.is_active(&ListenerId::new("checkout:cart")).await);
    }

    #[tokio::test]
    async fn attach_loads_the_owning_page() {
        let pages = Arc::new(FakePages::new());
        let request = Arc::new(FakeRequest::new());
        let filter = RequestActivePageFilter::new(request, pages.clone());

        filter.attach(&ListenerId::new("checkout:cart")).await.unwrap();
        assert_eq!(*pages.loaded.lock().unwrap(), vec!["checkout".to_string()]);
    }
}
