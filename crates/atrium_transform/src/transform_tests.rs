//! Tests for the load-time passes

use crate::{
    ComponentClass, ComponentMethod, ComponentTransformer, Insn, SubscribeWorker, TransformError,
    TriggersIntrospector, COMPONENT_HANDLE_TYPE, PUBLISHER_TYPE,
};
use atrium_publisher::{
    create_publisher, ActivePageFilter, ComponentHandle, EventCallback, EventContext,
    IdentityAddressable, ListenerCapability, ListenerId, MethodRef, PageLifecycleHub, PublishError,
    Publisher,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

struct AllActive;

#[async_trait]
impl ActivePageFilter for AllActive {
    async fn is_active(&self, _listener: &ListenerId) -> bool {
        true
    }

    async fn attach(&self, _listener: &ListenerId) -> Result<(), PublishError> {
        Ok(())
    }
}

fn new_publisher() -> Arc<Publisher> {
    create_publisher(Arc::new(AllActive))
}

// Lifecycle hub that queues page-loaded callbacks until the test fires them.
struct MockHub {
    callbacks: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
}

impl MockHub {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            callbacks: Mutex::new(Vec::new()),
        })
    }

    fn fire_page_loaded(&self) {
        let callbacks: Vec<_> = self.callbacks.lock().unwrap().drain(..).collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl PageLifecycleHub for MockHub {
    fn add_page_loaded_callback(&self, callback: Box<dyn FnOnce() + Send>) {
        self.callbacks.lock().unwrap().push(callback);
    }
}

struct MockInstance {
    id: ListenerId,
    hub: Arc<MockHub>,
    delivered: Mutex<Vec<String>>,
}

impl MockInstance {
    fn new(id: &str, hub: &Arc<MockHub>) -> Arc<Self> {
        Arc::new(Self {
            id: ListenerId::new(id),
            hub: hub.clone(),
            delivered: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ComponentHandle for MockInstance {
    fn complete_id(&self) -> ListenerId {
        self.id.clone()
    }

    fn page_name(&self) -> String {
        self.id.page_name().to_string()
    }

    fn page_lifecycle(&self) -> Option<Arc<dyn PageLifecycleHub>> {
        Some(self.hub.clone())
    }

    async fn deliver_event(
        &self,
        event_type: &str,
        _context: &EventContext,
        _callback: Option<&dyn EventCallback>,
    ) -> Result<bool, PublishError> {
        self.delivered.lock().unwrap().push(event_type.to_string());
        Ok(true)
    }
}

struct AsListener(Arc<MockInstance>);

impl IdentityAddressable for AsListener {
    fn capability(&self) -> ListenerCapability {
        ListenerCapability::Component(self.0.clone())
    }
}

fn listener(instance: &Arc<MockInstance>) -> Arc<dyn IdentityAddressable> {
    Arc::new(AsListener(instance.clone()))
}

#[test]
fn class_marker_subscribes_each_declared_event_after_page_loaded() {
    let publisher = new_publisher();
    let worker = SubscribeWorker::new(publisher.clone());

    let class = ComponentClass::new("OrderSummary").with_subscribe(["Foo", "Bar"]);
    let plan = worker.transform(&class).unwrap().expect("plan for marked class");
    assert_eq!(plan.event_types(), ["Foo", "Bar"]);

    let hub = MockHub::new();
    let instance = MockInstance::new("orders:summary", &hub);
    plan.wire(listener(&instance));

    // Nothing is bound until the page reports loaded.
    assert!(publisher.listeners_of("foo").is_empty());

    hub.fire_page_loaded();

    assert_eq!(publisher.listeners_of("Foo"), vec![ListenerId::new("orders:summary")]);
    assert_eq!(publisher.listeners_of("Bar"), vec![ListenerId::new("orders:summary")]);
    assert_eq!(publisher.stats().subscriptions, 2);
}

#[test]
fn the_subscribed_state_is_terminal() {
    let publisher = new_publisher();
    let worker = SubscribeWorker::new(publisher.clone());

    let class = ComponentClass::new("OrderSummary").with_subscribe(["Foo"]);
    let plan = worker.transform(&class).unwrap().unwrap();

    let hub = MockHub::new();
    let instance = MockInstance::new("orders:summary", &hub);
    plan.wire(listener(&instance));

    hub.fire_page_loaded();
    hub.fire_page_loaded();

    assert_eq!(publisher.stats().subscriptions, 1);
}

#[test]
fn bare_class_marker_fails_the_load() {
    let worker = SubscribeWorker::new(new_publisher());

    let class = ComponentClass::new("OrderSummary").with_subscribe_marker();
    let error = worker.transform(&class).expect_err("bare class marker is fatal");

    assert!(matches!(error, TransformError::ClassMarkerWithoutEvents { .. }));
    assert!(error.to_string().contains("OrderSummary"));
}

#[test]
fn method_marker_with_event_values_fails_the_load() {
    let worker = SubscribeWorker::new(new_publisher());

    let class = ComponentClass::new("OrderSummary").with_method(
        ComponentMethod::new("on_refresh").with_subscribe_values(["Refresh"]),
    );
    let error = worker.transform(&class).expect_err("valued method marker is fatal");

    assert!(matches!(error, TransformError::MethodMarkerWithEvents { .. }));
    assert!(error.to_string().contains("OrderSummary::on_refresh"));
}

#[test]
fn annotation_takes_precedence_over_the_method_name() {
    let worker = SubscribeWorker::new(new_publisher());

    let class = ComponentClass::new("OrderSummary").with_method(
        ComponentMethod::new("on_refresh")
            .with_on_event("Checkout")
            .with_subscribe_marker(),
    );
    let plan = worker.transform(&class).unwrap().unwrap();

    assert_eq!(plan.event_types(), ["Checkout"]);
}

#[test]
fn method_marker_falls_back_to_the_naming_convention() {
    let worker = SubscribeWorker::new(new_publisher());

    let class = ComponentClass::new("OrderSummary").with_method(
        ComponentMethod::new("on_refresh_from_grid").with_subscribe_marker(),
    );
    let plan = worker.transform(&class).unwrap().unwrap();

    assert_eq!(plan.event_types(), ["refresh"]);
}

#[test]
fn marked_method_outside_the_convention_fails_the_load() {
    let worker = SubscribeWorker::new(new_publisher());

    let class = ComponentClass::new("OrderSummary")
        .with_method(ComponentMethod::new("render").with_subscribe_marker());
    let error = worker.transform(&class).expect_err("underivable event type is fatal");

    assert!(matches!(error, TransformError::MethodMarkerUnresolvable { .. }));
}

#[test]
fn constant_trigger_argument_is_recorded() {
    let publisher = new_publisher();
    let introspector = TriggersIntrospector::new(publisher.clone());

    let class = ComponentClass::new("Cart").with_method(
        ComponentMethod::new("on_submit").with_body(vec![
            Insn::LoadField {
                name: "publisher".to_string(),
                type_name: PUBLISHER_TYPE.to_string(),
            },
            Insn::LoadConst("Checkout".to_string()),
            Insn::Invoke {
                owner: PUBLISHER_TYPE.to_string(),
                method: "trigger_event".to_string(),
            },
        ]),
    );
    introspector.transform(&class);

    assert_eq!(
        publisher.triggers_of("Checkout"),
        vec![MethodRef::new("Cart", "on_submit")]
    );
}

#[test]
fn variable_trigger_argument_records_the_wildcard() {
    let publisher = new_publisher();
    let introspector = TriggersIntrospector::new(publisher.clone());

    let class = ComponentClass::new("Cart").with_method(
        ComponentMethod::new("on_submit").with_body(vec![
            Insn::LoadField {
                name: "publisher".to_string(),
                type_name: PUBLISHER_TYPE.to_string(),
            },
            Insn::LoadLocal(1),
            Insn::Invoke {
                owner: PUBLISHER_TYPE.to_string(),
                method: "trigger_event".to_string(),
            },
        ]),
    );
    introspector.transform(&class);

    assert!(publisher.triggers_of("checkout").is_empty());
    assert_eq!(publisher.triggers_of("*"), vec![MethodRef::new("Cart", "on_submit")]);
}

#[test]
fn trigger_call_without_a_receiver_load_records_nothing() {
    let publisher = new_publisher();
    let introspector = TriggersIntrospector::new(publisher.clone());

    let class = ComponentClass::new("Cart").with_method(
        ComponentMethod::new("on_submit").with_body(vec![
            Insn::LoadConst("Checkout".to_string()),
            Insn::Invoke {
                owner: PUBLISHER_TYPE.to_string(),
                method: "trigger_event".to_string(),
            },
        ]),
    );
    introspector.transform(&class);

    assert!(publisher.triggers_of("Checkout").is_empty());
    assert!(publisher.triggers_of("*").is_empty());
}

#[test]
fn event_link_creation_counts_as_a_trigger() {
    let publisher = new_publisher();
    let introspector = TriggersIntrospector::new(publisher.clone());

    let class = ComponentClass::new("Cart").with_method(
        ComponentMethod::new("render_preview").with_body(vec![
            Insn::LoadField {
                name: "resources".to_string(),
                type_name: COMPONENT_HANDLE_TYPE.to_string(),
            },
            Insn::LoadConst("Preview".to_string()),
            Insn::Invoke {
                owner: COMPONENT_HANDLE_TYPE.to_string(),
                method: "create_event_link".to_string(),
            },
        ]),
    );
    introspector.transform(&class);

    assert_eq!(
        publisher.triggers_of("preview"),
        vec![MethodRef::new("Cart", "render_preview")]
    );
}

#[test]
fn handler_discovery_uses_exactly_one_strategy_per_method() {
    let publisher = new_publisher();
    let introspector = TriggersIntrospector::new(publisher.clone());

    let class = ComponentClass::new("Cart")
        .with_method(ComponentMethod::new("on_pick").with_on_event("Selected"))
        .with_method(ComponentMethod::new("on_checkout_from_cart"))
        .with_method(ComponentMethod::new("render"));
    introspector.transform(&class);

    // The annotated method is recorded under the annotation only.
    assert_eq!(publisher.handlers_of("Selected"), vec![MethodRef::new("Cart", "on_pick")]);
    assert!(publisher.handlers_of("pick").is_empty());
    assert_eq!(
        publisher.handlers_of("checkout"),
        vec![MethodRef::new("Cart", "on_checkout_from_cart")]
    );
    assert!(publisher.handlers_of("render").is_empty());
}

#[test]
fn reload_drops_stale_bindings_and_records() {
    let publisher = new_publisher();
    let transformer = ComponentTransformer::new(publisher.clone());

    let class = ComponentClass::new("OrderSummary").with_subscribe(["Refresh"]);
    let plan = transformer.load_class(&class).unwrap().unwrap();

    let hub = MockHub::new();
    let instance = MockInstance::new("orders:summary", &hub);
    plan.wire(listener(&instance));
    hub.fire_page_loaded();
    assert!(!publisher.listeners_of("refresh").is_empty());

    transformer.reload(Vec::<&ComponentClass>::new()).unwrap();

    assert!(publisher.listeners_of("refresh").is_empty());
    assert!(publisher.handlers_of("refresh").is_empty());
    assert_eq!(publisher.stats().resets, 1);
}

#[tokio::test]
async fn auto_subscribed_instances_receive_triggered_events() {
    let publisher = new_publisher();
    let transformer = ComponentTransformer::new(publisher.clone());

    let class = ComponentClass::new("OrderSummary").with_subscribe(["Refresh"]);
    let plan = transformer.load_class(&class).unwrap().unwrap();

    let hub = MockHub::new();
    let instance = MockInstance::new("orders:summary", &hub);
    plan.wire(listener(&instance));
    hub.fire_page_loaded();

    let handled = publisher.trigger_event("refresh", Vec::new(), None).await.unwrap();

    assert!(handled);
    assert_eq!(*instance.delivered.lock().unwrap(), vec!["refresh".to_string()]);
}
