use std::sync::Arc;

use chassis_events::{Dispatcher, Event, EventListener, Listener, Payload};
use chassis_ioc::{
  Arguments, Container, ContainerError, Injectable, Parameters, ServiceKey, Value,
};

// --- Test Fixtures ---

struct SampleEvent {
  pub name: String,
}

impl Injectable for SampleEvent {
  fn parameters() -> Parameters {
    Parameters::new().with("name", chassis_ioc::TypeHint::Untyped)
  }

  fn construct(arguments: &Arguments) -> Result<Self, ContainerError> {
    Ok(SampleEvent {
      name: arguments.cloned::<String>("name").unwrap_or_default(),
    })
  }
}

struct SampleListener;

impl Injectable for SampleListener {
  fn parameters() -> Parameters {
    Parameters::new()
  }

  fn construct(_: &Arguments) -> Result<Self, ContainerError> {
    Ok(SampleListener)
  }
}

impl EventListener for SampleListener {
  fn handle(&self, event: &Event, _: &Payload) -> Result<Value, ContainerError> {
    Ok(Value::new(format!("ok:{}", event.name())))
  }
}

// --- Dispatcher Tests ---

#[test]
fn registers_listeners_per_event() {
  let dispatcher = Dispatcher::new(Container::new());

  dispatcher.listen("sample", Listener::service::<SampleListener>());

  assert_eq!(dispatcher.listeners("sample").len(), 1);
  assert!(dispatcher.has_listeners("sample"));
  assert!(!dispatcher.has_listeners("other"));
}

#[test]
fn dispatches_to_service_listeners() {
  let container = Container::new();
  container.register::<SampleListener>();
  let dispatcher = Dispatcher::new(container);

  dispatcher.listen("sample", Listener::service::<SampleListener>());
  let responses = dispatcher.dispatch("sample").unwrap();

  assert_eq!(responses.len(), 1);
  assert_eq!(responses[0].cloned::<String>().as_deref(), Some("ok:sample"));
}

#[test]
fn service_listeners_resolve_at_dispatch_time() {
  let container = Container::new();
  let dispatcher = Dispatcher::new(container.clone());

  // Listen first; the listener type only becomes constructible later.
  dispatcher.listen("sample", Listener::service::<SampleListener>());
  container.register::<SampleListener>();

  let responses = dispatcher.dispatch("sample").unwrap();

  assert_eq!(responses[0].cloned::<String>().as_deref(), Some("ok:sample"));
}

#[test]
fn dispatches_to_callback_listeners() {
  let dispatcher = Dispatcher::new(Container::new());

  dispatcher.listen(
    "sample",
    Listener::callback(|event, _| Value::new(format!("ok:{}", event.name()))),
  );
  let responses = dispatcher.dispatch("sample").unwrap();

  assert_eq!(responses.len(), 1);
  assert_eq!(responses[0].cloned::<String>().as_deref(), Some("ok:sample"));
}

#[test]
fn dispatches_payloads_to_listeners() {
  let dispatcher = Dispatcher::new(Container::new());

  dispatcher.listen(
    "sample",
    Listener::callback(|event, payload| {
      let first = payload[0].cloned::<i64>().unwrap_or_default();
      Value::new(format!("ok:{}:{}", event.name(), first))
    }),
  );
  let responses = dispatcher
    .dispatch_with("sample", vec![Value::new(10_i64)])
    .unwrap();

  assert_eq!(responses[0].cloned::<String>().as_deref(), Some("ok:sample:10"));
}

#[test]
fn dispatches_typed_event_objects() {
  let dispatcher = Dispatcher::new(Container::new());

  dispatcher.listen(
    ServiceKey::of::<SampleEvent>(),
    Listener::callback(|event, _| {
      let sample = event.object_as::<SampleEvent>().unwrap();
      Value::new(format!("ok:{}", sample.name))
    }),
  );
  let responses = dispatcher
    .dispatch(Event::object(SampleEvent {
      name: String::from("erik"),
    }))
    .unwrap();

  assert_eq!(responses[0].cloned::<String>().as_deref(), Some("ok:erik"));
}

#[test]
fn constructs_events_named_by_a_registered_type() {
  let container = Container::new();
  container.register::<SampleEvent>();
  let dispatcher = Dispatcher::new(container);

  dispatcher.listen(
    ServiceKey::of::<SampleEvent>(),
    Listener::callback(|event, _| Value::new(event.object_as::<SampleEvent>().is_some())),
  );

  // Dispatching the bare type key makes the event object first.
  let responses = dispatcher.dispatch(ServiceKey::of::<SampleEvent>()).unwrap();

  assert_eq!(responses[0].cloned::<bool>(), Some(true));
}

#[test]
fn dispatch_preserves_registration_order() {
  let dispatcher = Dispatcher::new(Container::new());

  dispatcher.listen(
    "ordered",
    vec![
      Listener::callback(|_, _| Value::new(1_i64)),
      Listener::callback(|_, _| Value::new(2_i64)),
    ],
  );
  dispatcher.listen("ordered", Listener::callback(|_, _| Value::new(3_i64)));

  let responses = dispatcher.dispatch("ordered").unwrap();

  let order: Vec<i64> = responses
    .iter()
    .map(|response| response.cloned::<i64>().unwrap())
    .collect();
  assert_eq!(order, vec![1, 2, 3]);
}

#[test]
fn listening_on_many_events_at_once() {
  let dispatcher = Dispatcher::new(Container::new());

  dispatcher.listen(
    vec![ServiceKey::from("first"), ServiceKey::from("second")],
    Listener::callback(|event, _| Value::new(format!("ok:{}", event.name()))),
  );

  assert_eq!(
    dispatcher.dispatch("first").unwrap()[0]
      .cloned::<String>()
      .as_deref(),
    Some("ok:first")
  );
  assert_eq!(
    dispatcher.dispatch("second").unwrap()[0]
      .cloned::<String>()
      .as_deref(),
    Some("ok:second")
  );
}

#[test]
fn unregistered_events_dispatch_to_nobody() {
  let dispatcher = Dispatcher::new(Container::new());

  let responses = dispatcher.dispatch("silence").unwrap();

  assert!(responses.is_empty());
  assert!(!dispatcher.has_listeners("silence"));
  assert!(dispatcher.listeners("silence").is_empty());
}

#[test]
fn handlers_can_be_shared_instances() {
  let dispatcher = Dispatcher::new(Container::new());
  let listener = Arc::new(SampleListener);

  dispatcher.listen("sample", Listener::Handler(listener));
  let responses = dispatcher.dispatch("sample").unwrap();

  assert_eq!(responses[0].cloned::<String>().as_deref(), Some("ok:sample"));
}
