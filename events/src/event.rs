//! Events and their keys.

use std::fmt;
use std::sync::Arc;

use chassis_ioc::{ServiceKey, Value};

/// An event being listened for or dispatched.
///
/// An event is either *named* (a bare key, usually a plain string) or an
/// *object*: a typed payload keyed by its concrete type. Listeners are
/// registered against the key, so a typed event and its type key address
/// the same listener list.
#[derive(Clone)]
pub struct Event {
  key: ServiceKey,
  object: Option<Value>,
}

impl Event {
  /// A named event with no object payload.
  pub fn named(key: impl Into<ServiceKey>) -> Self {
    Event {
      key: key.into(),
      object: None,
    }
  }

  /// A typed event, keyed by the concrete type of `object`.
  pub fn object<T: Send + Sync + 'static>(object: T) -> Self {
    Event {
      key: ServiceKey::of::<T>(),
      object: Some(Value::new(object)),
    }
  }

  /// An event whose object was produced elsewhere (e.g. by a container).
  pub fn from_value(key: ServiceKey, object: Value) -> Self {
    Event {
      key,
      object: Some(object),
    }
  }

  pub fn key(&self) -> &ServiceKey {
    &self.key
  }

  /// The event key as a string; for named events this is the name itself.
  pub fn name(&self) -> &str {
    self.key.as_str()
  }

  pub fn value(&self) -> Option<&Value> {
    self.object.as_ref()
  }

  /// The typed event object, when present and of type `T`.
  pub fn object_as<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
    self.object.as_ref().and_then(Value::downcast)
  }
}

impl fmt::Debug for Event {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Event")
      .field("key", &self.key)
      .field("object", &self.object.is_some())
      .finish()
  }
}

impl From<&'static str> for Event {
  fn from(name: &'static str) -> Self {
    Event::named(name)
  }
}

impl From<String> for Event {
  fn from(name: String) -> Self {
    Event::named(name)
  }
}

impl From<ServiceKey> for Event {
  fn from(key: ServiceKey) -> Self {
    Event::named(key)
  }
}

impl From<&Event> for Event {
  fn from(event: &Event) -> Self {
    event.clone()
  }
}

/// One-or-many event keys, the normalized form `listen` accepts.
pub struct EventKeys(pub Vec<ServiceKey>);

impl From<&'static str> for EventKeys {
  fn from(name: &'static str) -> Self {
    EventKeys(vec![ServiceKey::from(name)])
  }
}

impl From<String> for EventKeys {
  fn from(name: String) -> Self {
    EventKeys(vec![ServiceKey::from(name)])
  }
}

impl From<ServiceKey> for EventKeys {
  fn from(key: ServiceKey) -> Self {
    EventKeys(vec![key])
  }
}

impl From<Vec<ServiceKey>> for EventKeys {
  fn from(keys: Vec<ServiceKey>) -> Self {
    EventKeys(keys)
  }
}
