//! The event dispatcher.

use dashmap::DashMap;

use chassis_ioc::{Container, ContainerError, ServiceKey, Value};

use crate::event::{Event, EventKeys};
use crate::listener::{Listener, Listeners, Payload};

/// A registry mapping event keys to ordered listener lists.
///
/// Dispatch is a synchronous multi-cast: listeners run in registration
/// order and their results come back in the same order. The dispatcher
/// holds a container handle so that service listeners, and events named
/// by a registered type key, resolve through the container at dispatch
/// time.
pub struct Dispatcher {
  container: Container,
  listeners: DashMap<ServiceKey, Vec<Listener>>,
}

impl Dispatcher {
  pub fn new(container: Container) -> Self {
    Dispatcher {
      container,
      listeners: DashMap::new(),
    }
  }

  pub fn container(&self) -> &Container {
    &self.container
  }

  /// Appends every listener to every event's list, in order.
  ///
  /// Service listeners are *not* resolved here; resolution waits until
  /// dispatch.
  pub fn listen(&self, events: impl Into<EventKeys>, listeners: impl Into<Listeners>) {
    let listeners = listeners.into().0;
    for key in events.into().0 {
      self
        .listeners
        .entry(key)
        .or_default()
        .extend(listeners.iter().cloned());
    }
  }

  /// Dispatches with an empty payload.
  pub fn dispatch(&self, event: impl Into<Event>) -> Result<Vec<Value>, ContainerError> {
    self.dispatch_with(event, Payload::new())
  }

  /// Dispatches the event, collecting every listener's result in
  /// registration order.
  ///
  /// A named event whose key is a registered type is first constructed
  /// through the container, so listeners receive the event object. An
  /// event with no registered listeners yields an empty result set.
  pub fn dispatch_with(
    &self,
    event: impl Into<Event>,
    payload: Payload,
  ) -> Result<Vec<Value>, ContainerError> {
    let mut event = event.into();
    if event.value().is_none() && self.container.has_type(event.key()) {
      let object = self.container.make(event.key())?;
      event = Event::from_value(event.key().clone(), object);
    }

    let listeners = self.listeners(&event);
    let mut responses = Vec::with_capacity(listeners.len());

    for listener in listeners {
      let response = match listener {
        Listener::Handler(handler) => handler.handle(&event, &payload)?,
        Listener::Service { key, adapter } => {
          let resolved = self.container.make(&key)?;
          let handler =
            (*adapter)(resolved).ok_or_else(|| ContainerError::ListenerShape(key.clone()))?;
          handler.handle(&event, &payload)?
        }
      };
      responses.push(response);
    }

    Ok(responses)
  }

  /// Whether the event has any registered listeners.
  pub fn has_listeners(&self, event: impl Into<Event>) -> bool {
    self.listeners.contains_key(event.into().key())
  }

  /// A snapshot of the event's listener list; empty for unknown events.
  pub fn listeners(&self, event: impl Into<Event>) -> Vec<Listener> {
    self
      .listeners
      .get(event.into().key())
      .map(|entry| entry.value().clone())
      .unwrap_or_default()
  }
}
