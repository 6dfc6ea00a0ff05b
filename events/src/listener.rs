//! Listener shapes.

use std::sync::Arc;

use chassis_ioc::{ContainerError, ServiceKey, Value};

use crate::event::Event;

/// The ordered payload values passed alongside an event.
pub type Payload = Vec<Value>;

/// The capability an event handler implements.
///
/// Plain closures adapt into this through [`Listener::callback`], so the
/// dispatcher only ever deals with one handler shape.
pub trait EventListener: Send + Sync {
  fn handle(&self, event: &Event, payload: &Payload) -> Result<Value, ContainerError>;
}

// Adapts a plain closure into an `EventListener`.
struct CallbackListener<F>(F);

impl<F> EventListener for CallbackListener<F>
where
  F: Fn(&Event, &Payload) -> Value + Send + Sync,
{
  fn handle(&self, event: &Event, payload: &Payload) -> Result<Value, ContainerError> {
    Ok((self.0)(event, payload))
  }
}

type Adapter = Arc<dyn Fn(Value) -> Option<Arc<dyn EventListener>> + Send + Sync>;

/// A registered listener.
///
/// Either a ready handler, or a service key resolved through the
/// container at dispatch time, never at listen time; listener state may
/// be rebuilt per dispatch or shared, depending on how the service is
/// bound.
#[derive(Clone)]
pub enum Listener {
  /// A handler invoked directly.
  Handler(Arc<dyn EventListener>),
  /// A service resolved through the container when the event fires.
  Service { key: ServiceKey, adapter: Adapter },
}

impl Listener {
  /// Wraps an infallible closure.
  pub fn callback(listener: impl Fn(&Event, &Payload) -> Value + Send + Sync + 'static) -> Self {
    Listener::Handler(Arc::new(CallbackListener(listener)))
  }

  /// Wraps a handler instance.
  pub fn handler(listener: impl EventListener + 'static) -> Self {
    Listener::Handler(Arc::new(listener))
  }

  /// Defers to the container: `T` is resolved under its type key when the
  /// event is dispatched, then invoked through its `handle`.
  pub fn service<T: EventListener + Send + Sync + 'static>() -> Self {
    Listener::Service {
      key: ServiceKey::of::<T>(),
      adapter: Arc::new(|value: Value| {
        value
          .downcast::<T>()
          .map(|listener| listener as Arc<dyn EventListener>)
      }),
    }
  }
}

/// One-or-many listeners, the normalized form `listen` accepts.
pub struct Listeners(pub Vec<Listener>);

impl From<Listener> for Listeners {
  fn from(listener: Listener) -> Self {
    Listeners(vec![listener])
  }
}

impl From<Vec<Listener>> for Listeners {
  fn from(listeners: Vec<Listener>) -> Self {
    Listeners(listeners)
  }
}
