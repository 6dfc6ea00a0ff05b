//! Service bindings: a resolver plus its resolution state.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::arguments::Arguments;
use crate::container::{Container, WeakContainer};
use crate::error::ContainerError;
use crate::value::Value;

/// The resolver function a binding invokes to produce its value.
pub type Resolver =
  Arc<dyn Fn(&Container, &Arguments) -> Result<Value, ContainerError> + Send + Sync>;

/// What [`Container::bind`](crate::Container::bind) accepts as a resolver.
#[derive(Clone)]
pub enum BindingSource {
  /// Instantiate the bound key itself through the type registry.
  Auto,
  /// Instantiate another registered type instead.
  Service(crate::key::ServiceKey),
  /// A plain resolver function.
  Resolver(Resolver),
  /// An existing binding, attached to the container only if it has none.
  Binding(Binding),
}

impl BindingSource {
  pub fn resolver(
    resolver: impl Fn(&Container, &Arguments) -> Result<Value, ContainerError>
      + Send
      + Sync
      + 'static,
  ) -> Self {
    BindingSource::Resolver(Arc::new(resolver))
  }
}

impl From<Binding> for BindingSource {
  fn from(binding: Binding) -> Self {
    BindingSource::Binding(binding)
  }
}

impl From<crate::key::ServiceKey> for BindingSource {
  fn from(key: crate::key::ServiceKey) -> Self {
    BindingSource::Service(key)
  }
}

#[derive(Default)]
struct BindingState {
  container: Option<WeakContainer>,
  singleton: bool,
  resolved: bool,
  last_value: Option<Value>,
}

struct BindingInner {
  resolver: Option<Resolver>,
  state: Mutex<BindingState>,
}

/// A registered recipe for producing a service instance.
///
/// A binding is a shared handle: clones observe the same state, so the
/// handle returned by `bind` can be configured fluently after the
/// container has stored it. A binding may be built detached from any
/// container and attached later.
///
/// Resolution state is monotonic. Once a singleton binding has resolved,
/// every later `resolve` returns the cached value and ignores its
/// arguments: singletons compute once. Non-singleton bindings re-run
/// their resolver each time but still record the value they last
/// produced, so any binding can be asked for [`Binding::last_resolved`].
#[derive(Clone)]
pub struct Binding {
  inner: Arc<BindingInner>,
}

impl Binding {
  /// An empty binding: no resolver, no container.
  pub fn new() -> Self {
    Self::from_parts(None, None)
  }

  /// A binding backed by a resolver function.
  pub fn with_resolver(
    resolver: impl Fn(&Container, &Arguments) -> Result<Value, ContainerError>
      + Send
      + Sync
      + 'static,
  ) -> Self {
    Self::from_parts(Some(Arc::new(resolver)), None)
  }

  pub fn from_parts(resolver: Option<Resolver>, container: Option<&Container>) -> Self {
    Binding {
      inner: Arc::new(BindingInner {
        resolver,
        state: Mutex::new(BindingState {
          container: container.map(Container::downgrade),
          ..BindingState::default()
        }),
      }),
    }
  }

  /// A singleton binding pre-resolved to `value`.
  pub fn value(value: Value) -> Self {
    Self::new().singleton(true).resolved(value)
  }

  /// Sets the singleton flag, returning the binding for chaining.
  pub fn singleton(self, singleton: bool) -> Self {
    self.inner.state.lock().singleton = singleton;
    self
  }

  pub fn is_singleton(&self) -> bool {
    self.inner.state.lock().singleton
  }

  /// Sets the default container. With `ignore_if_exists`, an already
  /// attached container is kept and the call is a no-op.
  pub fn attach_container(self, container: &Container, ignore_if_exists: bool) -> Self {
    let mut state = self.inner.state.lock();
    if state.container.is_none() || !ignore_if_exists {
      state.container = Some(container.downgrade());
    }
    drop(state);
    self
  }

  /// The default container, if attached and still alive.
  pub fn container(&self) -> Option<Container> {
    self
      .inner
      .state
      .lock()
      .container
      .as_ref()
      .and_then(WeakContainer::upgrade)
  }

  /// Force-marks the binding resolved with the given value.
  pub fn resolved(self, value: Value) -> Self {
    let mut state = self.inner.state.lock();
    state.resolved = true;
    state.last_value = Some(value);
    drop(state);
    self
  }

  /// Whether the binding has resolved at least once.
  pub fn has_resolved(&self) -> bool {
    self.inner.state.lock().resolved
  }

  /// The value the binding last produced, if any.
  pub fn last_resolved(&self) -> Option<Value> {
    self.inner.state.lock().last_value.clone()
  }

  /// Resolves the binding.
  ///
  /// A resolved singleton short-circuits to its cached value. Otherwise
  /// the resolver runs against the binding's default container, falling
  /// back to the explicitly passed one; with neither the call fails with
  /// `ContainerNotFound`, and with no resolver it fails with
  /// `ResolverNotFound`.
  pub fn resolve(
    &self,
    container: Option<&Container>,
    arguments: &Arguments,
  ) -> Result<Value, ContainerError> {
    {
      let state = self.inner.state.lock();
      if state.singleton && state.resolved {
        if let Some(value) = state.last_value.clone() {
          return Ok(value);
        }
      }
    }

    let default = self.container();
    let target = match default.as_ref().or(container) {
      Some(target) => target.clone(),
      None => return Err(ContainerError::ContainerNotFound),
    };

    let resolver = match &self.inner.resolver {
      Some(resolver) => Arc::clone(resolver),
      None => return Err(ContainerError::ResolverNotFound),
    };

    // The lock is not held across the resolver call: resolvers commonly
    // re-enter the container and may resolve this binding's dependencies.
    let value = (*resolver)(&target, arguments)?;

    let mut state = self.inner.state.lock();
    state.resolved = true;
    state.last_value = Some(value.clone());

    Ok(value)
  }
}

impl Default for Binding {
  fn default() -> Self {
    Self::new()
  }
}
