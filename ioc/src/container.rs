//! The main `Container` struct and its associated methods.

use std::sync::{Arc, Weak};

use dashmap::DashMap;

use crate::arguments::Arguments;
use crate::binding::{Binding, BindingSource, Resolver};
use crate::call::{CallTarget, Injectable, MethodKind, TypeSpec};
use crate::core::ResolutionGuard;
use crate::error::ContainerError;
use crate::key::ServiceKey;
use crate::parameters::{Parameters, TypeHint};
use crate::value::Value;

/// Options for [`Container::make_opts`].
///
/// The defaults match the common path: auto-bind unknown keys as
/// non-singletons and let the binding resolve against its own default
/// container.
#[derive(Clone, Copy, Debug)]
pub struct MakeOptions {
  /// Pass this container to the binding explicitly instead of relying on
  /// the binding's default container.
  pub force_container: bool,
  /// Auto-create a binding when the key is unbound. When disabled, an
  /// unbound key fails with `ServiceNotFound`.
  pub bind_if_not_found: bool,
  /// Mark an auto-created binding as a singleton.
  pub bind_as_singleton: bool,
}

impl Default for MakeOptions {
  fn default() -> Self {
    MakeOptions {
      force_container: false,
      bind_if_not_found: true,
      bind_as_singleton: false,
    }
  }
}

#[derive(Default)]
pub(crate) struct ContainerInner {
  bindings: DashMap<ServiceKey, Binding>,
  types: DashMap<ServiceKey, Arc<TypeSpec>>,
}

/// A non-owning handle to a container, used by bindings so that a
/// binding stored inside a container does not keep it alive.
#[derive(Clone)]
pub struct WeakContainer(Weak<ContainerInner>);

impl WeakContainer {
  pub fn upgrade(&self) -> Option<Container> {
    self.0.upgrade().map(|inner| Container { inner })
  }
}

/// The service container: a registry mapping service keys to bindings.
///
/// The container is a shared handle; clones observe the same registry.
/// Registration takes `&self` and may happen at any point in the
/// application's lifecycle. Resolution is synchronous and failures are
/// immediate; there are no retries and nothing is swallowed.
///
/// A freshly constructed container binds its own key, so any call target
/// with a parameter hinted as `Container` receives this instance through
/// injection.
#[derive(Clone)]
pub struct Container {
  inner: Arc<ContainerInner>,
}

impl Container {
  pub fn new() -> Self {
    let container = Container {
      inner: Arc::new(ContainerInner::default()),
    };
    let weak = container.downgrade();
    container.bind(
      ServiceKey::of::<Container>(),
      BindingSource::resolver(move |_, _| {
        weak
          .upgrade()
          .map(Value::new)
          .ok_or(ContainerError::ContainerNotFound)
      }),
    );
    container
  }

  pub fn downgrade(&self) -> WeakContainer {
    WeakContainer(Arc::downgrade(&self.inner))
  }

  /// Whether two handles refer to the same underlying container.
  pub fn ptr_eq(&self, other: &Container) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }

  // --- TYPE REGISTRY ---

  /// Registers `T`'s constructor metadata, making the type constructible
  /// through [`Container::call`] and auto-binding.
  pub fn register<T: Injectable>(&self) -> &Self {
    let spec = Arc::new(TypeSpec::of::<T>());
    self.inner.types.insert(spec.key().clone(), spec);
    self
  }

  pub fn has_type(&self, key: impl Into<ServiceKey>) -> bool {
    self.inner.types.contains_key(&key.into())
  }

  fn type_spec(&self, key: &ServiceKey) -> Result<Arc<TypeSpec>, ContainerError> {
    self
      .inner
      .types
      .get(key)
      .map(|entry| Arc::clone(entry.value()))
      .ok_or_else(|| ContainerError::ServiceNotFound(key.clone()))
  }

  // --- BINDING ---

  pub fn has_binding(&self, key: impl Into<ServiceKey>) -> bool {
    self.inner.bindings.contains_key(&key.into())
  }

  /// Returns the registered binding, or `ServiceNotFound`.
  pub fn binding(&self, key: impl Into<ServiceKey>) -> Result<Binding, ContainerError> {
    let key = key.into();
    self
      .inner
      .bindings
      .get(&key)
      .map(|entry| entry.value().clone())
      .ok_or(ContainerError::ServiceNotFound(key))
  }

  /// Binds a service to the container, overwriting any previous binding
  /// for the key, and returns the stored binding for further chaining.
  pub fn bind(&self, key: impl Into<ServiceKey>, source: impl Into<BindingSource>) -> Binding {
    let key = key.into();
    let binding = self.create_binding(&key, source.into());
    self.inner.bindings.insert(key, binding.clone());
    binding
  }

  /// Binds a plain resolver function.
  pub fn bind_fn(
    &self,
    key: impl Into<ServiceKey>,
    resolver: impl Fn(&Container, &Arguments) -> Result<Value, ContainerError>
      + Send
      + Sync
      + 'static,
  ) -> Binding {
    self.bind(key, BindingSource::resolver(resolver))
  }

  /// Registers `T` and binds its key to auto-construction.
  pub fn bind_type<T: Injectable>(&self) -> Binding {
    self.register::<T>();
    self.bind(ServiceKey::of::<T>(), BindingSource::Auto)
  }

  /// Registers an existing value as a shared, pre-resolved singleton.
  pub fn value<T: Send + Sync + 'static>(&self, key: impl Into<ServiceKey>, value: T) -> Binding {
    let binding = Binding::value(Value::new(value));
    self.inner.bindings.insert(key.into(), binding.clone());
    binding
  }

  fn create_binding(&self, key: &ServiceKey, source: BindingSource) -> Binding {
    match source {
      BindingSource::Binding(binding) => binding.attach_container(self, true),
      BindingSource::Resolver(resolver) => Binding::from_parts(Some(resolver), Some(self)),
      BindingSource::Auto => Binding::from_parts(self.constructor_resolver(key), Some(self)),
      BindingSource::Service(other) => {
        Binding::from_parts(self.constructor_resolver(&other), Some(self))
      }
    }
  }

  // A resolver that instantiates the keyed type, when the type registry
  // knows it at bind time; otherwise the binding is left without a
  // resolver and resolution reports `ResolverNotFound`.
  fn constructor_resolver(&self, key: &ServiceKey) -> Option<Resolver> {
    if !self.inner.types.contains_key(key) {
      return None;
    }
    let key = key.clone();
    Some(Arc::new(move |container: &Container, arguments: &Arguments| {
      container.call(&CallTarget::Constructor(key.clone()), arguments)
    }))
  }

  // --- RESOLUTION ---

  /// Resolves the service bound under `key` with no explicit arguments.
  pub fn make(&self, key: impl Into<ServiceKey>) -> Result<Value, ContainerError> {
    self.make_opts(key, &Arguments::new(), MakeOptions::default())
  }

  /// Resolves the service with explicit named arguments.
  pub fn make_with(
    &self,
    key: impl Into<ServiceKey>,
    arguments: &Arguments,
  ) -> Result<Value, ContainerError> {
    self.make_opts(key, arguments, MakeOptions::default())
  }

  /// Resolves the service with full control over auto-binding and the
  /// container passed to the binding.
  pub fn make_opts(
    &self,
    key: impl Into<ServiceKey>,
    arguments: &Arguments,
    options: MakeOptions,
  ) -> Result<Value, ContainerError> {
    let key = key.into();
    if !self.has_binding(&key) && options.bind_if_not_found {
      self
        .bind(key.clone(), BindingSource::Auto)
        .singleton(options.bind_as_singleton);
    }

    let binding = self.binding(&key)?;
    let _guard = ResolutionGuard::new(key);
    binding.resolve(options.force_container.then_some(self), arguments)
  }

  /// Resolves `T` by its type key and downcasts the result.
  pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ContainerError> {
    self.get_with::<T>(ServiceKey::of::<T>())
  }

  /// Resolves the key and downcasts the result to `T`.
  pub fn get_with<T: Send + Sync + 'static>(
    &self,
    key: impl Into<ServiceKey>,
  ) -> Result<Arc<T>, ContainerError> {
    let key = key.into();
    let value = self.make(key.clone())?;
    value.downcast::<T>().ok_or(ContainerError::TypeMismatch {
      key,
      expected: std::any::type_name::<T>(),
    })
  }

  /// Resolves the key and clones the concrete value out. This is the
  /// retrieval path for trait-object services stored as `Arc<dyn Trait>`.
  pub fn make_cloned<T: Send + Sync + Clone + 'static>(
    &self,
    key: impl Into<ServiceKey>,
  ) -> Result<T, ContainerError> {
    let key = key.into();
    let value = self.make(key.clone())?;
    value.cloned::<T>().ok_or(ContainerError::TypeMismatch {
      key,
      expected: std::any::type_name::<T>(),
    })
  }

  /// Resolves `T`, registering its metadata on first use, and downcasts.
  pub fn make_type<T: Injectable>(&self, arguments: &Arguments) -> Result<Arc<T>, ContainerError> {
    let key = ServiceKey::of::<T>();
    if !self.inner.types.contains_key(&key) {
      self.register::<T>();
    }
    let value = self.make_with(key.clone(), arguments)?;
    value.downcast::<T>().ok_or(ContainerError::TypeMismatch {
      key,
      expected: std::any::type_name::<T>(),
    })
  }

  // --- CALLING ---

  // Injects values for every parameter whose hint names a bound service,
  // then merges the explicit arguments over them. Explicit arguments
  // always win; parameters that neither side covers stay absent.
  fn inject(
    &self,
    parameters: &Parameters,
    explicit: &Arguments,
  ) -> Result<Arguments, ContainerError> {
    let mut merged = Arguments::new();
    for parameter in parameters.iter() {
      if let TypeHint::Service(key) = parameter.hint() {
        if self.has_binding(key) {
          merged.insert(parameter.name().to_owned(), self.make(key)?);
        }
      }
    }
    merged.extend(explicit);
    Ok(merged)
  }

  /// Calls the target with container-driven dependency injection.
  ///
  /// The target's declared parameters are looked up; every parameter
  /// whose hinted type is itself a known binding is substituted with the
  /// container's resolution of that type, and the explicit `arguments`
  /// are merged over the injected ones by name.
  pub fn call(&self, target: &CallTarget, arguments: &Arguments) -> Result<Value, ContainerError> {
    match target {
      CallTarget::Constructor(key) => {
        let spec = self.type_spec(key)?;
        let merged = self.inject(spec.parameters(), arguments)?;
        spec.construct(&merged)
      }
      CallTarget::Function(function) => {
        let merged = self.inject(function.parameters(), arguments)?;
        function.invoke(&merged)
      }
      CallTarget::StaticMethod { ty, method } => {
        let spec = self.type_spec(ty)?;
        let found = spec.method(method).ok_or_else(|| ContainerError::MethodNotFound {
          key: ty.clone(),
          method: method.clone(),
        })?;
        let merged = self.inject(found.parameters(), arguments)?;
        match found.kind() {
          MethodKind::Static(invoke) => (**invoke)(&merged),
          MethodKind::Instance(_) => Err(ContainerError::MethodNotFound {
            key: ty.clone(),
            method: method.clone(),
          }),
        }
      }
      CallTarget::InstanceMethod {
        ty,
        instance,
        method,
      } => {
        let spec = self.type_spec(ty)?;
        let found = spec.method(method).ok_or_else(|| ContainerError::MethodNotFound {
          key: ty.clone(),
          method: method.clone(),
        })?;
        let merged = self.inject(found.parameters(), arguments)?;
        match found.kind() {
          MethodKind::Instance(invoke) => (**invoke)(instance, &merged),
          MethodKind::Static(_) => Err(ContainerError::MethodNotFound {
            key: ty.clone(),
            method: method.clone(),
          }),
        }
      }
    }
  }

  /// Structural mirror of [`Container::call`]: does the target exist with
  /// the right shape, without executing anything.
  pub fn can_call(&self, target: &CallTarget) -> bool {
    match target {
      CallTarget::Constructor(key) => self.inner.types.contains_key(key),
      CallTarget::Function(_) => true,
      CallTarget::StaticMethod { ty, method } => self
        .type_spec(ty)
        .ok()
        .and_then(|spec| spec.method(method).map(|m| m.is_static()))
        .unwrap_or(false),
      CallTarget::InstanceMethod { ty, method, .. } => self
        .type_spec(ty)
        .ok()
        .and_then(|spec| spec.method(method).map(|m| !m.is_static()))
        .unwrap_or(false),
    }
  }
}

impl Default for Container {
  fn default() -> Self {
    Self::new()
  }
}
