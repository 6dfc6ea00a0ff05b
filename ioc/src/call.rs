//! Call targets and the type metadata registry behind them.
//!
//! A [`CallTarget`] names something the container can invoke with
//! dependency injection: a constructor, a free function, a static method
//! or an instance method. The target kind is fixed when the value is
//! built, and each kind resolves through explicit metadata (an
//! [`Injectable`] implementation erased into a [`TypeSpec`]) rather than
//! through any runtime inspection.

use std::any::TypeId;
use std::sync::Arc;

use crate::arguments::Arguments;
use crate::error::ContainerError;
use crate::key::ServiceKey;
use crate::parameters::Parameters;
use crate::value::Value;

/// A type the container knows how to construct.
///
/// Implementations describe their constructor parameters as metadata and
/// build themselves from a merged argument map. Types that also expose
/// callable methods list them in [`Injectable::methods`].
pub trait Injectable: Send + Sync + Sized + 'static {
  /// The declared constructor parameters, in order.
  fn parameters() -> Parameters;

  /// Builds the value from injected-plus-explicit arguments.
  fn construct(arguments: &Arguments) -> Result<Self, ContainerError>;

  /// Methods callable through the container. Empty by default.
  fn methods() -> Vec<MethodSpec> {
    Vec::new()
  }
}

type ConstructFn = Arc<dyn Fn(&Arguments) -> Result<Value, ContainerError> + Send + Sync>;
type StaticFn = Arc<dyn Fn(&Arguments) -> Result<Value, ContainerError> + Send + Sync>;
type InstanceFn = Arc<dyn Fn(&Value, &Arguments) -> Result<Value, ContainerError> + Send + Sync>;

/// One callable method of a registered type.
#[derive(Clone)]
pub struct MethodSpec {
  name: &'static str,
  parameters: Parameters,
  kind: MethodKind,
}

#[derive(Clone)]
pub(crate) enum MethodKind {
  Static(StaticFn),
  Instance(InstanceFn),
}

impl MethodSpec {
  /// A method invoked without an instance.
  pub fn static_method(
    name: &'static str,
    parameters: Parameters,
    invoke: impl Fn(&Arguments) -> Result<Value, ContainerError> + Send + Sync + 'static,
  ) -> Self {
    MethodSpec {
      name,
      parameters,
      kind: MethodKind::Static(Arc::new(invoke)),
    }
  }

  /// A method invoked on a resolved instance. The closure receives the
  /// instance as a [`Value`] and downcasts it itself.
  pub fn instance_method(
    name: &'static str,
    parameters: Parameters,
    invoke: impl Fn(&Value, &Arguments) -> Result<Value, ContainerError> + Send + Sync + 'static,
  ) -> Self {
    MethodSpec {
      name,
      parameters,
      kind: MethodKind::Instance(Arc::new(invoke)),
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn parameters(&self) -> &Parameters {
    &self.parameters
  }

  pub fn is_static(&self) -> bool {
    matches!(self.kind, MethodKind::Static(_))
  }

  pub(crate) fn kind(&self) -> &MethodKind {
    &self.kind
  }
}

/// An [`Injectable`] implementation erased into registry form.
#[derive(Clone)]
pub struct TypeSpec {
  key: ServiceKey,
  type_id: TypeId,
  parameters: Parameters,
  construct: ConstructFn,
  methods: Vec<MethodSpec>,
}

impl TypeSpec {
  pub fn of<T: Injectable>() -> Self {
    TypeSpec {
      key: ServiceKey::of::<T>(),
      type_id: TypeId::of::<T>(),
      parameters: T::parameters(),
      construct: Arc::new(|arguments| T::construct(arguments).map(Value::new)),
      methods: T::methods(),
    }
  }

  pub fn key(&self) -> &ServiceKey {
    &self.key
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn parameters(&self) -> &Parameters {
    &self.parameters
  }

  pub fn method(&self, name: &str) -> Option<&MethodSpec> {
    self.methods.iter().find(|method| method.name == name)
  }

  pub(crate) fn construct(&self, arguments: &Arguments) -> Result<Value, ContainerError> {
    (*self.construct)(arguments)
  }
}

/// A free function the container can call with injection.
#[derive(Clone)]
pub struct FunctionSpec {
  parameters: Parameters,
  invoke: StaticFn,
}

impl FunctionSpec {
  pub fn new(
    parameters: Parameters,
    invoke: impl Fn(&Arguments) -> Result<Value, ContainerError> + Send + Sync + 'static,
  ) -> Self {
    FunctionSpec {
      parameters,
      invoke: Arc::new(invoke),
    }
  }

  pub fn parameters(&self) -> &Parameters {
    &self.parameters
  }

  pub(crate) fn invoke(&self, arguments: &Arguments) -> Result<Value, ContainerError> {
    (*self.invoke)(arguments)
  }
}

/// Something the container can call.
///
/// The kind is decided where the target is built, never inferred from the
/// shape of a string. Constructor and method targets resolve their
/// metadata through the container's type registry at call time.
#[derive(Clone)]
pub enum CallTarget {
  /// Instantiate the registered type.
  Constructor(ServiceKey),
  /// Invoke a free function.
  Function(FunctionSpec),
  /// Invoke a registered type's static method.
  StaticMethod { ty: ServiceKey, method: String },
  /// Invoke a method on an already-constructed instance.
  InstanceMethod {
    ty: ServiceKey,
    instance: Value,
    method: String,
  },
}

impl CallTarget {
  pub fn constructor<T: Injectable>() -> Self {
    CallTarget::Constructor(ServiceKey::of::<T>())
  }

  pub fn constructor_of(key: impl Into<ServiceKey>) -> Self {
    CallTarget::Constructor(key.into())
  }

  pub fn function(
    parameters: Parameters,
    invoke: impl Fn(&Arguments) -> Result<Value, ContainerError> + Send + Sync + 'static,
  ) -> Self {
    CallTarget::Function(FunctionSpec::new(parameters, invoke))
  }

  pub fn static_method<T: Injectable>(method: impl Into<String>) -> Self {
    CallTarget::StaticMethod {
      ty: ServiceKey::of::<T>(),
      method: method.into(),
    }
  }

  pub fn method<T: Injectable>(instance: Arc<T>, method: impl Into<String>) -> Self {
    CallTarget::InstanceMethod {
      ty: ServiceKey::of::<T>(),
      instance: Value::from_arc(instance),
      method: method.into(),
    }
  }

  /// An instance-method target on an already type-erased instance.
  pub fn method_of(ty: impl Into<ServiceKey>, instance: Value, method: impl Into<String>) -> Self {
    CallTarget::InstanceMethod {
      ty: ty.into(),
      instance,
      method: method.into(),
    }
  }
}
