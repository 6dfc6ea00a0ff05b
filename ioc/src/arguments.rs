//! Named arguments for resolution and dependency-injected calls.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ContainerError;
use crate::key::ServiceKey;
use crate::value::Value;

/// A named-argument map.
///
/// Arguments are keyed by parameter name, not position: at call time the
/// container first injects values for typed parameters it can resolve,
/// then merges the explicit arguments over them, so an explicit argument
/// always wins. A parameter with no injected and no explicit value is
/// simply absent from the map (the caller decides whether that is an
/// error via [`Arguments::require`] or a default via [`Arguments::cloned`]).
#[derive(Clone, Default)]
pub struct Arguments {
  values: HashMap<String, Value>,
}

impl Arguments {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a value under a name, consuming and returning the map for
  /// fluent construction.
  pub fn with<T: Send + Sync + 'static>(self, name: impl Into<String>, value: T) -> Self {
    self.with_value(name, Value::new(value))
  }

  pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
    self.values.insert(name.into(), value);
    self
  }

  pub fn insert(&mut self, name: impl Into<String>, value: Value) {
    self.values.insert(name.into(), value);
  }

  pub fn has(&self, name: &str) -> bool {
    self.values.contains_key(name)
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.values.get(name)
  }

  /// Shared ownership of the argument, if present and of the right type.
  pub fn get_as<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
    self.values.get(name).and_then(Value::downcast)
  }

  /// Clones the argument out, if present and of the right type.
  pub fn cloned<T: Send + Sync + Clone + 'static>(&self, name: &str) -> Option<T> {
    self.values.get(name).and_then(Value::cloned)
  }

  /// Like [`Arguments::get_as`], but failing loudly: `ParameterNotFound`
  /// when the name is absent, `TypeMismatch` when the value has another
  /// type.
  pub fn require<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, ContainerError> {
    let value = self
      .values
      .get(name)
      .ok_or_else(|| ContainerError::ParameterNotFound(name.to_owned()))?;
    value.downcast::<T>().ok_or(ContainerError::TypeMismatch {
      key: ServiceKey::new(name.to_owned()),
      expected: std::any::type_name::<T>(),
    })
  }

  /// Merges `other` over `self`; on a name collision `other` wins.
  pub fn extend(&mut self, other: &Arguments) {
    for (name, value) in &other.values {
      self.values.insert(name.clone(), value.clone());
    }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}
