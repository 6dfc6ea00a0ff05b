//! The type-erased currency of resolution.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A shared, type-erased service value.
///
/// Everything a container produces or stores is a `Value`: a cheap clone
/// of an `Arc` around the concrete service. Concrete services are stored
/// directly; trait-object services are stored as an `Arc<dyn Trait>`
/// payload, so they round-trip through
/// `Value::new::<Arc<dyn Trait>>(..)` / `value.cloned::<Arc<dyn Trait>>()`.
#[derive(Clone)]
pub struct Value(Arc<dyn Any + Send + Sync>);

impl Value {
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Value(Arc::new(value))
  }

  /// Wraps an already-shared value without another allocation.
  pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
    Value(value)
  }

  /// Recovers shared ownership of the concrete service.
  pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.0.clone().downcast::<T>().ok()
  }

  /// Clones the concrete service out of the shared allocation.
  ///
  /// This is the ergonomic path for `Arc<dyn Trait>` payloads and other
  /// cheaply clonable services.
  pub fn cloned<T: Any + Send + Sync + Clone>(&self) -> Option<T> {
    self.0.as_ref().downcast_ref::<T>().cloned()
  }

  pub fn is<T: Any>(&self) -> bool {
    self.0.as_ref().is::<T>()
  }

  pub fn type_id(&self) -> TypeId {
    self.0.as_ref().type_id()
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Value({:?})", self.type_id())
  }
}
