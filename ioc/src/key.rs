//! Service identifiers.

use std::borrow::Cow;
use std::fmt;

/// The identifier a binding is registered and looked up under.
///
/// A key is an opaque string: most commonly the type name of the service
/// (via [`ServiceKey::of`]), but any unique string works. The same key
/// space is used for binding lookup and for call-time injection, so a
/// parameter hinted with `TypeHint::of::<T>()` resolves against whatever
/// was bound under `ServiceKey::of::<T>()`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceKey(Cow<'static, str>);

impl ServiceKey {
  /// Derives the key for a type from its fully-qualified type name.
  ///
  /// Works for unsized types too, so trait-object services can be keyed
  /// as `ServiceKey::of::<dyn MyTrait>()`.
  pub fn of<T: ?Sized + 'static>() -> Self {
    ServiceKey(Cow::Borrowed(std::any::type_name::<T>()))
  }

  /// Creates a key from an arbitrary string.
  pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
    ServiceKey(key.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl fmt::Debug for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ServiceKey({})", self.0)
  }
}

impl From<&'static str> for ServiceKey {
  fn from(key: &'static str) -> Self {
    ServiceKey(Cow::Borrowed(key))
  }
}

impl From<String> for ServiceKey {
  fn from(key: String) -> Self {
    ServiceKey(Cow::Owned(key))
  }
}

impl From<&ServiceKey> for ServiceKey {
  fn from(key: &ServiceKey) -> Self {
    key.clone()
  }
}
