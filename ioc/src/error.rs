use thiserror::Error;

use crate::key::ServiceKey;

/// Errors raised by containers, bindings and dispatch.
///
/// All failures are immediate and terminal for the call that raised them;
/// nothing is retried or swallowed internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
  /// No container was available to perform a resolution.
  #[error("no container is available to resolve the binding")]
  ContainerNotFound,

  /// The binding was asked to resolve but never received a resolver.
  #[error("the binding has no resolver")]
  ResolverNotFound,

  /// The key is not bound and auto-binding was disabled.
  #[error("service `{0}` is not bound in the container")]
  ServiceNotFound(ServiceKey),

  /// A named parameter does not exist on the inspected target.
  #[error("parameter `{0}` does not exist")]
  ParameterNotFound(String),

  /// A call target named a method the registered type does not carry,
  /// or carries with a different shape (static vs instance).
  #[error("method `{method}` is not registered for `{key}`")]
  MethodNotFound { key: ServiceKey, method: String },

  /// A resolved value failed the downcast to the requested type.
  #[error("`{key}` resolved to a value that is not a `{expected}`")]
  TypeMismatch {
    key: ServiceKey,
    expected: &'static str,
  },

  /// A listener resolved through the container turned out not to be an
  /// event listener.
  #[error("listener `{0}` does not resolve to an event listener")]
  ListenerShape(ServiceKey),
}
