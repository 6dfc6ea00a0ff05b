//! Core, non-public data structures for the service container.

use std::cell::RefCell;
use std::collections::HashSet;

use crate::key::ServiceKey;

thread_local! {
  // This thread-local variable holds the set of services currently being
  // resolved on this specific thread. This is the key to detecting
  // circular dependencies.
  static RESOLVING_STACK: RefCell<HashSet<ServiceKey>> = RefCell::new(HashSet::new());
}

/// An RAII guard to detect and prevent circular dependencies.
///
/// When created, it adds a service key to the thread-local resolution stack.
/// If the key is already present, it means we have a circular dependency, and it panics.
/// When the guard is dropped, it removes the key from the stack.
pub(crate) struct ResolutionGuard {
  key: ServiceKey,
}

impl ResolutionGuard {
  pub(crate) fn new(key: ServiceKey) -> Self {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      // `insert` returns `false` if the value was already present.
      if !stack.insert(key.clone()) {
        panic!(
          "Circular dependency detected while resolving service: {}",
          key
        );
      }
    });
    Self { key }
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.key);
    });
  }
}
