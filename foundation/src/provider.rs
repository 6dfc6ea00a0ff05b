//! Service providers: units of registration and boot logic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chassis_ioc::{ContainerError, ServiceKey};

use crate::app::Application;

/// A unit of registration plus boot logic for a group of related
/// bindings.
///
/// `register` runs when the provider is added to the application and
/// should only perform container bindings. `boot` runs during the
/// application's boot pass (or immediately, if the application already
/// booted) and may rely on every registered provider's bindings being
/// present.
pub trait ServiceProvider: Send + Sync {
  fn register(&self, _app: &Application) -> Result<(), ContainerError> {
    Ok(())
  }

  fn boot(&self, _app: &Application) -> Result<(), ContainerError> {
    Ok(())
  }
}

struct ProviderEntry {
  key: ServiceKey,
  provider: Arc<dyn ServiceProvider>,
  registered: AtomicBool,
  booted: AtomicBool,
}

/// A provider tracked by an application, carrying its monotonic
/// `registered` and `booted` flags.
#[derive(Clone)]
pub struct RegisteredProvider {
  inner: Arc<ProviderEntry>,
}

impl RegisteredProvider {
  pub(crate) fn new(key: ServiceKey, provider: Arc<dyn ServiceProvider>) -> Self {
    RegisteredProvider {
      inner: Arc::new(ProviderEntry {
        key,
        provider,
        registered: AtomicBool::new(false),
        booted: AtomicBool::new(false),
      }),
    }
  }

  pub fn key(&self) -> &ServiceKey {
    &self.inner.key
  }

  pub fn provider(&self) -> &Arc<dyn ServiceProvider> {
    &self.inner.provider
  }

  pub fn has_registered(&self) -> bool {
    self.inner.registered.load(Ordering::SeqCst)
  }

  pub fn has_booted(&self) -> bool {
    self.inner.booted.load(Ordering::SeqCst)
  }

  // Runs the provider's registration and marks it registered.
  pub(crate) fn prepare(&self, app: &Application) -> Result<(), ContainerError> {
    self.inner.provider.register(app)?;
    self.inner.registered.store(true, Ordering::SeqCst);
    Ok(())
  }

  // Runs the provider's boot at most once and marks it booted.
  pub(crate) fn initialize(&self, app: &Application) -> Result<(), ContainerError> {
    if self.has_booted() {
      return Ok(());
    }
    self.inner.provider.boot(app)?;
    self.inner.booted.store(true, Ordering::SeqCst);
    Ok(())
  }
}
