//! The application lifecycle shell.

use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use chassis_ioc::{
  Arguments, BindingSource, CallTarget, Container, ContainerError, Injectable, ServiceKey, Value,
};

use crate::bootstrap::Bootstrapper;
use crate::events::EventServiceProvider;
use crate::fs::Directory;
use crate::log::LogServiceProvider;
use crate::provider::{RegisteredProvider, ServiceProvider};

// The process-wide application, if one was promoted via
// `Application::global`. Guarded because the surrounding runtime may be
// concurrent; replaced wholesale, never mutated in place.
static GLOBAL: Lazy<RwLock<Option<Application>>> = Lazy::new(|| RwLock::new(None));

struct AppInner {
  container: Container,
  base: Directory,
  providers: RwLock<Vec<RegisteredProvider>>,
  booted: AtomicBool,
}

/// An application: a container plus a base directory, a provider list
/// and a boot lifecycle.
///
/// The application is a shared handle and dereferences to its
/// [`Container`], so bindings and resolution read the same as on a bare
/// container. Construction registers the core providers (logging and
/// events), so `dyn Logger` and `Dispatcher` resolve out of the box.
#[derive(Clone)]
pub struct Application {
  inner: Arc<AppInner>,
}

impl Application {
  pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

  /// Builds an application rooted at the given base directory.
  pub fn new(base: Directory) -> Result<Application, ContainerError> {
    let app = Application {
      inner: Arc::new(AppInner {
        container: Container::new(),
        base,
        providers: RwLock::new(Vec::new()),
        booted: AtomicBool::new(false),
      }),
    };

    // The application resolves itself, so providers and services can
    // take it as an injected dependency. Backed by a weak handle to
    // keep the binding from pinning the application.
    let weak = Arc::downgrade(&app.inner);
    app.inner.container.bind(
      ServiceKey::of::<Application>(),
      BindingSource::resolver(move |_, _| {
        weak
          .upgrade()
          .map(|inner| Value::new(Application { inner }))
          .ok_or(ContainerError::ContainerNotFound)
      }),
    );

    app.register_provider(
      ServiceKey::of::<LogServiceProvider>(),
      Arc::new(LogServiceProvider),
      false,
    )?;
    app.register_provider(
      ServiceKey::of::<EventServiceProvider>(),
      Arc::new(EventServiceProvider),
      false,
    )?;

    Ok(app)
  }

  /// Builds a new application and promotes it to the process-wide
  /// global, discarding any previous one.
  pub fn global(base: Directory) -> Result<Application, ContainerError> {
    let app = Application::new(base)?;
    *GLOBAL.write() = Some(app.clone());
    Ok(app)
  }

  /// The current process-wide application, if any.
  pub fn get_global() -> Option<Application> {
    GLOBAL.read().clone()
  }

  pub fn version(&self) -> &'static str {
    Self::VERSION
  }

  pub fn base(&self) -> &Directory {
    &self.inner.base
  }

  pub fn container(&self) -> &Container {
    &self.inner.container
  }

  /// Whether two handles refer to the same underlying application.
  pub fn ptr_eq(&self, other: &Application) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }

  /// Whether the application finished a boot pass. Monotonic.
  pub fn has_booted(&self) -> bool {
    self.inner.booted.load(Ordering::SeqCst)
  }

  /// Registers a provider type, constructing it through the container so
  /// its declared dependencies are injected.
  ///
  /// A provider already registered under the same key is returned as-is.
  pub fn register<P: ServiceProvider + Injectable>(
    &self,
  ) -> Result<RegisteredProvider, ContainerError> {
    self.register_with::<P>(false)
  }

  /// Like [`Application::register`], but `force` registers a fresh
  /// instance even when one exists.
  pub fn register_with<P: ServiceProvider + Injectable>(
    &self,
    force: bool,
  ) -> Result<RegisteredProvider, ContainerError> {
    let key = ServiceKey::of::<P>();
    if !force {
      if let Some(existing) = self.provider(&key) {
        return Ok(existing);
      }
    }

    self.container().register::<P>();
    let value = self
      .container()
      .call(&CallTarget::Constructor(key.clone()), &Arguments::new())?;
    let provider = value
      .downcast::<P>()
      .ok_or_else(|| ContainerError::TypeMismatch {
        key: key.clone(),
        expected: std::any::type_name::<P>(),
      })?;

    self.register_provider(key, provider, true)
  }

  /// Registers an already-constructed provider under an explicit key.
  ///
  /// The provider's `register` runs immediately; its `boot` runs during
  /// the boot pass, or right away when the application already booted.
  pub fn register_provider(
    &self,
    key: ServiceKey,
    provider: Arc<dyn ServiceProvider>,
    force: bool,
  ) -> Result<RegisteredProvider, ContainerError> {
    if !force {
      if let Some(existing) = self.provider(&key) {
        return Ok(existing);
      }
    }

    let entry = RegisteredProvider::new(key, provider);
    entry.prepare(self)?;
    if self.has_booted() {
      entry.initialize(self)?;
    }
    self.inner.providers.write().push(entry.clone());
    Ok(entry)
  }

  /// Every registered provider, in registration order.
  pub fn providers(&self) -> Vec<RegisteredProvider> {
    self.inner.providers.read().clone()
  }

  /// The registered providers of type `P`.
  pub fn providers_of<P: ServiceProvider + 'static>(&self) -> Vec<RegisteredProvider> {
    let key = ServiceKey::of::<P>();
    self
      .inner
      .providers
      .read()
      .iter()
      .filter(|entry| entry.key() == &key)
      .cloned()
      .collect()
  }

  pub fn has_provider(&self, key: impl Into<ServiceKey>) -> bool {
    self.provider(key).is_some()
  }

  /// The first provider registered under the key, if any.
  pub fn provider(&self, key: impl Into<ServiceKey>) -> Option<RegisteredProvider> {
    let key = key.into();
    self
      .inner
      .providers
      .read()
      .iter()
      .find(|entry| entry.key() == &key)
      .cloned()
  }

  /// Boots the application: runs each bootstrapper, then initializes
  /// every registered provider in registration order.
  ///
  /// The provider loop is index-based on purpose: a provider registered
  /// while another boots is picked up within the same pass. The `booted`
  /// flag flips at the end, unconditionally, and a second boot is a
  /// no-op.
  pub fn boot(&self, bootstrappers: &[Arc<dyn Bootstrapper>]) -> Result<(), ContainerError> {
    if self.has_booted() {
      return Ok(());
    }

    for bootstrapper in bootstrappers {
      bootstrapper.bootstrap(self)?;
    }

    let mut index = 0;
    loop {
      // The read guard is scoped out before initializing, so a booting
      // provider may register further providers without deadlocking.
      let entry = {
        let providers = self.inner.providers.read();
        match providers.get(index) {
          Some(entry) => entry.clone(),
          None => break,
        }
      };
      entry.initialize(self)?;
      index += 1;
    }

    self.inner.booted.store(true, Ordering::SeqCst);
    Ok(())
  }
}

impl Deref for Application {
  type Target = Container;

  fn deref(&self) -> &Container {
    &self.inner.container
  }
}
