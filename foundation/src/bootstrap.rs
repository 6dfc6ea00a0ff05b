//! Bootstrappers: one-shot setup actions run at application boot.

use chassis_ioc::{ContainerError, ServiceKey};

use crate::app::Application;
use crate::env::Repository;

/// A setup action invoked once per entry during [`Application::boot`],
/// before any provider boots.
pub trait Bootstrapper: Send + Sync {
  fn bootstrap(&self, app: &Application) -> Result<(), ContainerError>;
}

/// Binds a snapshot of the process environment into the container.
pub struct LoadEnvVariables;

impl Bootstrapper for LoadEnvVariables {
  fn bootstrap(&self, app: &Application) -> Result<(), ContainerError> {
    app
      .container()
      .value(ServiceKey::of::<Repository>(), Repository::from_process());
    Ok(())
  }
}
