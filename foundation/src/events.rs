//! The event dispatcher's service provider.

use chassis_events::Dispatcher;
use chassis_ioc::{BindingSource, ContainerError, ServiceKey, Value};

use crate::app::Application;
use crate::provider::ServiceProvider;

/// Binds the event [`Dispatcher`] as a singleton over the application's
/// container.
pub struct EventServiceProvider;

impl ServiceProvider for EventServiceProvider {
  fn register(&self, app: &Application) -> Result<(), ContainerError> {
    app
      .container()
      .bind(
        ServiceKey::of::<Dispatcher>(),
        BindingSource::resolver(|container, _| Ok(Value::new(Dispatcher::new(container.clone())))),
      )
      .singleton(true);
    Ok(())
  }
}
