//! Boots an application with a provider and dispatches an event.

use std::sync::Arc;

use chassis_events::{Dispatcher, Listener};
use chassis_foundation::fs::Directory;
use chassis_foundation::log::logger;
use chassis_foundation::{Application, ServiceProvider};
use chassis_ioc::{ContainerError, Value};

struct GreetingProvider;

impl ServiceProvider for GreetingProvider {
  fn register(&self, app: &Application) -> Result<(), ContainerError> {
    app
      .container()
      .bind_fn("greeting", |_, _| Ok(Value::new(String::from("hello"))));
    Ok(())
  }

  fn boot(&self, app: &Application) -> Result<(), ContainerError> {
    let dispatcher = app.get::<Dispatcher>()?;
    dispatcher.listen(
      "app.ready",
      Listener::callback(|event, _| Value::new(format!("seen:{}", event.name()))),
    );
    Ok(())
  }
}

fn main() {
  let app = Application::new(Directory::new(".").unwrap()).unwrap();

  app
    .register_provider(
      chassis_ioc::ServiceKey::new("greeting_provider"),
      Arc::new(GreetingProvider),
      false,
    )
    .unwrap();
  app.boot(&[]).unwrap();

  let log = logger(app.container()).unwrap();
  let greeting = app.make("greeting").unwrap();
  log.log(&format!(
    "resolved greeting: {}",
    greeting.cloned::<String>().unwrap_or_default()
  ));

  let dispatcher = app.get::<Dispatcher>().unwrap();
  let responses = dispatcher.dispatch("app.ready").unwrap();
  for response in responses {
    if let Some(line) = response.cloned::<String>() {
      log.log(&line);
    }
  }
}
