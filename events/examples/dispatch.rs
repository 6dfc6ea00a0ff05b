//! Demonstrates multi-cast dispatch with ordered results.

use chassis_events::{Dispatcher, Listener};
use chassis_ioc::{Container, Value};

fn main() {
  let dispatcher = Dispatcher::new(Container::new());

  dispatcher.listen(
    "user.created",
    vec![
      Listener::callback(|event, _| Value::new(format!("audit:{}", event.name()))),
      Listener::callback(|event, _| Value::new(format!("mail:{}", event.name()))),
    ],
  );

  let responses = dispatcher.dispatch("user.created").unwrap();
  for response in responses {
    if let Some(line) = response.cloned::<String>() {
      println!("{line}");
    }
  }
}
