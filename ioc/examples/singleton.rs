//! Demonstrates singleton vs transient bindings.

use std::sync::atomic::{AtomicI64, Ordering};

use chassis_ioc::{Container, Value};

fn main() {
  let container = Container::new();

  let opened = AtomicI64::new(0);
  container
    .bind_fn("connection", move |_, _| {
      let id = opened.fetch_add(1, Ordering::SeqCst);
      println!("opening connection {id}");
      Ok(Value::new(id))
    })
    .singleton(true);

  // The resolver runs once; both makes return the cached connection.
  let first = container.make("connection").unwrap();
  let second = container.make("connection").unwrap();

  assert_eq!(first.cloned::<i64>(), second.cloned::<i64>());
  println!("both resolutions shared connection {:?}", first.cloned::<i64>());
}
