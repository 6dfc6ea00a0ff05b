//! Demonstrates constructor injection through declared metadata.

use std::sync::Arc;

use chassis_ioc::{Arguments, Container, ContainerError, Injectable, Parameters, TypeHint};

struct Config {
  url: String,
}

struct Database {
  config: Arc<Config>,
}

impl Injectable for Config {
  fn parameters() -> Parameters {
    Parameters::new()
  }

  fn construct(_: &Arguments) -> Result<Self, ContainerError> {
    Ok(Config {
      url: String::from("postgres://localhost/app"),
    })
  }
}

impl Injectable for Database {
  fn parameters() -> Parameters {
    Parameters::new().with("config", TypeHint::of::<Config>())
  }

  fn construct(arguments: &Arguments) -> Result<Self, ContainerError> {
    Ok(Database {
      config: arguments.require::<Config>("config")?,
    })
  }
}

fn main() {
  let container = Container::new();

  container.bind_type::<Config>().singleton(true);
  container.bind_type::<Database>();

  let database = container.get::<Database>().unwrap();
  println!("connected to {}", database.config.url);
}
