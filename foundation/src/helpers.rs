//! Free helpers over the process-wide application.
//!
//! These cover the "resolve through whatever application is global"
//! pattern without giving types ambient container state: every helper
//! fails with `ContainerNotFound` when no global application exists.

use std::sync::Arc;

use chassis_events::{Dispatcher, Event, Payload};
use chassis_ioc::{Arguments, Binding, ContainerError, Injectable, Value};

use crate::app::Application;

fn global_app() -> Result<Application, ContainerError> {
  Application::get_global().ok_or(ContainerError::ContainerNotFound)
}

/// Binds `T` into the global application's container.
pub fn bind_global<T: Injectable>() -> Result<Binding, ContainerError> {
  Ok(global_app()?.container().bind_type::<T>())
}

/// Resolves `T` from the global application's container.
pub fn make_global<T: Injectable>() -> Result<Arc<T>, ContainerError> {
  global_app()?.container().make_type::<T>(&Arguments::new())
}

/// Dispatches an event through the global application's dispatcher.
pub fn dispatch_global(event: impl Into<Event>) -> Result<Vec<Value>, ContainerError> {
  dispatch_global_with(event, Payload::new())
}

/// Dispatches an event with a payload through the global application's
/// dispatcher.
pub fn dispatch_global_with(
  event: impl Into<Event>,
  payload: Payload,
) -> Result<Vec<Value>, ContainerError> {
  let app = global_app()?;
  let dispatcher = app.container().get::<Dispatcher>()?;
  dispatcher.dispatch_with(event, payload)
}
