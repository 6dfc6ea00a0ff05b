//! The logger collaborator and its service provider.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use chassis_ioc::{BindingSource, ContainerError, ServiceKey, Value};

use crate::app::Application;
use crate::provider::ServiceProvider;

/// A minimal logging capability: timestamped lines to an output stream
/// and an error stream.
pub trait Logger: Send + Sync {
  fn log(&self, message: &str);
  fn error(&self, message: &str);
}

type Sink = Mutex<Box<dyn Write + Send>>;

/// A [`Logger`] writing `[DD-MM-YYYY HH:MM:SS] message` lines to a pair
/// of sinks, by default stdout and stderr.
pub struct StreamLogger {
  out: Sink,
  err: Sink,
}

impl StreamLogger {
  pub fn stdio() -> Self {
    Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
  }

  pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
    StreamLogger {
      out: Mutex::new(out),
      err: Mutex::new(err),
    }
  }

  fn write_line(sink: &Sink, message: &str) {
    let stamp = chrono::Local::now().format("%d-%m-%Y %H:%M:%S");
    let mut sink = sink.lock();
    // A failed log write has nowhere left to report to.
    let _ = writeln!(sink, "[{stamp}] {message}");
  }
}

impl Logger for StreamLogger {
  fn log(&self, message: &str) {
    Self::write_line(&self.out, message);
  }

  fn error(&self, message: &str) {
    Self::write_line(&self.err, message);
  }
}

/// Binds the application logger as a singleton under the
/// `dyn Logger` key.
pub struct LogServiceProvider;

impl ServiceProvider for LogServiceProvider {
  fn register(&self, app: &Application) -> Result<(), ContainerError> {
    app
      .container()
      .bind(
        ServiceKey::of::<dyn Logger>(),
        BindingSource::resolver(|_, _| {
          Ok(Value::new::<Arc<dyn Logger>>(Arc::new(StreamLogger::stdio())))
        }),
      )
      .singleton(true);
    Ok(())
  }
}

/// Resolves the application logger from a container.
pub fn logger(container: &chassis_ioc::Container) -> Result<Arc<dyn Logger>, ContainerError> {
  container.make_cloned::<Arc<dyn Logger>>(ServiceKey::of::<dyn Logger>())
}
