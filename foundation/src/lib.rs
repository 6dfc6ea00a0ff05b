//! # Chassis Foundation
//!
//! The application lifecycle shell over the chassis service container:
//! service providers, bootstrappers, a stream logger, filesystem path
//! value objects and an environment snapshot repository.
//!
//! An [`Application`] wraps a [`Container`](chassis_ioc::Container) (and
//! dereferences to it), carries a base [`Directory`](fs::Directory), and
//! runs a two-phase provider lifecycle: every provider's `register` binds
//! services when the provider is added, and `boot` runs once during the
//! application's boot pass. Construction registers the core providers,
//! so the logger and the event dispatcher resolve out of the box.
//!
//! ## Quick Start
//!
//! ```
//! use chassis_foundation::fs::Directory;
//! use chassis_foundation::Application;
//! use chassis_ioc::Value;
//!
//! let base = Directory::new(".").unwrap();
//! let app = Application::new(base).unwrap();
//!
//! app.boot(&[]).unwrap();
//!
//! app.container().bind_fn("greeter", |_, _| Ok(Value::new(String::from("hi"))));
//! let greeting = app.make("greeter").unwrap();
//! assert_eq!(greeting.cloned::<String>().as_deref(), Some("hi"));
//! ```

mod app;
mod bootstrap;
mod events;
mod helpers;
mod provider;

pub mod env;
pub mod fs;
pub mod log;

pub use app::Application;
pub use bootstrap::{Bootstrapper, LoadEnvVariables};
pub use events::EventServiceProvider;
pub use helpers::{bind_global, dispatch_global, dispatch_global_with, make_global};
pub use log::{LogServiceProvider, Logger, StreamLogger};
pub use provider::{RegisteredProvider, ServiceProvider};
