//! # Chassis Events
//!
//! A container-aware event dispatcher.
//!
//! Listeners are registered against event keys and invoked in
//! registration order when an event is dispatched; every listener's
//! result is collected into the dispatch result. Listeners are either
//! ready handlers (closures adapt via [`Listener::callback`]) or services
//! resolved through the [`Container`](chassis_ioc::Container) at dispatch
//! time.
//!
//! ## Quick Start
//!
//! ```
//! use chassis_events::{Dispatcher, Listener};
//! use chassis_ioc::{Container, Value};
//!
//! let dispatcher = Dispatcher::new(Container::new());
//!
//! dispatcher.listen(
//!   "ping",
//!   Listener::callback(|event, _| Value::new(format!("pong:{}", event.name()))),
//! );
//!
//! let responses = dispatcher.dispatch("ping").unwrap();
//! assert_eq!(responses[0].cloned::<String>().as_deref(), Some("pong:ping"));
//! ```

mod dispatcher;
mod event;
mod listener;

pub use dispatcher::Dispatcher;
pub use event::{Event, EventKeys};
pub use listener::{EventListener, Listener, Listeners, Payload};
