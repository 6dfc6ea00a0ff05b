//! # Chassis IoC
//!
//! A dynamic service container for Rust with binding/resolution semantics
//! and metadata-driven dependency injection.
//!
//! Services are registered under a [`ServiceKey`] (usually a type's key,
//! sometimes an arbitrary string) and resolved as type-erased [`Value`]s.
//! Types that want constructor injection implement [`Injectable`],
//! describing their parameters as explicit metadata instead of relying on
//! runtime reflection; the container then builds them through
//! [`Container::call`], substituting bound services for hinted parameters
//! and letting explicit named arguments win over injected ones.
//!
//! ## Core Concepts
//!
//! - **Container**: the central registry for all your services.
//! - **Binding**: one resolvable service, a resolver plus singleton and
//!   resolution state.
//! - **Injectable**: the capability a type implements to be constructed
//!   with injection.
//! - **CallTarget**: a tagged description of something callable: a
//!   constructor, a function, a static or an instance method.
//!
//! ## Quick Start
//!
//! ```
//! use chassis_ioc::{
//!   Arguments, Container, ContainerError, Injectable, Parameters, ServiceKey, TypeHint,
//! };
//!
//! struct Greeter {
//!   message: String,
//! }
//!
//! impl Greeter {
//!   fn greet(&self) -> String {
//!     self.message.clone()
//!   }
//! }
//!
//! impl Injectable for Greeter {
//!   fn parameters() -> Parameters {
//!     Parameters::new().with("message", TypeHint::of::<String>())
//!   }
//!
//!   fn construct(arguments: &Arguments) -> Result<Self, ContainerError> {
//!     Ok(Greeter {
//!       message: arguments.require::<String>("message")?.as_ref().clone(),
//!     })
//!   }
//! }
//!
//! let container = Container::new();
//!
//! // Register a value the greeter depends on, then the greeter itself.
//! container.value(ServiceKey::of::<String>(), String::from("Hello, World!"));
//! container.bind_type::<Greeter>();
//!
//! let greeter = container.get::<Greeter>().unwrap();
//! assert_eq!(greeter.greet(), "Hello, World!");
//! ```

mod arguments;
mod binding;
mod call;
mod container;
mod core;
mod error;
mod key;
mod parameters;
mod value;

pub use arguments::Arguments;
pub use binding::{Binding, BindingSource, Resolver};
pub use call::{CallTarget, FunctionSpec, Injectable, MethodSpec, TypeSpec};
pub use container::{Container, MakeOptions, WeakContainer};
pub use error::ContainerError;
pub use key::ServiceKey;
pub use parameters::{Parameter, Parameters, TypeHint};
pub use value::Value;
