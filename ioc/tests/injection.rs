use std::sync::Arc;

use chassis_ioc::{
  Arguments, CallTarget, Container, ContainerError, Injectable, MethodSpec, Parameters,
  ServiceKey, TypeHint, Value,
};

// --- Test Fixtures ---

struct Sample;

impl Sample {
  fn example(&self, multiplier: i64) -> i64 {
    10 * multiplier
  }
}

impl Injectable for Sample {
  fn parameters() -> Parameters {
    Parameters::new()
  }

  fn construct(_: &Arguments) -> Result<Self, ContainerError> {
    Ok(Sample)
  }

  fn methods() -> Vec<MethodSpec> {
    vec![
      MethodSpec::static_method("default_multiplier", Parameters::new(), |_| {
        Ok(Value::new(10_i64))
      }),
      MethodSpec::instance_method(
        "example",
        Parameters::new().with("multiplier", TypeHint::Untyped),
        |this, arguments| {
          let sample = this
            .downcast::<Sample>()
            .ok_or(ContainerError::TypeMismatch {
              key: ServiceKey::of::<Sample>(),
              expected: "Sample",
            })?;
          let multiplier = arguments.cloned::<i64>("multiplier").unwrap_or(1);
          Ok(Value::new(sample.example(multiplier)))
        },
      ),
    ]
  }
}

struct DI {
  pub sample: Arc<Sample>,
  pub a: Option<String>,
  pub b: Option<String>,
}

impl Injectable for DI {
  fn parameters() -> Parameters {
    Parameters::new()
      .with("sample", TypeHint::of::<Sample>())
      .with("a", TypeHint::Untyped)
      .with("b", TypeHint::Untyped)
  }

  fn construct(arguments: &Arguments) -> Result<Self, ContainerError> {
    Ok(DI {
      sample: arguments.require::<Sample>("sample")?,
      a: arguments.cloned::<String>("a"),
      b: arguments.cloned::<String>("b"),
    })
  }
}

// --- Injection Tests ---

#[test]
fn call_injects_bound_services_and_merges_explicit_arguments() {
  let container = Container::new();
  container.bind_type::<Sample>();
  container.register::<DI>();

  let value = container
    .call(
      &CallTarget::constructor::<DI>(),
      &Arguments::new()
        .with("a", String::from("Hello"))
        .with("b", String::from("World")),
    )
    .unwrap();
  let di = value.downcast::<DI>().unwrap();

  assert_eq!(di.a.as_deref(), Some("Hello"));
  assert_eq!(di.b.as_deref(), Some("World"));
}

#[test]
fn make_injects_dependencies_of_bound_types() {
  let container = Container::new();
  container.bind_type::<Sample>();
  container.bind_type::<DI>();

  let di = container.get::<DI>().unwrap();

  // The typed dependency was injected; the untyped ones stayed absent.
  assert!(di.a.is_none());
  assert!(di.b.is_none());
}

#[test]
fn unbound_typed_parameters_stay_absent() {
  struct Loose {
    pub missing: Option<Arc<Sample>>,
  }

  impl Injectable for Loose {
    fn parameters() -> Parameters {
      Parameters::new().with("missing", TypeHint::of::<Sample>())
    }

    fn construct(arguments: &Arguments) -> Result<Self, ContainerError> {
      Ok(Loose {
        missing: arguments.get_as::<Sample>("missing"),
      })
    }
  }

  let container = Container::new();
  container.register::<Loose>();

  // `Sample` is never bound, so the hinted parameter has nothing to
  // inject and resolves to absence.
  let loose = container.make_type::<Loose>(&Arguments::new()).unwrap();

  assert!(loose.missing.is_none());
}

#[test]
fn explicit_arguments_win_over_injection() {
  struct Holder {
    pub message: String,
  }

  impl Injectable for Holder {
    fn parameters() -> Parameters {
      Parameters::new().with("message", TypeHint::of::<String>())
    }

    fn construct(arguments: &Arguments) -> Result<Self, ContainerError> {
      Ok(Holder {
        message: arguments.require::<String>("message")?.as_ref().clone(),
      })
    }
  }

  let container = Container::new();
  container.value(ServiceKey::of::<String>(), String::from("injected"));
  container.register::<Holder>();

  let injected = container
    .call(&CallTarget::constructor::<Holder>(), &Arguments::new())
    .unwrap();
  assert_eq!(
    injected.downcast::<Holder>().unwrap().message,
    "injected"
  );

  let explicit = container
    .call(
      &CallTarget::constructor::<Holder>(),
      &Arguments::new().with("message", String::from("explicit")),
    )
    .unwrap();
  assert_eq!(
    explicit.downcast::<Holder>().unwrap().message,
    "explicit"
  );
}

#[test]
fn resolvers_may_call_with_their_own_arguments() {
  let container = Container::new();
  container.bind_type::<Sample>();
  container.register::<DI>();

  // A custom resolver can pre-fill arguments the caller never passes.
  container.bind_fn(ServiceKey::of::<DI>(), |container, _| {
    container.call(
      &CallTarget::constructor::<DI>(),
      &Arguments::new()
        .with("a", String::from("Hello"))
        .with("b", String::from("World")),
    )
  });

  let di = container.get::<DI>().unwrap();

  assert_eq!(di.a.as_deref(), Some("Hello"));
  assert_eq!(di.b.as_deref(), Some("World"));
}

#[test]
fn calls_functions_with_injection() {
  let container = Container::new();
  container.value(ServiceKey::of::<String>(), String::from("World"));

  let target = CallTarget::function(
    Parameters::new().with("name", TypeHint::of::<String>()),
    |arguments| {
      let name = arguments.require::<String>("name")?;
      Ok(Value::new(format!("Hello {name}")))
    },
  );

  let result = container.call(&target, &Arguments::new()).unwrap();

  assert_eq!(result.cloned::<String>().as_deref(), Some("Hello World"));
}

#[test]
fn calls_static_methods_on_registered_types() {
  let container = Container::new();
  container.register::<Sample>();

  let result = container
    .call(
      &CallTarget::static_method::<Sample>("default_multiplier"),
      &Arguments::new(),
    )
    .unwrap();

  assert_eq!(result.cloned::<i64>(), Some(10));
}

#[test]
fn calls_instance_methods_with_arguments() {
  let container = Container::new();
  container.register::<Sample>();

  let sample = container.make_type::<Sample>(&Arguments::new()).unwrap();
  let result = container
    .call(
      &CallTarget::method(sample, "example"),
      &Arguments::new().with("multiplier", 3_i64),
    )
    .unwrap();

  assert_eq!(result.cloned::<i64>(), Some(30));
}

#[test]
fn unknown_constructor_targets_are_service_not_found() {
  let container = Container::new();

  let err = container
    .call(&CallTarget::constructor_of("missing"), &Arguments::new())
    .unwrap_err();

  assert_eq!(err, ContainerError::ServiceNotFound(ServiceKey::from("missing")));
}

#[test]
fn wrong_method_shape_is_method_not_found() {
  let container = Container::new();
  container.register::<Sample>();

  // `example` exists, but as an instance method.
  let err = container
    .call(
      &CallTarget::static_method::<Sample>("example"),
      &Arguments::new(),
    )
    .unwrap_err();

  assert!(matches!(err, ContainerError::MethodNotFound { .. }));
}

#[test]
fn can_call_mirrors_target_shapes() {
  let container = Container::new();

  assert!(!container.can_call(&CallTarget::constructor::<Sample>()));

  container.register::<Sample>();

  assert!(container.can_call(&CallTarget::constructor::<Sample>()));
  assert!(container.can_call(&CallTarget::static_method::<Sample>("default_multiplier")));
  assert!(!container.can_call(&CallTarget::static_method::<Sample>("example")));
  assert!(!container.can_call(&CallTarget::static_method::<Sample>("missing")));
  assert!(container.can_call(&CallTarget::function(Parameters::new(), |_| {
    Ok(Value::new(0_i64))
  })));
}
