//! Declared-parameter metadata for injectable call targets.
//!
//! Instead of inspecting signatures at runtime, a call target carries an
//! explicit, ordered description of its parameters: a name plus a
//! [`TypeHint`]. The container walks this metadata when it injects
//! dependencies.

use std::borrow::Cow;

use crate::error::ContainerError;
use crate::key::ServiceKey;

/// The declared type of a parameter.
///
/// `Untyped` (nothing declared) and `Any` (declared, but unconstrained)
/// are deliberately distinct: both are skipped by injection, since neither
/// names a service key, but `Any` counts as a declared type and survives
/// the `only_typed` filter of [`Parameters::types`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeHint {
  /// No type was declared for the parameter.
  Untyped,
  /// A declared type that places no restriction on the value.
  Any,
  /// The parameter is declared as a resolvable service.
  Service(ServiceKey),
}

impl TypeHint {
  /// Hints the parameter as a service of type `T`.
  pub fn of<T: ?Sized + 'static>() -> Self {
    TypeHint::Service(ServiceKey::of::<T>())
  }

  pub fn service(key: impl Into<ServiceKey>) -> Self {
    TypeHint::Service(key.into())
  }

  pub fn is_typed(&self) -> bool {
    !matches!(self, TypeHint::Untyped)
  }
}

/// One declared parameter: a name and its hint.
#[derive(Clone, Debug)]
pub struct Parameter {
  name: Cow<'static, str>,
  hint: TypeHint,
}

impl Parameter {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn hint(&self) -> &TypeHint {
    &self.hint
  }
}

/// An ordered, immutable list of declared parameters.
///
/// Built once per call target, in declaration order. A target with no
/// parameters is modelled by an empty list, not an error.
#[derive(Clone, Debug, Default)]
pub struct Parameters {
  parameters: Vec<Parameter>,
}

impl Parameters {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a parameter, consuming and returning the list for fluent
  /// construction.
  pub fn with(mut self, name: impl Into<Cow<'static, str>>, hint: TypeHint) -> Self {
    self.parameters.push(Parameter {
      name: name.into(),
      hint,
    });
    self
  }

  /// Parameter names, in declaration order.
  pub fn names(&self) -> Vec<&str> {
    self.parameters.iter().map(Parameter::name).collect()
  }

  pub fn has_parameter(&self, name: &str) -> bool {
    self.parameters.iter().any(|parameter| parameter.name == name)
  }

  /// Returns the named parameter, or `ParameterNotFound`.
  pub fn parameter(&self, name: &str) -> Result<&Parameter, ContainerError> {
    self
      .parameters
      .iter()
      .find(|parameter| parameter.name == name)
      .ok_or_else(|| ContainerError::ParameterNotFound(name.to_owned()))
  }

  /// Name → hint pairs in declaration order.
  ///
  /// With `only_typed`, parameters without a declared type are omitted;
  /// `Any` is a declared type and is kept.
  pub fn types(&self, only_typed: bool) -> Vec<(&str, &TypeHint)> {
    self
      .parameters
      .iter()
      .filter(|parameter| !only_typed || parameter.hint.is_typed())
      .map(|parameter| (parameter.name(), parameter.hint()))
      .collect()
  }

  /// The declared hint of the named parameter, or `ParameterNotFound`.
  pub fn type_of(&self, name: &str) -> Result<&TypeHint, ContainerError> {
    self.parameter(name).map(Parameter::hint)
  }

  /// Names of parameters carrying a declared type.
  pub fn typed(&self) -> Vec<&str> {
    self
      .parameters
      .iter()
      .filter(|parameter| parameter.hint.is_typed())
      .map(Parameter::name)
      .collect()
  }

  /// Names of parameters without a declared type.
  pub fn untyped(&self) -> Vec<&str> {
    self
      .parameters
      .iter()
      .filter(|parameter| !parameter.hint.is_typed())
      .map(Parameter::name)
      .collect()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
    self.parameters.iter()
  }

  pub fn len(&self) -> usize {
    self.parameters.len()
  }

  pub fn is_empty(&self) -> bool {
    self.parameters.is_empty()
  }
}
