//! A snapshot repository over process environment variables.

use std::collections::HashMap;

use parking_lot::RwLock;

/// A value read from the environment, cast from its raw string form.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvValue {
  Str(String),
  Bool(bool),
  Int(i64),
  Float(f64),
}

/// Holds a snapshot of environment variables.
///
/// The snapshot is taken at construction and refreshed on
/// [`Repository::reload`]; lookups never touch the process environment
/// directly.
pub struct Repository {
  variables: RwLock<HashMap<String, String>>,
}

impl Repository {
  /// Snapshots the current process environment.
  pub fn from_process() -> Self {
    Repository {
      variables: RwLock::new(std::env::vars().collect()),
    }
  }

  /// Builds a repository over explicit variables.
  pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
    Repository {
      variables: RwLock::new(vars.into_iter().collect()),
    }
  }

  /// The raw string value, without casts.
  pub fn get_raw(&self, key: &str) -> Option<String> {
    self.variables.read().get(key).cloned()
  }

  /// The value with casts applied: `true`/`false` become booleans,
  /// numeric strings become integers or floats, anything else stays a
  /// string.
  pub fn get(&self, key: &str) -> Option<EnvValue> {
    let raw = self.get_raw(key)?;
    Some(Self::cast(raw))
  }

  pub fn has(&self, key: &str) -> bool {
    self.variables.read().contains_key(key)
  }

  /// Replaces the snapshot with the current process environment.
  pub fn reload(&self) {
    *self.variables.write() = std::env::vars().collect();
  }

  fn cast(raw: String) -> EnvValue {
    match raw.as_str() {
      "true" => return EnvValue::Bool(true),
      "false" => return EnvValue::Bool(false),
      _ => {}
    }
    if let Ok(int) = raw.parse::<i64>() {
      return EnvValue::Int(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
      return EnvValue::Float(float);
    }
    EnvValue::Str(raw)
  }
}
