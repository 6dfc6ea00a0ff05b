use std::io::Write;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use chassis_foundation::env::{EnvValue, Repository};
use chassis_foundation::fs::{self, PathError};
use chassis_foundation::log::logger;
use chassis_foundation::{Application, Bootstrapper, LoadEnvVariables, Logger, StreamLogger};

// --- Filesystem Tests ---

#[test]
fn canonicalizes_existing_paths() {
  let dir = tempdir().unwrap();
  let file_path = dir.path().join("sample.txt");
  std::fs::write(&file_path, "hello").unwrap();

  let path = fs::Path::new(&file_path).unwrap();

  assert!(path.is_file());
  assert!(!path.is_directory());
  assert_eq!(path.basename(), "sample.txt");
}

#[test]
fn files_expose_their_naming_parts() {
  let dir = tempdir().unwrap();
  let file_path = dir.path().join("sample.txt");
  std::fs::write(&file_path, "hello").unwrap();

  let file = fs::File::new(&file_path).unwrap();

  assert_eq!(file.name(), "sample");
  assert_eq!(file.extension(), "txt");
  assert_eq!(file.full_name(), "sample.txt");

  // The containing directory matches the canonicalized temp dir.
  let canonical_dir = fs::Path::new(dir.path()).unwrap();
  assert_eq!(file.directory().path(), &canonical_dir);
}

#[test]
fn paths_view_as_files_or_directories() {
  let dir = tempdir().unwrap();
  let file_path = dir.path().join("sample.txt");
  std::fs::write(&file_path, "hello").unwrap();

  let directory_path = fs::Path::new(dir.path()).unwrap();
  assert!(directory_path.is_directory());
  assert!(directory_path.file().is_none());
  assert_eq!(directory_path.directory().path(), &directory_path);

  let file_path = fs::Path::new(&file_path).unwrap();
  assert!(file_path.file().is_some());
  assert_eq!(file_path.directory().path(), &directory_path);
}

#[test]
fn missing_paths_are_path_not_found() {
  let err = fs::Path::new("/definitely/missing/chassis/path").unwrap_err();

  assert!(matches!(err, PathError::PathNotFound(_)));
}

#[test]
fn empty_paths_are_invalid() {
  let err = fs::Path::new("").unwrap_err();

  assert_eq!(err, PathError::InvalidPath(String::new()));
}

#[test]
fn directories_wrap_paths() {
  let dir = tempdir().unwrap();

  let directory = fs::Directory::new(dir.path()).unwrap();

  assert!(directory.path().is_directory());
  assert!(!directory.name().is_empty());
}

// --- Logger Tests ---

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
  fn contents(&self) -> String {
    String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
  }
}

impl Write for SharedBuffer {
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.0.lock().unwrap().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

#[test]
fn stream_logger_writes_timestamped_lines() {
  let out = SharedBuffer::default();
  let err = SharedBuffer::default();
  let logger = StreamLogger::new(Box::new(out.clone()), Box::new(err.clone()));

  logger.log("hello");
  logger.error("oops");

  let out = out.contents();
  assert!(out.starts_with('['));
  assert!(out.ends_with("] hello\n"));

  let err = err.contents();
  assert!(err.starts_with('['));
  assert!(err.ends_with("] oops\n"));
}

#[test]
fn applications_bind_a_logger_singleton() {
  let app = Application::new(fs::Directory::new(".").unwrap()).unwrap();

  let first = logger(app.container()).unwrap();
  let second = logger(app.container()).unwrap();

  // One logger per application.
  assert!(Arc::ptr_eq(&first, &second));
}

// --- Environment Tests ---

#[test]
fn repositories_snapshot_and_cast() {
  let repository = Repository::from_vars(vec![
    (String::from("APP_DEBUG"), String::from("true")),
    (String::from("APP_WORKERS"), String::from("4")),
    (String::from("APP_RATIO"), String::from("0.5")),
    (String::from("APP_NAME"), String::from("chassis")),
  ]);

  assert!(repository.has("APP_DEBUG"));
  assert!(!repository.has("MISSING"));
  assert_eq!(repository.get_raw("APP_NAME").as_deref(), Some("chassis"));
  assert_eq!(repository.get("APP_DEBUG"), Some(EnvValue::Bool(true)));
  assert_eq!(repository.get("APP_WORKERS"), Some(EnvValue::Int(4)));
  assert_eq!(repository.get("APP_RATIO"), Some(EnvValue::Float(0.5)));
  assert_eq!(
    repository.get("APP_NAME"),
    Some(EnvValue::Str(String::from("chassis")))
  );
  assert_eq!(repository.get("MISSING"), None);
}

#[test]
fn load_env_variables_binds_a_repository() {
  std::env::set_var("CHASSIS_TEST_MARKER", "1");

  let app = Application::new(fs::Directory::new(".").unwrap()).unwrap();
  let bootstrappers: Vec<Arc<dyn Bootstrapper>> = vec![Arc::new(LoadEnvVariables)];
  app.boot(&bootstrappers).unwrap();

  let repository = app.get::<Repository>().unwrap();
  assert!(repository.has("CHASSIS_TEST_MARKER"));
  assert_eq!(
    repository.get("CHASSIS_TEST_MARKER"),
    Some(EnvValue::Int(1))
  );
}
