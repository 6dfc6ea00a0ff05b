//! Filesystem path value objects.
//!
//! A [`Path`] canonicalizes on construction, so a value that exists is
//! known to point at something real; [`Directory`] and [`File`] are thin
//! views over it with naming helpers.

use std::fmt;
use std::path::{Path as StdPath, PathBuf};

use thiserror::Error;

/// Errors raised when building path value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
  /// The input cannot denote a filesystem path at all.
  #[error("`{0}` is not a valid filesystem path")]
  InvalidPath(String),

  /// The path is well-formed but nothing exists there.
  #[error("path `{0}` does not exist")]
  PathNotFound(String),
}

/// A canonicalized filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
  path: PathBuf,
}

impl Path {
  /// Canonicalizes the given path.
  ///
  /// Fails with `InvalidPath` for an empty input and `PathNotFound` when
  /// the path does not resolve to an existing file or directory.
  pub fn new(path: impl AsRef<StdPath>) -> Result<Self, PathError> {
    let raw = path.as_ref();
    if raw.as_os_str().is_empty() {
      return Err(PathError::InvalidPath(String::new()));
    }
    let path = raw
      .canonicalize()
      .map_err(|_| PathError::PathNotFound(raw.display().to_string()))?;
    Ok(Path { path })
  }

  /// The last segment of the path.
  pub fn basename(&self) -> &str {
    self
      .path
      .file_name()
      .and_then(|name| name.to_str())
      .unwrap_or_default()
  }

  pub fn is_file(&self) -> bool {
    self.path.is_file()
  }

  /// The path as a file, when it points at one.
  pub fn file(&self) -> Option<File> {
    self.is_file().then(|| File { path: self.clone() })
  }

  pub fn is_directory(&self) -> bool {
    self.path.is_dir()
  }

  /// The directory of the path; for a file this is its parent directory.
  pub fn directory(&self) -> Directory {
    if self.is_directory() {
      return Directory { path: self.clone() };
    }
    // A canonical file path always has a parent.
    let parent = self.path.parent().unwrap_or(&self.path).to_path_buf();
    Directory {
      path: Path { path: parent },
    }
  }

  pub fn as_std(&self) -> &StdPath {
    &self.path
  }
}

impl fmt::Display for Path {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.path.display())
  }
}

/// A directory on the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
  path: Path,
}

impl Directory {
  pub fn new(path: impl AsRef<StdPath>) -> Result<Self, PathError> {
    Ok(Directory {
      path: Path::new(path)?,
    })
  }

  /// The directory name.
  pub fn name(&self) -> &str {
    self.path.basename()
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl fmt::Display for Directory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.path)
  }
}

/// A file on the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
  path: Path,
}

impl File {
  pub fn new(path: impl AsRef<StdPath>) -> Result<Self, PathError> {
    Ok(File {
      path: Path::new(path)?,
    })
  }

  /// The file name without its extension.
  pub fn name(&self) -> &str {
    self
      .path
      .as_std()
      .file_stem()
      .and_then(|stem| stem.to_str())
      .unwrap_or_default()
  }

  /// The extension, empty when the file has none.
  pub fn extension(&self) -> &str {
    self
      .path
      .as_std()
      .extension()
      .and_then(|extension| extension.to_str())
      .unwrap_or_default()
  }

  /// The file name with its extension.
  pub fn full_name(&self) -> &str {
    self.path.basename()
  }

  /// The directory containing the file.
  pub fn directory(&self) -> Directory {
    self.path.directory()
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl fmt::Display for File {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.path)
  }
}
