//! Validated destination directory type.

use crate::Result;
use crate::ScaffoldError;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// An existing directory, held as an absolute canonical path.
///
/// Used twice per run: once for the output base directory and once for the
/// project root below it, against which every [`SafePath`](super::SafePath)
/// is validated.
///
/// # Examples
///
/// ```no_run
/// use gocanon_core::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/tmp")?;
/// println!("Scaffolding into: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates a new `DestDir` after validating the path.
    ///
    /// # Security Considerations
    ///
    /// There is a time-of-check-time-of-use window between the checks and
    /// later writes. Canonicalizing here and re-checking parents in
    /// `SafePath::validate` narrows it; closing it fully would require
    /// `openat()`-style I/O.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::Io` if the path does not exist, is not a
    /// directory, or cannot be canonicalized.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(ScaffoldError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("destination directory does not exist: {}", path.display()),
            )));
        }

        if !path.is_dir() {
            return Err(ScaffoldError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path is not a directory: {}", path.display()),
            )));
        }

        let canonical = path.canonicalize().map_err(|e| {
            ScaffoldError::Io(io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {}", path.display(), e),
            ))
        })?;

        Ok(Self(canonical))
    }

    /// Creates `self/name` (and nothing above it) if missing and returns it
    /// as a new `DestDir`.
    ///
    /// `name` must be a single path segment; callers pass a validated
    /// [`ProjectName`](super::ProjectName).
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::DirectoryCreate` if the directory cannot be
    /// created.
    pub fn create_child(&self, name: &str) -> Result<Self> {
        let path = self.0.join(name);
        std::fs::create_dir_all(&path).map_err(|source| ScaffoldError::DirectoryCreate {
            path: path.clone(),
            source,
        })?;
        Self::new(path)
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a `SafePath` to this destination directory.
    #[inline]
    #[must_use]
    pub fn join(&self, safe_path: &super::SafePath) -> PathBuf {
        self.0.join(safe_path.as_path())
    }

    /// Joins an already validated path to this destination directory.
    #[inline]
    #[must_use]
    pub fn join_path(&self, path: &Path) -> PathBuf {
        self.0.join(path)
    }
}
