//! Error types for template extraction and rewriting.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ScaffoldError`.
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Errors that can occur while scaffolding a project.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// I/O operation failed outside of a more specific phase.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Template archive is missing or its central directory is unreadable.
    #[error("cannot open template archive {path}: {reason}")]
    ArchiveOpen {
        /// Archive path as given by the caller.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },

    /// An entry inside an opened archive could not be read.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Entry resolves outside the project root.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// Stored path of the offending entry.
        path: PathBuf,
    },

    /// Directory (or a parent chain) could not be created.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Entry content could not be copied to its destination.
    #[error("failed to write {path}: {source}")]
    Copy {
        /// Destination file.
        path: PathBuf,
        /// First I/O error observed for this file.
        source: io::Error,
    },

    /// Tree traversal failed during the rewrite pass.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Entry that could not be visited.
        path: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },

    /// A rewrite target could not be read or written back.
    #[error("failed to rewrite {path}: {source}")]
    Rewrite {
        /// Rewrite target.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Project name is unusable as a directory name.
    #[error("invalid project name {name:?}: {reason}")]
    InvalidProjectName {
        /// Name as supplied (after trimming).
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Configuration is inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Staged extraction cannot rename over an existing path.
    #[error("destination already exists: {path}")]
    DestinationExists {
        /// Final project root.
        path: PathBuf,
    },

    /// Archive holds more entries than the configured limit.
    #[error("template archive has too many entries ({count} > {max})")]
    TooManyEntries {
        /// Entries in the archive.
        count: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl ScaffoldError {
    /// Returns `true` if this error represents a security violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use gocanon_core::ScaffoldError;
    /// use std::path::PathBuf;
    ///
    /// let err = ScaffoldError::PathTraversal {
    ///     path: PathBuf::from("go-canonical/../../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ScaffoldError::InvalidArchive("truncated".to_string());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. } | Self::TooManyEntries { .. }
        )
    }

    /// Stable machine-readable code for this error class.
    ///
    /// Used by the CLI for JSON output and exit code selection.
    ///
    /// ```
    /// use gocanon_core::ScaffoldError;
    ///
    /// let err = ScaffoldError::InvalidConfig {
    ///     reason: "empty placeholder".into(),
    /// };
    /// assert_eq!(err.code(), "INVALID_CONFIG");
    /// ```
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO_ERROR",
            Self::ArchiveOpen { .. } => "ARCHIVE_OPEN",
            Self::InvalidArchive(_) => "INVALID_ARCHIVE",
            Self::PathTraversal { .. } => "PATH_TRAVERSAL",
            Self::DirectoryCreate { .. } => "DIRECTORY_CREATE",
            Self::Copy { .. } => "COPY",
            Self::Walk { .. } => "WALK",
            Self::Rewrite { .. } => "REWRITE",
            Self::InvalidProjectName { .. } => "INVALID_PROJECT_NAME",
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
            Self::DestinationExists { .. } => "DESTINATION_EXISTS",
            Self::TooManyEntries { .. } => "TOO_MANY_ENTRIES",
        }
    }

    /// Returns the filesystem path this error is about, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::ArchiveOpen { path, .. }
            | Self::PathTraversal { path }
            | Self::DirectoryCreate { path, .. }
            | Self::Copy { path, .. }
            | Self::Walk { path, .. }
            | Self::Rewrite { path, .. }
            | Self::DestinationExists { path } => Some(path),
            _ => None,
        }
    }
}
