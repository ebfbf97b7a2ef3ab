//! Error conversion utilities for CLI.
//!
//! Converts gocanon-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance. The original
//! `ScaffoldError` stays reachable through `downcast_ref` so the process
//! exit code can be derived from it.

use gocanon_core::ScaffoldError;
use std::path::Path;

/// Process exit codes, one per error class.
pub mod exit {
    /// Run completed.
    pub const SUCCESS: u8 = 0;
    /// Anything not covered below.
    pub const FAILURE: u8 = 1;
    /// Bad command line, project name or configuration.
    pub const USAGE: u8 = 2;
    /// Template archive missing or unreadable.
    pub const ARCHIVE: u8 = 3;
    /// Entry escaping the project directory or entry limit exceeded.
    pub const SECURITY: u8 = 4;
    /// Directory or file could not be written during extraction.
    pub const EXTRACT_IO: u8 = 5;
    /// Rewrite pass failed.
    pub const REWRITE: u8 = 6;
}

/// Converts `ScaffoldError` to user-friendly anyhow error with context
pub fn convert_scaffold_error(err: ScaffoldError, archive: &Path) -> anyhow::Error {
    let message = match &err {
        ScaffoldError::ArchiveOpen { path, .. } => format!(
            "Cannot open template archive '{}'\n\
             HINT: Run from the directory containing the template or pass --template <PATH>.",
            path.display()
        ),
        ScaffoldError::InvalidArchive(_) => format!(
            "Invalid template archive '{}'\n\
             HINT: The archive may be corrupted or truncated.",
            archive.display()
        ),
        ScaffoldError::PathTraversal { path } => format!(
            "Security violation: template '{}' contains entry '{}' outside the project directory\n\
             HINT: This archive may be malicious. Use --skip-unsafe to drop such entries.",
            archive.display(),
            path.display()
        ),
        ScaffoldError::TooManyEntries { count, max } => format!(
            "Template '{}' has {count} entries, limit is {max}\n\
             HINT: Use --max-entries to raise the limit if the template is trusted.",
            archive.display()
        ),
        ScaffoldError::DirectoryCreate { path, .. } => format!(
            "Cannot create directory '{}'\n\
             HINT: Check permissions and that no file occupies that path.",
            path.display()
        ),
        ScaffoldError::Copy { path, .. } => format!(
            "Cannot write '{}'\n\
             HINT: Check permissions and available disk space.",
            path.display()
        ),
        ScaffoldError::Walk { path, .. } => {
            format!("Cannot traverse '{}' while rewriting", path.display())
        }
        ScaffoldError::Rewrite { path, .. } => {
            format!("Cannot rewrite '{}'", path.display())
        }
        ScaffoldError::InvalidProjectName { .. } => "Invalid project name\n\
             HINT: Use a single folder name such as 'widget'."
            .to_string(),
        ScaffoldError::DestinationExists { path } => format!(
            "Project directory '{}' already exists\n\
             HINT: Choose another name or run without --staged to overwrite in place.",
            path.display()
        ),
        ScaffoldError::InvalidConfig { .. } => "Invalid configuration".to_string(),
        ScaffoldError::Io(_) => format!(
            "I/O error while scaffolding from '{}'",
            archive.display()
        ),
    };

    anyhow::Error::new(err).context(message)
}

/// Adds context to a library result about the scaffolding run
pub fn add_scaffold_context<T>(
    result: Result<T, ScaffoldError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_scaffold_error(e, archive))
}

/// Selects the process exit code for an error.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<ScaffoldError>() {
        Some(
            ScaffoldError::InvalidProjectName { .. } | ScaffoldError::InvalidConfig { .. },
        ) => exit::USAGE,
        Some(ScaffoldError::ArchiveOpen { .. } | ScaffoldError::InvalidArchive(_)) => {
            exit::ARCHIVE
        }
        Some(err) if err.is_security_violation() => exit::SECURITY,
        Some(ScaffoldError::DirectoryCreate { .. } | ScaffoldError::Copy { .. }) => {
            exit::EXTRACT_IO
        }
        Some(ScaffoldError::Walk { .. } | ScaffoldError::Rewrite { .. }) => exit::REWRITE,
        _ => exit::FAILURE,
    }
}

/// Returns the machine-readable code of the underlying library error.
pub fn error_code(error: &anyhow::Error) -> &'static str {
    error
        .downcast_ref::<ScaffoldError>()
        .map_or("ERROR", ScaffoldError::code)
}
