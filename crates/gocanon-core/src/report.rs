//! Scaffolding operation reporting.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Report of the extraction pass.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directory entries materialized.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Entries dropped because they would escape the project root.
    pub entries_skipped: usize,

    /// Warnings generated during extraction.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }
}

/// Report of the placeholder rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Files matching the rewrite policy.
    pub files_scanned: usize,

    /// Files whose content changed.
    pub files_rewritten: usize,

    /// Total placeholder occurrences replaced.
    pub replacements: usize,
}

/// Combined report of a full scaffolding run.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldReport {
    /// Final location of the generated project.
    pub project_root: PathBuf,

    /// Extraction statistics.
    pub extraction: ExtractionReport,

    /// Rewrite statistics.
    pub rewrite: RewriteReport,

    /// Wall time of the whole run.
    pub duration: Duration,

    /// Warnings from both passes.
    pub warnings: Vec<String>,
}

impl ScaffoldReport {
    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Callback trait for progress reporting during extraction.
///
/// # Examples
///
/// ```
/// use gocanon_core::ProgressCallback;
/// use std::path::Path;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("Processing {}/{}: {}", current, total, path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, path: &Path) {
///         println!("Completed: {}", path.display());
///     }
///
///     fn on_complete(&mut self) {
///         println!("Done");
///     }
/// }
/// ```
pub trait ProgressCallback {
    /// Called when starting to process an archive entry.
    ///
    /// `current` is 1-indexed.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called after a file's content has been written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been fully processed or skipped.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once after both passes finished successfully.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
