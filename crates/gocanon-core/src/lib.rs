//! Template extraction and placeholder rewriting for Go project scaffolding.
//!
//! `gocanon-core` takes a zip archive whose top-level folder is a canonical
//! project template (`go-canonical/` by default), extracts it under a new
//! project name, and replaces every literal occurrence of the placeholder
//! token inside recognized text files with that name.
//!
//! The two passes are independent:
//!
//! - [`extract_template`] strips the template root from every stored path,
//!   re-roots it under `output_base/project_name` and refuses to write
//!   anything outside that directory.
//! - [`rewrite_all`] walks a tree and substitutes the placeholder in files
//!   selected by a [`RewritePolicy`], preserving their permissions.
//!
//! [`scaffold`] runs both in order.
//!
//! # Examples
//!
//! ```no_run
//! use gocanon_core::ScaffoldConfig;
//! use gocanon_core::scaffold;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScaffoldConfig::default();
//! let report = scaffold("go-canonical.zip", ".", "widget", &config)?;
//! println!("Created {}", report.project_root.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod report;
pub mod rewrite;
#[doc(hidden)]
pub mod test_utils;
pub mod types;

pub use api::extract_template;
pub use api::rewrite_all;
pub use api::scaffold;
pub use api::scaffold_with_progress;
pub use config::ScaffoldConfig;
pub use config::UnsafeEntryPolicy;
pub use error::Result;
pub use error::ScaffoldError;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::RewriteReport;
pub use report::ScaffoldReport;
pub use rewrite::RewritePolicy;

pub use types::DestDir;
pub use types::EntryType;
pub use types::ProjectName;
pub use types::SafePath;
