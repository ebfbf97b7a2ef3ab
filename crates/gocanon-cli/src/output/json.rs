//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use crate::error::error_code;
use anyhow::Result;
use gocanon_core::ScaffoldReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

#[derive(Serialize)]
struct ScaffoldOutput {
    project_root: String,
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    entries_skipped: usize,
    files_scanned: usize,
    files_rewritten: usize,
    replacements: usize,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl From<&ScaffoldReport> for ScaffoldOutput {
    fn from(report: &ScaffoldReport) -> Self {
        Self {
            project_root: report.project_root.display().to_string(),
            files_extracted: report.extraction.files_extracted,
            directories_created: report.extraction.directories_created,
            bytes_written: report.extraction.bytes_written,
            entries_skipped: report.extraction.entries_skipped,
            files_scanned: report.rewrite.files_scanned,
            files_rewritten: report.rewrite.files_rewritten,
            replacements: report.rewrite.replacements,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_scaffold_result(&self, report: &ScaffoldReport) -> Result<()> {
        let output = JsonOutput::success("new", ScaffoldOutput::from(report));
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("new", error_code(error), format!("{error:#}"));
        let _ = Self::output(&output);
    }

    // Warnings are part of the result document.
    fn format_warning(&self, _message: &str) {}
}
