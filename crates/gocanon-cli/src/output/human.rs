//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use gocanon_core::ScaffoldReport;

/// Final line of every successful run.
pub const SUCCESS_MESSAGE: &str = "Project initialized successfully.";

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_scaffold_result(&self, report: &ScaffoldReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let extraction = &report.extraction;
        let rewrite = &report.rewrite;

        let _ = self.term.write_line(&format!(
            "  Project:          {}",
            report.project_root.display()
        ));
        let _ = self.term.write_line(&format!(
            "  Files extracted:  {}",
            Self::format_number(extraction.files_extracted)
        ));
        let _ = self.term.write_line(&format!(
            "  Directories:      {}",
            Self::format_number(extraction.directories_created)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(extraction.bytes_written)
        ));
        let _ = self.term.write_line(&format!(
            "  Files rewritten:  {} of {}",
            Self::format_number(rewrite.files_rewritten),
            Self::format_number(rewrite.files_scanned)
        ));

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Replacements:     {}",
                Self::format_number(rewrite.replacements)
            ));
            let _ = self.term.write_line(&format!(
                "  Entries skipped:  {}",
                Self::format_number(extraction.entries_skipped)
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} {SUCCESS_MESSAGE}",
                style("✓").green().bold()
            ));
        } else {
            let _ = self.term.write_line(SUCCESS_MESSAGE);
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("Error:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("Error: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}
