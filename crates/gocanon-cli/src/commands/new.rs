//! New project command implementation.

use crate::cli::NewArgs;
use crate::error::add_scaffold_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use console::Term;
use gocanon_core::NoopProgress;
use gocanon_core::scaffold_with_progress;
use std::env;
use std::io;
use std::io::BufRead;

/// Prompt shown when no project name is given on the command line.
const NAME_PROMPT: &str = "Enter the name of the new Go project: ";

pub fn execute(args: &NewArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => prompt_project_name(&mut io::stdin().lock())?,
    };

    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let config = args.to_config();

    // Use progress bar if TTY is detected (not quiet, not JSON, is terminal)
    let report = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Scaffolding");
        add_scaffold_context(
            scaffold_with_progress(&args.template, &output_dir, &name, &config, &mut progress),
            &args.template,
        )?
    } else {
        let mut noop = NoopProgress;
        add_scaffold_context(
            scaffold_with_progress(&args.template, &output_dir, &name, &config, &mut noop),
            &args.template,
        )?
    };

    for warning in &report.warnings {
        formatter.format_warning(warning);
    }
    formatter.format_scaffold_result(&report)?;

    Ok(())
}

/// Asks for the project name on stderr and reads one line from `input`.
///
/// The line is returned untrimmed; trimming happens when the name is
/// parsed.
fn prompt_project_name(input: &mut dyn BufRead) -> Result<String> {
    let term = Term::stderr();
    term.write_str(NAME_PROMPT).context("failed to write prompt")?;
    term.flush().context("failed to write prompt")?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read project name")?;
    Ok(line)
}
