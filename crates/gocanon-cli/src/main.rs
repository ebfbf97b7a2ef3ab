//! gocanon CLI - scaffolds a new Go project from the canonical template.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.quiet && !cli.json;

    let result = match &cli.command {
        cli::Commands::New(args) => commands::new::execute(args, &*formatter, show_progress),
        cli::Commands::Completion { shell } => {
            commands::completion::execute(*shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::from(error::exit::SUCCESS),
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::from(error::exit_code(&err))
        }
    }
}
