//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use gocanon_core::RewritePolicy;
use gocanon_core::ScaffoldConfig;
use gocanon_core::UnsafeEntryPolicy;
use gocanon_core::config::DEFAULT_ARCHIVE_NAME;
use gocanon_core::config::DEFAULT_PLACEHOLDER;
use gocanon_core::config::DEFAULT_TEMPLATE_ROOT;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gocanon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new Go project from the canonical template
    New(NewArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct NewArgs {
    /// Project name (prompted for when omitted)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Template archive
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_ARCHIVE_NAME)]
    pub template: PathBuf,

    /// Directory that receives the project folder (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Top-level folder of the template archive
    #[arg(long, value_name = "NAME", default_value = DEFAULT_TEMPLATE_ROOT)]
    pub template_root: String,

    /// Token replaced by the project name
    #[arg(long, value_name = "TOKEN", default_value = DEFAULT_PLACEHOLDER)]
    pub placeholder: String,

    /// Generate into a staging directory and move into place on success
    #[arg(long)]
    pub staged: bool,

    /// Skip archive entries that would escape the project directory
    #[arg(long)]
    pub skip_unsafe: bool,

    /// Ignore file modes recorded in the archive
    #[arg(long)]
    pub no_preserve_permissions: bool,

    /// Also rewrite files ending in SUFFIX (repeatable)
    #[arg(long = "rewrite-suffix", value_name = "SUFFIX")]
    pub rewrite_suffixes: Vec<String>,

    /// Also rewrite files named exactly NAME (repeatable)
    #[arg(long = "rewrite-file", value_name = "NAME")]
    pub rewrite_files: Vec<String>,

    /// Maximum number of archive entries
    #[arg(long, default_value = "10000", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_entries: u32,
}

impl NewArgs {
    /// Builds the library configuration from the flags.
    pub fn to_config(&self) -> ScaffoldConfig {
        let unsafe_entries = if self.skip_unsafe {
            UnsafeEntryPolicy::Skip
        } else {
            UnsafeEntryPolicy::Abort
        };

        let policy = self
            .rewrite_suffixes
            .iter()
            .fold(RewritePolicy::default(), |p, suffix| p.with_suffix(suffix.clone()));
        let policy = self
            .rewrite_files
            .iter()
            .fold(policy, |p, name| p.with_manifest_name(name.clone()));

        ScaffoldConfig::default()
            .with_rewrite_policy(policy)
            .with_template_root(self.template_root.clone())
            .with_placeholder(self.placeholder.clone())
            .with_unsafe_entries(unsafe_entries)
            .with_preserve_permissions(!self.no_preserve_permissions)
            .with_staged(self.staged)
            .with_max_entries(self.max_entries as usize)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_new_defaults() {
        let cli = Cli::try_parse_from(["gocanon", "new", "widget"]).unwrap();
        let Commands::New(args) = cli.command else {
            panic!("expected new command");
        };

        assert_eq!(args.name.as_deref(), Some("widget"));
        assert_eq!(args.template, PathBuf::from("go-canonical.zip"));
        assert!(args.output_dir.is_none());

        let config = args.to_config();
        assert_eq!(config.template_root, "go-canonical");
        assert_eq!(config.placeholder, "go-canonical");
        assert_eq!(config.unsafe_entries, UnsafeEntryPolicy::Abort);
        assert!(config.preserve_permissions);
        assert!(!config.staged);
        assert_eq!(config.max_entries, 10_000);
        assert_eq!(config.rewrite_policy, RewritePolicy::default());
    }

    #[test]
    fn test_extra_rewrite_targets() {
        let cli = Cli::try_parse_from([
            "gocanon",
            "new",
            "widget",
            "--rewrite-suffix",
            ".md",
            "--rewrite-file",
            "Makefile",
            "--rewrite-file",
            "Dockerfile",
        ])
        .unwrap();
        let Commands::New(args) = cli.command else {
            panic!("expected new command");
        };

        let policy = args.to_config().rewrite_policy;
        for name in ["main.go", "go.mod", "README.md", "Makefile", "Dockerfile"] {
            assert!(policy.is_target(OsStr::new(name)), "{name} should be a target");
        }
        assert!(!policy.is_target(OsStr::new("go.sum")));
    }

    #[test]
    fn test_new_flags() {
        let cli = Cli::try_parse_from([
            "gocanon",
            "--json",
            "new",
            "--template",
            "skel.zip",
            "--staged",
            "--skip-unsafe",
            "--no-preserve-permissions",
            "--max-entries",
            "5",
        ])
        .unwrap();
        assert!(cli.json);

        let Commands::New(args) = cli.command else {
            panic!("expected new command");
        };
        assert!(args.name.is_none());

        let config = args.to_config();
        assert_eq!(config.unsafe_entries, UnsafeEntryPolicy::Skip);
        assert!(!config.preserve_permissions);
        assert!(config.staged);
        assert_eq!(config.max_entries, 5);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["gocanon", "-v", "-q", "new", "widget"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_max_entries_rejected() {
        let result = Cli::try_parse_from(["gocanon", "new", "widget", "--max-entries", "0"]);
        assert!(result.is_err());
    }
}
