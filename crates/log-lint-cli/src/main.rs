//! log-lint CLI tool.
//!
//! Usage:
//! ```bash
//! log-lint check [OPTIONS] [PATH]
//! log-lint facts [PATH]
//! log-lint list-rules
//! log-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Logging-convention linter for Java codebases
#[derive(Parser)]
#[command(name = "log-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns over qualified names (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Read facts from a JSON snapshot instead of parsing sources
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Source root, relative to the project directory
        #[arg(long)]
        source_root: Option<PathBuf>,
    },

    /// Print the facts extracted from sources as a JSON snapshot
    Facts {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Source root, relative to the project directory
        #[arg(long)]
        source_root: Option<PathBuf>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Per-rule report text.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Diagnostics with highlighted source snippets.
    Fancy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
            snapshot,
            source_root,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::check::run(&commands::check::CheckArgs {
                path: &path,
                format,
                rules,
                exclude,
                snapshot: snapshot.as_deref(),
                source_root: source_root.as_deref(),
                source: &source,
            })
        }
        Commands::Facts { path, source_root } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::facts::run(&path, source_root.as_deref(), &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
