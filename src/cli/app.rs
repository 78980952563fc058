//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{key, sync_cmd};
use crate::storage::{Config, Workspace};

#[derive(Parser)]
#[command(name = "checkmark")]
#[command(author, version, about = "Keep task statuses in sync across markdown checklists")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Document selection shared by `sync` and `report`
#[derive(Args, Debug, Clone, Default)]
pub struct DocumentArgs {
    /// Documents to process (defaults to the configured set)
    pub paths: Vec<PathBuf>,

    /// Use a named document set from .checkmark/config.toml
    #[arg(long, conflicts_with = "paths")]
    pub set: Option<String>,

    /// Only show tasks that are not completed
    #[arg(long)]
    pub incomplete: bool,

    /// Fail if any document is missing
    #[arg(long, env = "CHECKMARK_STRICT")]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a checkmark workspace
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Document to add to the default set (repeatable)
        #[arg(long = "document", short = 'd')]
        documents: Vec<String>,
    },

    /// Merge statuses across documents, rewrite them and print a report
    Sync {
        #[command(flatten)]
        docs: DocumentArgs,

        /// Show the lines that would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the merged status report without writing
    Report {
        #[command(flatten)]
        docs: DocumentArgs,
    },

    /// Show the dedup key and detected status for a task line
    Key {
        /// A bullet line or bare task description
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format.into(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("Checkmark CLI starting");

    match cli.command {
        Commands::Init { path, documents } => {
            output.verbose_ctx("init", &format!("Initializing workspace at: {}", path));
            let workspace = Workspace::init(&path, &documents)?;
            output.verbose_ctx(
                "init",
                &format!("Created config at: {}", workspace.config_dir().join("config.toml").display()),
            );
            output.success(&format!(
                "Initialized checkmark workspace at {}",
                workspace.root().display()
            ));
        }

        Commands::Sync { docs, dry_run } => {
            output.verbose_ctx("sync", &format!("dry_run={}, {:?}", dry_run, docs));
            let mode = if dry_run { sync_cmd::Mode::DryRun } else { sync_cmd::Mode::Write };
            sync_cmd::execute(&output, &docs, mode)?
        }

        Commands::Report { docs } => {
            output.verbose_ctx("report", &format!("{:?}", docs));
            sync_cmd::execute(&output, &docs, sync_cmd::Mode::ReportOnly)?
        }

        Commands::Key { text } => key::show(&output, &text)?,
    }

    Ok(())
}
