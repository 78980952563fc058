//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose | Writes |
//! |---------|---------|--------|
//! | `init` | Create `.checkmark/config.toml` | config only |
//! | `sync` | Merge statuses, rewrite documents, report | documents (unless `--dry-run`) |
//! | `report` | Merge statuses and report | nothing |
//! | `key` | Show the dedup key of a task line | nothing |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `default_format` in the global config.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! checkmark --verbose sync docs/status.md memory-bank/progress.md
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod key;
mod output;
mod sync_cmd;

pub use app::{run, Cli, Commands, DocumentArgs};
pub use output::{Output, OutputFormat};
