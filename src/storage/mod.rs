//! # Storage Layer
//!
//! File access and configuration for Checkmark.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Status documents | Markdown | anywhere under the workspace root |
//! | Config | TOML | `.checkmark/config.toml` |
//! | Global config | TOML | platform config dir (`checkmark/config.toml`) |
//!
//! ## Write Safety
//!
//! - [`DocumentStore`] writes through a temp file under an exclusive `fs2`
//!   lock, then renames it over the original
//! - Every document is read completely before any document is written
//!
//! ## Key Types
//!
//! - [`Workspace`] - Entry point: config plus resolved document paths
//! - [`DocumentStore`] - Read/write markdown documents
//! - [`Config`] - Workspace and global configuration

mod config;
mod documents;
mod workspace;

pub use config::{Config, ConfigError, DocumentSet, GlobalConfig, OutputFormat, ProjectConfig};
pub use documents::{DocumentError, DocumentPath, DocumentStore};
pub use workspace::{Workspace, WorkspaceError};
