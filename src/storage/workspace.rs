//! Workspace management
//!
//! A workspace is a directory holding `.checkmark/config.toml`. It knows
//! which documents take part in a run and where they live.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, DocumentPath, DocumentStore};

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Not in a checkmark workspace. Run 'checkmark init' first or pass document paths.")]
    NotInWorkspace,

    #[error("No documents configured for set '{0}'. Add paths to .checkmark/config.toml.")]
    NoDocuments(String),
}

const DEFAULT_CONFIG: &str = r#"# Checkmark configuration

# Documents that are merged and rewritten in place
documents = []

# Documents that feed the merge but are never written
read_only = []

# Fail the run when a configured document does not exist
strict = false

[report]
# Hide completed tasks in reports
incomplete_only = false

# Named document sets, selected with --set <name>
# [sets.memory-bank]
# documents = ["memory-bank/progress.md", "memory-bank/activeContext.md"]
"#;

/// A Checkmark workspace
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Opens an existing workspace at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(".checkmark").is_dir() {
            return Err(WorkspaceError::NotInWorkspace.into());
        }

        let config = Config::for_workspace(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the enclosing workspace, or treats the current directory as an
    /// unconfigured one
    pub fn current_or_cwd() -> Result<Self> {
        let config = Config::load()?;
        let root = match &config.workspace_root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };

        Ok(Self { root, config })
    }

    /// Initializes a new workspace at the given path
    ///
    /// An existing config is left alone unless `documents` is non-empty, in
    /// which case the default document set is replaced.
    pub fn init(root: impl Into<PathBuf>, documents: &[String]) -> Result<Self> {
        let root = root.into();
        let config_dir = root.join(".checkmark");

        fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create .checkmark directory: {}", config_dir.display())
        })?;

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let mut workspace = Self::open(&root)?;
        if !documents.is_empty() {
            workspace.config.project.documents = documents.to_vec();
            workspace.config.save_project()?;
        }

        Ok(workspace)
    }

    /// Returns the workspace root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .checkmark directory path
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(".checkmark")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns true if a `.checkmark/` directory backs this workspace
    pub fn is_configured(&self) -> bool {
        self.config.is_in_workspace()
    }

    /// Returns the document store
    pub fn store(&self) -> DocumentStore {
        DocumentStore::new(&self.root)
    }

    /// Resolves the documents of a configured set, writable ones first
    pub fn documents(&self, set: Option<&str>) -> Result<Vec<DocumentPath>> {
        let selected = self.config.project.document_set(set)?;
        if selected.is_empty() {
            return Err(WorkspaceError::NoDocuments(set.unwrap_or("default").to_string()).into());
        }

        let store = self.store();
        Ok(selected
            .documents
            .iter()
            .map(|name| store.resolve(name, true))
            .chain(selected.read_only.iter().map(|name| store.resolve(name, false)))
            .collect())
    }
}
