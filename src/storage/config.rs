//! Configuration handling for Checkmark
//!
//! Configuration is stored in `.checkmark/config.toml` (workspace) and
//! `~/.config/checkmark/config.toml` (global).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Unknown document set '{0}'")]
    UnknownSet(String),
}

/// Documents that take part in one run
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DocumentSet {
    /// Merged and rewritten in place
    pub documents: Vec<String>,

    /// Merged but never written
    pub read_only: Vec<String>,
}

impl DocumentSet {
    /// Returns true if the set names no documents at all
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.read_only.is_empty()
    }

    fn validate(&self, name: &str) -> std::result::Result<(), ConfigError> {
        if let Some(path) = self
            .documents
            .iter()
            .chain(&self.read_only)
            .find(|p| p.trim().is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "empty document path {:?} in set '{}'",
                path, name
            )));
        }

        if let Some(path) = self.documents.iter().find(|p| self.read_only.contains(p)) {
            return Err(ConfigError::Invalid(format!(
                "'{}' is listed as both writable and read-only in set '{}'",
                path, name
            )));
        }

        Ok(())
    }
}

/// Report settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Hide completed tasks by default
    pub incomplete_only: bool,
}

/// Workspace-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Default document set: merged and rewritten
    pub documents: Vec<String>,

    /// Default document set: merged only
    pub read_only: Vec<String>,

    /// Fail the run when a configured document is missing
    pub strict: bool,

    /// Report settings
    pub report: ReportConfig,

    /// Named alternative document sets
    pub sets: BTreeMap<String, DocumentSet>,
}

impl ProjectConfig {
    /// Returns the default document set
    pub fn default_set(&self) -> DocumentSet {
        DocumentSet {
            documents: self.documents.clone(),
            read_only: self.read_only.clone(),
        }
    }

    /// Looks up a document set by name, or the default set
    pub fn document_set(&self, name: Option<&str>) -> std::result::Result<DocumentSet, ConfigError> {
        match name {
            None => Ok(self.default_set()),
            Some(name) => self
                .sets
                .get(name)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownSet(name.to_string())),
        }
    }

    /// Checks document paths in every set
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.default_set().validate("default")?;
        for (name, set) in &self.sets {
            set.validate(name)?;
        }
        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + workspace)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub workspace_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let (project, workspace_root) = match Self::find_workspace_root() {
            Some(root) => (Self::load_project_config(&root)?, Some(root)),
            None => (ProjectConfig::default(), None),
        };

        Ok(Self {
            project,
            global,
            workspace_root,
        })
    }

    /// Loads configuration for a specific workspace
    pub fn for_workspace(workspace_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(workspace_root)?;

        Ok(Self {
            project,
            global,
            workspace_root: Some(workspace_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "checkmark", "checkmark").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads workspace configuration from a specific root
    fn load_project_config(workspace_root: &Path) -> Result<ProjectConfig> {
        let config_path = workspace_root.join(".checkmark").join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read workspace config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse workspace config")?;

        config
            .validate()
            .with_context(|| format!("Invalid workspace config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Finds the workspace root by looking for a `.checkmark/` directory
    pub fn find_workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_workspace_root_from(&current)
    }

    /// Walks up from `start` looking for a `.checkmark/` directory
    pub fn find_workspace_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(".checkmark").is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns true if we're in a checkmark workspace
    pub fn is_in_workspace(&self) -> bool {
        self.workspace_root.is_some()
    }

    /// Saves the workspace configuration
    pub fn save_project(&self) -> Result<()> {
        let root = self
            .workspace_root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Not in a checkmark workspace. Run 'checkmark init' first."))?;
        let config_path = root.join(".checkmark").join("config.toml");

        let content =
            toml::to_string_pretty(&self.project).context("Failed to serialize workspace config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write workspace config: {}", config_path.display()))
    }
}
