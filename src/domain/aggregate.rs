//! One aggregation run over already-loaded documents
//!
//! Parses every source, merges all tasks into one [`MergedStatusMap`], then
//! rewrites and reports each document against that map. Nothing here touches
//! the filesystem: missing documents arrive as `content: None` and simply
//! contribute nothing.

use super::merge::{merge, MergedStatusMap};
use super::outline::{document_tasks, parse};
use super::report::{report, Metrics, Report};
use super::rewrite::{rewrite, Rewrite};

/// A document handed to the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Display name (usually the configured path)
    pub name: String,
    /// `None` when the file does not exist
    pub content: Option<String>,
    /// Read-only sources feed the merge but are never rewritten
    pub writable: bool,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, content: Option<String>) -> Self {
        Self {
            name: name.into(),
            content,
            writable: true,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }
}

/// Per-document result of a run
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub name: String,
    pub missing: bool,
    pub writable: bool,
    /// Rewritten content for writable, present documents
    pub rewrite: Option<Rewrite>,
    pub report: Report,
}

impl DocumentOutcome {
    /// Returns the new content if the document needs writing back
    pub fn pending_write(&self) -> Option<&Rewrite> {
        self.rewrite.as_ref().filter(|r| r.is_changed())
    }
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub statuses: MergedStatusMap,
    pub documents: Vec<DocumentOutcome>,
}

impl Aggregation {
    /// Counts over distinct tasks across all documents
    pub fn overall(&self) -> Metrics {
        Metrics::from_statuses(self.statuses.iter().map(|(_, entry)| entry.status))
    }

    /// Names of documents that could not be found
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.documents
            .iter()
            .filter(|d| d.missing)
            .map(|d| d.name.as_str())
    }
}

/// Runs parse, merge, rewrite and report over `sources`, in order
pub fn aggregate(sources: &[SourceDocument], incomplete_only: bool) -> Aggregation {
    let parsed: Vec<_> = sources
        .iter()
        .map(|s| s.content.as_deref().map(parse).unwrap_or_default())
        .collect();

    let tasks: Vec<_> = parsed.iter().map(|sections| document_tasks(sections)).collect();
    let statuses = merge(&tasks);

    let documents = sources
        .iter()
        .zip(parsed)
        .map(|(source, sections)| match &source.content {
            Some(content) if source.writable => {
                let rewritten = rewrite(content, &statuses);
                let report = report(&parse(&rewritten.content), &statuses, incomplete_only);
                DocumentOutcome {
                    name: source.name.clone(),
                    missing: false,
                    writable: true,
                    rewrite: Some(rewritten),
                    report,
                }
            }
            content => DocumentOutcome {
                name: source.name.clone(),
                missing: content.is_none(),
                writable: source.writable,
                rewrite: None,
                report: report(&sections, &statuses, incomplete_only),
            },
        })
        .collect();

    Aggregation {
        statuses,
        documents,
    }
}
