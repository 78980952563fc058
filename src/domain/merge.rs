//! Cross-document status merge
//!
//! Folds the tasks of several documents into one map keyed by normalized
//! text. When two documents disagree about a task, the higher-priority status
//! wins (`Completed > InProgress > NotStarted`), so a stale mention can never
//! move a task backwards.

use indexmap::IndexMap;
use serde::Serialize;

use super::outline::NormalizedTask;
use super::status::Status;

/// Merged view of one logical task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedEntry {
    pub status: Status,

    /// Display text from the first mention
    pub text: String,

    /// How many lines across all sources mapped to this key
    pub occurrences: usize,

    /// Whether a later mention raised the status
    pub upgraded: bool,
}

/// Status per normalized key, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MergedStatusMap {
    entries: IndexMap<String, MergedEntry>,
}

impl MergedStatusMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a single observation into the map
    ///
    /// Returns true if the observation inserted or raised the entry.
    pub fn observe(&mut self, task: &NormalizedTask) -> bool {
        match self.entries.get_mut(&task.key) {
            Some(entry) => {
                entry.occurrences += 1;
                if task.status.outranks(entry.status) {
                    entry.status = task.status;
                    entry.upgraded = true;
                    true
                } else {
                    false
                }
            }
            None => {
                self.entries.insert(
                    task.key.clone(),
                    MergedEntry {
                        status: task.status,
                        text: task.text.clone(),
                        occurrences: 1,
                        upgraded: false,
                    },
                );
                true
            }
        }
    }

    /// Resolved status for a key
    pub fn status(&self, key: &str) -> Option<Status> {
        self.entries.get(key).map(|e| e.status)
    }

    /// Full entry for a key
    pub fn get(&self, key: &str) -> Option<&MergedEntry> {
        self.entries.get(key)
    }

    /// Iterates entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MergedEntry)> {
        self.entries.iter()
    }

    /// Number of distinct tasks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no task was observed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tasks whose status was raised by a later mention
    pub fn reconciled(&self) -> usize {
        self.entries.values().filter(|e| e.upgraded).count()
    }
}

/// Merges the tasks of every source, left to right
pub fn merge(sources: &[Vec<NormalizedTask>]) -> MergedStatusMap {
    let mut map = MergedStatusMap::new();
    for task in sources.iter().flatten() {
        map.observe(task);
    }
    map
}
