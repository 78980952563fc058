//! Status vocabulary
//!
//! Every task carries exactly one [`Status`]. Statuses are totally ordered by
//! priority (`Completed > InProgress > NotStarted`), which is what the merger
//! uses to resolve conflicts between documents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Completion status of a task
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl Status {
    /// All statuses, lowest priority first
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    /// Merge priority (higher wins)
    pub fn priority(&self) -> u8 {
        match self {
            Status::NotStarted => 1,
            Status::InProgress => 2,
            Status::Completed => 3,
        }
    }

    /// Canonical emoji marker written back into documents
    pub fn marker(&self) -> &'static str {
        match self {
            Status::NotStarted => "❌",
            Status::InProgress => "⚠️",
            Status::Completed => "✅",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// Returns true if this status represents completion
    pub fn is_complete(&self) -> bool {
        matches!(self, Status::Completed)
    }

    /// Returns true if `self` should replace `current` during a merge
    pub fn outranks(&self, current: Status) -> bool {
        self.priority() > current.priority()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The marker token found on a task line
///
/// Tokens outside this set never reach the matcher: the line simply isn't a
/// status-bearing bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `✅`
    Check,
    /// `✓`
    Tick,
    /// `⚠️`
    Warning,
    /// `⚠` (no variation selector)
    WarningBare,
    /// `❌`
    Cross,
    /// A free-standing `x`
    X,
    /// `x` or `X` inside a checkbox
    Checked,
    /// An empty checkbox
    Blank,
    /// No marker on the line
    None,
}

impl Marker {
    /// Parses a marker token as captured from a line
    pub fn from_token(token: &str) -> Self {
        match token {
            "✅" => Marker::Check,
            "✓" => Marker::Tick,
            "⚠️" => Marker::Warning,
            "⚠" => Marker::WarningBare,
            "❌" => Marker::Cross,
            "x" | "X" => Marker::X,
            " " => Marker::Blank,
            _ => Marker::None,
        }
    }

    /// Parses the token between checkbox brackets
    pub fn checkbox(token: &str) -> Self {
        match token {
            "x" | "X" => Marker::Checked,
            other => Marker::from_token(other),
        }
    }

    /// Returns true when the line carried an explicit status token
    pub fn is_explicit(&self) -> bool {
        !matches!(self, Marker::None)
    }
}

/// Returns true if `text` is nothing but a status symbol
pub fn is_bare_symbol(text: &str) -> bool {
    matches!(text.trim(), "✅" | "✓" | "⚠️" | "⚠" | "❌" | "x" | "X")
}
