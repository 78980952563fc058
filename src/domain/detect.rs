//! Status detection
//!
//! An explicit marker always decides the status. Keyword heuristics on the
//! text only apply to lines that carry no marker at all.

use super::status::{Marker, Status};

/// Phrases that suggest work has started
const IN_PROGRESS_PHRASES: &[&str] = &[
    "in progress",
    "working on",
    "started",
    "implementing",
    "updating",
    "enhancing",
    "fixing",
    "needs",
    "requires",
];

/// Leading words that suggest work has started
const IN_PROGRESS_LEADS: &[&str] = &["implementing", "updating", "enhancing", "fixing"];

/// Maps an explicit marker to a status
pub fn from_marker(marker: Marker) -> Status {
    match marker {
        Marker::Check | Marker::Tick | Marker::Checked => Status::Completed,
        Marker::Warning | Marker::WarningBare => Status::InProgress,
        Marker::Cross | Marker::X | Marker::Blank | Marker::None => Status::NotStarted,
    }
}

/// Infers a status from free text
///
/// Completion language beats warning symbols, which beat a not-started
/// symbol, which beats in-progress keywords.
pub fn from_text(text: &str) -> Status {
    let lower = text.to_lowercase();

    if text.contains('✅') || text.contains('✓') || lower.contains("complete") {
        return Status::Completed;
    }

    if text.contains('⚠') {
        return Status::InProgress;
    }

    if text.contains('❌') || lower.split_whitespace().any(|word| word == "x") {
        return Status::NotStarted;
    }

    let trimmed = lower.trim_start();
    if IN_PROGRESS_PHRASES.iter().any(|phrase| lower.contains(phrase))
        || IN_PROGRESS_LEADS.iter().any(|lead| trimmed.starts_with(lead))
    {
        return Status::InProgress;
    }

    Status::NotStarted
}

/// Resolves the status of a matched line
pub fn detect(marker: Marker, description: &str) -> Status {
    if marker.is_explicit() {
        from_marker(marker)
    } else {
        from_text(description)
    }
}
