//! Domain models for Checkmark
//!
//! Contains the checklist engine without any I/O concerns: line matching,
//! status detection, normalization, parsing, merging, rewriting and
//! reporting.

mod aggregate;
mod detect;
mod merge;
mod normalize;
mod outline;
mod pattern;
mod report;
mod rewrite;
mod status;

pub use aggregate::{aggregate, Aggregation, DocumentOutcome, SourceDocument};
pub use detect::{detect, from_marker, from_text};
pub use merge::{merge, MergedEntry, MergedStatusMap};
pub use normalize::{normalize, task_key};
pub use outline::{
    document_tasks, parse, split_lines, LineRole, NormalizedTask, Scanner, Section, Subsection,
    Task, LEGEND_TITLE,
};
pub use pattern::{match_line, LineMatch, LineStyle};
pub use report::{report, Metrics, Report, ReportSection, ReportSubsection, ReportTask};
pub use rewrite::{rewrite, LineChange, Rewrite};
pub use status::{Marker, Status};
