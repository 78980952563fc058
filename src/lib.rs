//! Checkmark CLI - keeps task statuses consistent across markdown checklists
//!
//! The same task often appears in several status documents, each written a
//! little differently and each drifting out of date. Checkmark normalizes
//! task text into a dedup key, merges every mention into the highest status
//! seen, rewrites each document in place and reports progress.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{aggregate, normalize, task_key, MergedStatusMap, Report, SourceDocument, Status};
