//! Status report model
//!
//! Resolves every task of a parsed document against the merged map and
//! aggregates the counts. The text form is produced by the `Display` impl;
//! the CLI serializes the same model for `--format json`.

use std::fmt;

use serde::Serialize;

use super::merge::MergedStatusMap;
use super::outline::{Section, Task};
use super::status::Status;

/// Aggregate counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

impl Metrics {
    /// Counts a sequence of statuses
    pub fn from_statuses(statuses: impl IntoIterator<Item = Status>) -> Self {
        let mut metrics = Self::default();
        for status in statuses {
            metrics.record(status);
        }
        metrics
    }

    /// Adds one task
    pub fn record(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Completed => self.completed += 1,
            Status::InProgress => self.in_progress += 1,
            Status::NotStarted => self.not_started += 1,
        }
    }

    /// Count for a single status
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Completed => self.completed,
            Status::InProgress => self.in_progress,
            Status::NotStarted => self.not_started,
        }
    }

    /// Rounded share of `status` in percent, or `None` when there are no tasks
    pub fn percentage(&self, status: Status) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        Some((self.count(status) as f64 * 100.0 / self.total as f64).round() as u32)
    }

}

/// A task as shown in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTask {
    pub description: String,
    pub status: Status,
    pub line_number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSubsection {
    pub title: String,
    pub tasks: Vec<ReportTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub subsections: Vec<ReportSubsection>,
    pub tasks: Vec<ReportTask>,
}

/// Resolved view of one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub sections: Vec<ReportSection>,
    /// Counts over every task, including ones hidden by the incomplete filter
    pub metrics: Metrics,
    pub incomplete_only: bool,
}

impl Report {
    /// Returns true when no task was counted, so there is nothing to report
    pub fn is_empty(&self) -> bool {
        self.metrics.total == 0
    }
}

/// Builds the report for a parsed document
///
/// The "Status Legend" section is skipped. With `incomplete_only`, completed
/// tasks are hidden and subsections left empty are dropped.
pub fn report(sections: &[Section], statuses: &MergedStatusMap, incomplete_only: bool) -> Report {
    let mut metrics = Metrics::default();

    let resolve = |task: &Task| ReportTask {
        description: task.description.clone(),
        status: statuses.status(&task.key).unwrap_or(task.status),
        line_number: task.line_number,
    };
    let visible = |task: &ReportTask| !(incomplete_only && task.status.is_complete());

    let mut out = Vec::new();
    for section in sections.iter().filter(|s| !s.is_legend()) {
        let mut subsections = Vec::new();
        for sub in &section.subsections {
            let resolved: Vec<ReportTask> = sub.tasks.iter().map(resolve).collect();
            for task in &resolved {
                metrics.record(task.status);
            }

            let tasks: Vec<ReportTask> = resolved.into_iter().filter(visible).collect();
            if incomplete_only && tasks.is_empty() {
                continue;
            }
            subsections.push(ReportSubsection {
                title: sub.title.clone(),
                tasks,
            });
        }

        let resolved: Vec<ReportTask> = section.direct_tasks.iter().map(resolve).collect();
        for task in &resolved {
            metrics.record(task.status);
        }

        out.push(ReportSection {
            title: section.title.clone(),
            subsections,
            tasks: resolved.into_iter().filter(visible).collect(),
        });
    }

    Report {
        sections: out,
        metrics,
        incomplete_only,
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total: {} tasks", self.total)?;
        for status in Status::ALL.iter().rev() {
            let label = format!("{}:", status.label());
            writeln!(
                f,
                "  {} {:<12} {} ({}%)",
                status.marker(),
                label,
                self.count(*status),
                self.percentage(*status).unwrap_or(0)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No sections found");
        }

        for section in &self.sections {
            writeln!(f, "{}", section.title)?;
            for sub in &section.subsections {
                writeln!(f, "  {}", sub.title)?;
                for task in &sub.tasks {
                    writeln!(f, "    {} {}", task.status.marker(), task.description)?;
                }
            }
            for task in &section.tasks {
                writeln!(f, "  {} {}", task.status.marker(), task.description)?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.metrics)
    }
}
