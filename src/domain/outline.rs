//! Document outline parsing
//!
//! Walks a markdown document line by line and builds the `##` section /
//! `###` subsection tree with the task lines found under each heading.
//!
//! The line classification lives in [`Scanner`] so that the rewriter walks a
//! document with exactly the same notion of "inside a section", "inside the
//! status legend" and "inside a code fence" as the parser.

use serde::Serialize;

use super::detect;
use super::normalize::task_key;
use super::pattern::{match_line, LineStyle};
use super::status::{Marker, Status};

/// A task line found while parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// 1-based line number in the source document
    pub line_number: usize,
    /// The full source line
    #[serde(skip)]
    pub raw: String,
    pub description: String,
    #[serde(skip)]
    pub marker: Marker,
    pub style: LineStyle,
    /// Dedup key
    pub key: String,
    /// Status as written on this line
    pub status: Status,
}

/// A task reduced to its identity and status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTask {
    pub key: String,
    pub status: Status,
    /// Display text as written where the task was seen
    pub text: String,
}

impl Task {
    /// Builds a task from a source line, if the line is one
    pub fn from_line(line_number: usize, line: &str) -> Option<Self> {
        let m = match_line(line)?;
        let key = task_key(m.description)?;

        Some(Self {
            line_number,
            raw: line.to_string(),
            description: m.description.to_string(),
            marker: m.marker,
            style: m.style,
            key,
            status: detect::detect(m.marker, m.description),
        })
    }

    pub fn normalized(&self) -> NormalizedTask {
        NormalizedTask {
            key: self.key.clone(),
            status: self.status,
            text: self.description.clone(),
        }
    }
}

/// A `###` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subsection {
    pub title: String,
    pub tasks: Vec<Task>,
}

/// A `##` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub subsections: Vec<Subsection>,
    /// Tasks that appear before the first subsection
    pub direct_tasks: Vec<Task>,
}

impl Section {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            subsections: Vec::new(),
            direct_tasks: Vec::new(),
        }
    }

    /// All tasks in source order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.direct_tasks
            .iter()
            .chain(self.subsections.iter().flat_map(|s| s.tasks.iter()))
    }

    /// Returns true for the marker key block
    pub fn is_legend(&self) -> bool {
        self.title == LEGEND_TITLE
    }
}

/// Title of the section that documents marker meanings
pub const LEGEND_TITLE: &str = "Status Legend";

/// What a single line means to the walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole<'a> {
    /// A `##` heading
    Section(&'a str),
    /// A `###` heading inside a section
    Subsection(&'a str),
    /// A line that may hold a task
    Candidate,
    /// Anything that must be left alone
    Verbatim,
}

/// Line classifier shared by the parser and the rewriter
#[derive(Debug, Default)]
pub struct Scanner {
    in_section: bool,
    in_legend: bool,
    in_fence: bool,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies the next line and advances the state machine
    pub fn classify<'a>(&mut self, line: &'a str) -> LineRole<'a> {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            self.in_fence = !self.in_fence;
            return LineRole::Verbatim;
        }
        if self.in_fence || trimmed.is_empty() {
            return LineRole::Verbatim;
        }

        if let Some((level, title)) = heading(trimmed) {
            self.in_legend = mentions_legend(title);
            return match level {
                1 => {
                    self.in_section = false;
                    LineRole::Verbatim
                }
                2 => {
                    self.in_section = true;
                    LineRole::Section(title)
                }
                3 if self.in_section => LineRole::Subsection(title),
                _ => LineRole::Verbatim,
            };
        }

        if mentions_legend(trimmed) {
            self.in_legend = true;
            return LineRole::Verbatim;
        }

        if self.in_section && !self.in_legend {
            LineRole::Candidate
        } else {
            LineRole::Verbatim
        }
    }
}

/// Parses a document into its sections
///
/// Lines before the first `##` heading are dropped; a document without any
/// `##` heading yields no sections.
pub fn parse(document: &str) -> Vec<Section> {
    let mut scanner = Scanner::new();
    let mut sections: Vec<Section> = Vec::new();
    let mut in_subsection = false;

    for (index, (line, _)) in split_lines(document).enumerate() {
        match scanner.classify(line) {
            LineRole::Section(title) => {
                sections.push(Section::new(title));
                in_subsection = false;
            }
            LineRole::Subsection(title) => {
                if let Some(section) = sections.last_mut() {
                    section.subsections.push(Subsection {
                        title: title.to_string(),
                        tasks: Vec::new(),
                    });
                    in_subsection = true;
                }
            }
            LineRole::Candidate => {
                let Some(task) = Task::from_line(index + 1, line) else {
                    continue;
                };
                let Some(section) = sections.last_mut() else {
                    continue;
                };
                match section.subsections.last_mut() {
                    Some(sub) if in_subsection => sub.tasks.push(task),
                    _ => section.direct_tasks.push(task),
                }
            }
            LineRole::Verbatim => {}
        }
    }

    sections
}

/// Flattens the tasks of a parsed document in source order
pub fn document_tasks(sections: &[Section]) -> Vec<NormalizedTask> {
    sections
        .iter()
        .flat_map(|s| s.tasks())
        .map(Task::normalized)
        .collect()
}

/// Splits text into `(line, terminator)` pairs
///
/// The terminator is `"\n"`, `"\r\n"` or `""` for a final unterminated line,
/// so concatenating every pair reproduces the input exactly.
pub fn split_lines(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.split_inclusive('\n').map(|chunk| {
        if let Some(line) = chunk.strip_suffix("\r\n") {
            (line, "\r\n")
        } else if let Some(line) = chunk.strip_suffix('\n') {
            (line, "\n")
        } else {
            (chunk, "")
        }
    })
}

fn heading(trimmed: &str) -> Option<(usize, &str)> {
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((level, rest.trim()))
}

fn mentions_legend(text: &str) -> bool {
    text.to_lowercase().contains("status legend")
}
