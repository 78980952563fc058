//! In-place document rewriting
//!
//! Replays a [`MergedStatusMap`] into a document. Only the status token of a
//! task line may change; every other byte (headings, prose, the status
//! legend, code blocks, line endings) is copied through untouched.
//!
//! A task line keeps its authoring style:
//!
//! - `- ⚠️ Search` becomes `- ✅ Search`
//! - `- Search: ⚠️` becomes `- Search: ✅`
//! - `- [ ] Search` becomes `- [x] Search` (checkboxes have no in-progress state)
//! - `- Search` becomes `- ✅ Search` (plain bullets gain a prefix marker)

use serde::Serialize;

use super::detect;
use super::merge::MergedStatusMap;
use super::normalize::task_key;
use super::outline::{split_lines, LineRole, Scanner};
use super::pattern::{match_line, LineStyle};
use super::status::Status;

/// One line that differs between input and output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineChange {
    /// 1-based line number
    pub line_number: usize,
    pub before: String,
    pub after: String,
}

/// Result of rewriting a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub changes: Vec<LineChange>,
}

impl Rewrite {
    /// Returns true if any line changed
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Rewrites every task line of `original` with its merged status
pub fn rewrite(original: &str, statuses: &MergedStatusMap) -> Rewrite {
    let mut scanner = Scanner::new();
    let mut content = String::with_capacity(original.len());
    let mut changes = Vec::new();

    for (index, (line, ending)) in split_lines(original).enumerate() {
        let replacement = match scanner.classify(line) {
            LineRole::Candidate => rewrite_line(line, statuses),
            _ => None,
        };

        match replacement {
            Some(after) => {
                content.push_str(&after);
                changes.push(LineChange {
                    line_number: index + 1,
                    before: line.to_string(),
                    after,
                });
            }
            None => content.push_str(line),
        }
        content.push_str(ending);
    }

    Rewrite { content, changes }
}

/// Rewrites a single candidate line, returning `None` if it stays as is
fn rewrite_line(line: &str, statuses: &MergedStatusMap) -> Option<String> {
    let m = match_line(line)?;
    let key = task_key(m.description)?;

    let own = detect::detect(m.marker, m.description);
    let resolved = statuses.status(&key).unwrap_or(own);
    if resolved == own {
        return None;
    }

    let (range, token) = match (m.style, m.marker_span) {
        (LineStyle::Checkbox, Some(span)) => (span, checkbox_token(resolved).to_string()),
        (LineStyle::PlainBullet, _) | (_, None) => (
            m.description_start..m.description_start,
            format!("{} ", resolved.marker()),
        ),
        (_, Some(span)) => (span, resolved.marker().to_string()),
    };

    let mut after = String::with_capacity(line.len() + token.len());
    after.push_str(&line[..range.start]);
    after.push_str(&token);
    after.push_str(&line[range.end..]);

    (after != line).then_some(after)
}

fn checkbox_token(status: Status) -> &'static str {
    if status.is_complete() {
        "x"
    } else {
        " "
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::merge::merge;
    use crate::domain::outline::{document_tasks, parse, NormalizedTask};
    use crate::domain::normalize::normalize;
    use proptest::prelude::*;

    fn statuses(entries: &[(&str, Status)]) -> MergedStatusMap {
        let tasks = entries
            .iter()
            .map(|(text, status)| NormalizedTask {
                key: normalize(text),
                status: *status,
                text: text.to_string(),
            })
            .collect();
        merge(&[tasks])
    }

    #[test]
    fn suffix_style_is_kept() {
        let map = statuses(&[("Feature X", Status::Completed)]);
        let out = rewrite("## Work\n- Feature X: ⚠️\n", &map);
        assert_eq!(out.content, "## Work\n- Feature X: ✅\n");
    }

    #[test]
    fn prefix_style_is_kept() {
        let map = statuses(&[("Feature X", Status::InProgress)]);
        let out = rewrite("## Work\n- ❌ Feature X\n", &map);
        assert_eq!(out.content, "## Work\n- ⚠️ Feature X\n");
        assert_eq!(out.changes.len(), 1);
        assert_eq!(out.changes[0].line_number, 2);
        assert_eq!(out.changes[0].before, "- ❌ Feature X");
    }

    #[test]
    fn checkbox_is_ticked() {
        let map = statuses(&[("Write tests", Status::Completed)]);
        let out = rewrite("## Work\n  - [ ] Write tests\n", &map);
        assert_eq!(out.content, "## Work\n  - [x] Write tests\n");
    }

    #[test]
    fn checkbox_has_no_in_progress_state() {
        let map = statuses(&[("Write tests", Status::InProgress)]);
        let out = rewrite("## Work\n- [ ] Write tests\n", &map);
        assert!(!out.is_changed());
    }

    #[test]
    fn plain_bullet_gains_prefix_marker() {
        let map = statuses(&[("Dark mode", Status::Completed)]);
        let out = rewrite("## Work\n- Dark mode\n", &map);
        assert_eq!(out.content, "## Work\n- ✅ Dark mode\n");
    }

    #[test]
    fn matching_status_leaves_line_alone() {
        let map = statuses(&[("Login", Status::Completed)]);
        let doc = "## Work\n- ✓ Login\n";
        let out = rewrite(doc, &map);
        assert_eq!(out.content, doc);
        assert!(!out.is_changed());
    }

    #[test]
    fn unknown_key_keeps_own_status() {
        let doc = "## Work\n- ⚠️ Search\n- Needs review\n";
        let out = rewrite(doc, &MergedStatusMap::new());
        assert_eq!(out.content, doc);
    }

    #[test]
    fn legend_is_immune() {
        let map = statuses(&[("Not Started", Status::Completed), ("Completed", Status::NotStarted)]);
        let doc = "## Status Legend\n- ✅ Completed\n- ❌ Not Started\n";
        assert_eq!(rewrite(doc, &map).content, doc);
    }

    #[test]
    fn lines_outside_sections_are_untouched() {
        let map = statuses(&[("Login", Status::Completed)]);
        let doc = "# Title\n- ❌ Login\n```\n- ❌ Login\n```\n";
        assert_eq!(rewrite(doc, &map).content, doc);
    }

    #[test]
    fn line_endings_are_preserved() {
        let map = statuses(&[("Login", Status::Completed)]);
        let out = rewrite("## Work\r\n- ❌ Login\r\n- Logout", &map);
        assert_eq!(out.content, "## Work\r\n- ✅ Login\r\n- Logout");
    }

    #[test]
    fn cross_document_dedup() {
        let a = "## Features\n- ✅ Implement caching\n";
        let b = "## Backend\n- Caching implementation: ⚠️\n";

        let map = merge(&[document_tasks(&parse(a)), document_tasks(&parse(b))]);
        assert_eq!(rewrite(a, &map).content, a);
        assert_eq!(rewrite(b, &map).content, "## Backend\n- Caching implementation: ✅\n");
    }

    const LINES: &[&str] = &[
        "## Work",
        "### Part",
        "# Title",
        "## Status Legend",
        "- ✅ Login",
        "- Login: ⚠️",
        "- [ ] Login",
        "- Login",
        "- ❌ Search",
        "Search: ✅",
        "Some prose about search.",
        "```",
        "",
        "  * ⚠ Deploy",
    ];

    fn any_status() -> impl Strategy<Value = Status> {
        prop_oneof![
            Just(Status::NotStarted),
            Just(Status::InProgress),
            Just(Status::Completed),
        ]
    }

    proptest! {
        #[test]
        fn rewrite_preserves_structure(
            picks in proptest::collection::vec(0..LINES.len(), 0..30),
            login in any_status(),
            search in any_status(),
            deploy in any_status(),
        ) {
            let doc: String = picks.iter().map(|i| format!("{}\n", LINES[*i])).collect();
            let map = statuses(&[("Login", login), ("Search", search), ("Deploy", deploy)]);
            let out = rewrite(&doc, &map);

            prop_assert_eq!(out.content.lines().count(), doc.lines().count());
            for (before, after) in doc.lines().zip(out.content.lines()) {
                if before != after {
                    prop_assert!(match_line(before).is_some());
                }
            }

            let again = rewrite(&out.content, &map);
            prop_assert_eq!(again.content, out.content);
        }
    }
}
