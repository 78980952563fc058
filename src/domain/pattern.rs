//! Task line matching
//!
//! Status documents use several bullet conventions side by side. The rules
//! below are tried in order and the first match wins; the rules overlap, so
//! the order is part of the behavior.
//!
//! | # | Form                      | Style         |
//! |---|---------------------------|---------------|
//! | 1 | `- ✅ description`         | `PrefixEmoji` |
//! | 2 | `- description: ✅`        | `SuffixColon` |
//! | 3 | `description: ✅`          | `SuffixColon` |
//! | 4 | `- [x] description`       | `Checkbox`    |
//! | 5 | `- description`           | `PlainBullet` |
//!
//! Rules 1 to 3 accept `✅ ✓ ⚠️ ⚠ ❌` and a standalone `x`.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::status::Marker;

/// How a task line was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    PrefixEmoji,
    SuffixColon,
    Checkbox,
    PlainBullet,
}

/// A recognized task line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch<'a> {
    pub style: LineStyle,
    pub marker: Marker,
    /// The task text with the marker and bullet removed
    pub description: &'a str,
    /// Byte range of the marker token within the line, if any
    pub marker_span: Option<Range<usize>>,
    /// Byte offset where the description starts
    pub description_start: usize,
}

struct LineRule {
    style: LineStyle,
    re: Regex,
}

impl LineRule {
    fn new(style: LineStyle, pattern: &str) -> Self {
        Self {
            style,
            re: Regex::new(pattern).expect("static regex must compile"),
        }
    }
}

/// Status tokens accepted by the prefix and suffix rules. A bare `x` only
/// counts as a whole token, see [`match_line`].
const STATUS_MARKER: &str = "(?P<marker>✅|⚠️|⚠|❌|✓|x)";

static RULES: LazyLock<Vec<LineRule>> = LazyLock::new(|| {
    vec![
        LineRule::new(
            LineStyle::PrefixEmoji,
            &format!(r"^\s*[-*]\s+{STATUS_MARKER}\s*(?P<desc>\S.*?)\s*$"),
        ),
        LineRule::new(
            LineStyle::SuffixColon,
            &format!(r"^\s*[-*]\s+(?P<desc>\S.*?)\s*:\s*{STATUS_MARKER}\s*$"),
        ),
        LineRule::new(
            LineStyle::SuffixColon,
            &format!(r"^\s*(?P<desc>[^\s\-#>|].*?)\s*:\s*{STATUS_MARKER}\s*$"),
        ),
        LineRule::new(
            LineStyle::Checkbox,
            r"^\s*[-*]\s+\[(?P<marker>[xX ✓])\]\s*(?P<desc>\S.*?)\s*$",
        ),
        LineRule::new(LineStyle::PlainBullet, r"^\s*[-*]\s+(?P<desc>\S.*?)\s*$"),
    ]
});

/// Matches a single line (without its line terminator) against the rules
pub fn match_line(line: &str) -> Option<LineMatch<'_>> {
    RULES.iter().find_map(|rule| {
        let caps = rule.re.captures(line)?;
        let desc = caps.name("desc")?;
        let marker = caps.name("marker");
        // `- xylophone` is a plain bullet, not an `x` marker
        if marker.is_some_and(|m| m.as_str() == "x" && m.end() == desc.start()) {
            return None;
        }
        let parse_marker: fn(&str) -> Marker = match rule.style {
            LineStyle::Checkbox => Marker::checkbox,
            _ => Marker::from_token,
        };

        Some(LineMatch {
            style: rule.style,
            marker: marker.map_or(Marker::None, |m| parse_marker(m.as_str())),
            description: desc.as_str(),
            marker_span: marker.map(|m| m.range()),
            description_start: desc.start(),
        })
    })
}
