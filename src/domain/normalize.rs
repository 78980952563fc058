//! Task text normalization
//!
//! Turns a task description into a dedup key so that the same logical task
//! written as "Implement caching" in one document and "Caching
//! implementation" in another collapses to one entry.
//!
//! ## Pipeline
//!
//! 1. Trim and drop a leading `- ` bullet
//! 2. Drop a trailing `(...)` clause
//! 3. Collapse whitespace runs
//! 4. Lowercase
//! 5. Remove the phrase "in progress"
//! 6. Map verb forms to their noun (`implementing` -> `implementation`)
//! 7. Drop one leading verb (`add`, `update`, ...)
//! 8. Drop one trailing generic noun (`system`, `feature`, ...), unless only
//!    another generic noun would remain
//! 9. Order words: generic nouns first, then other words alphabetically,
//!    then `in`, then verbs
//!
//! The ordering never moves a verb to the front or a generic noun to the end
//! when another word could take that place, so steps 7 and 8 cannot reach
//! into the middle of the original text on a later pass. The pipeline is
//! applied until the text stops changing, which makes [`normalize`]
//! idempotent.

use std::sync::LazyLock;

use regex::Regex;

use super::status::is_bare_symbol;

/// Verb forms and the noun they collapse to
const WORD_FAMILIES: &[(&[&str], &str)] = &[
    (&["migrate", "migrating"], "migration"),
    (&["implement", "implementing"], "implementation"),
    (&["develop", "developing"], "development"),
    (&["enhance", "enhancing"], "enhancement"),
    (&["complete", "completing"], "completion"),
    (&["configure", "configuring"], "configuration"),
    (&["optimize", "optimizing"], "optimization"),
    (&["document", "documenting"], "documentation"),
];

const VERB_PREFIXES: &[&str] = &["complete", "add", "implement", "update", "enhance"];

const NOUN_SUFFIXES: &[&str] = &["system", "functionality", "feature", "tool"];

static TRAILING_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^()]*\)\s*$").expect("static regex must compile"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex must compile"));

static FAMILY_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    WORD_FAMILIES
        .iter()
        .map(|(variants, noun)| {
            let pattern = format!(r"\b(?:{})\b", variants.join("|"));
            (Regex::new(&pattern).expect("static regex must compile"), *noun)
        })
        .collect()
});

static VERB_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:{})\s+", VERB_PREFIXES.join("|"))).expect("static regex must compile")
});

static NOUN_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\s+(?:{})$", NOUN_SUFFIXES.join("|"))).expect("static regex must compile")
});

/// Normalizes a task description into its dedup key
pub fn normalize(text: &str) -> String {
    let mut current = normalize_once(text);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Normalizes `text`, returning `None` when nothing task-like remains
///
/// Empty keys, bare status symbols and keys without a single letter or digit
/// (rules like `- - -`) are not tasks.
pub fn task_key(text: &str) -> Option<String> {
    let key = normalize(text);
    if is_bare_symbol(&key) || !key.chars().any(char::is_alphanumeric) {
        None
    } else {
        Some(key)
    }
}

fn normalize_once(text: &str) -> String {
    let text = text.trim();
    let text = text.strip_prefix("- ").unwrap_or(text);

    let text = TRAILING_PAREN_RE.replace(text, "");
    let text = collapse_whitespace(&text).to_lowercase();
    let text = collapse_whitespace(&text.replace("in progress", ""));

    let mut text = text;
    for (re, noun) in FAMILY_RES.iter() {
        if re.is_match(&text) {
            text = re.replace_all(&text, *noun).into_owned();
        }
    }

    let text = VERB_PREFIX_RE.replace(&text, "");
    let text = strip_noun_suffix(&text);

    let mut words: Vec<&str> = text.split_whitespace().collect();
    words.sort_unstable_by_key(|word| (word_rank(word), *word));
    words.join(" ")
}

fn strip_noun_suffix(text: &str) -> &str {
    match NOUN_SUFFIX_RE.find(text) {
        Some(m) if !NOUN_SUFFIXES.contains(&&text[..m.start()]) => &text[..m.start()],
        _ => text,
    }
}

/// Sort bucket for a word of the key
fn word_rank(word: &str) -> u8 {
    if NOUN_SUFFIXES.contains(&word) {
        0
    } else if VERB_PREFIXES.contains(&word) {
        3
    } else if word == "in" {
        // keeps "in" from landing right before "progress"
        2
    } else {
        1
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}
