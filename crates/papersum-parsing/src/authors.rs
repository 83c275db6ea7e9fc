use once_cell::sync::Lazy;
use regex::Regex;

use crate::title::LineCheck;

/// How many lines after the title region are examined (exclusive bound,
/// counted from the line that closed the title).
const AUTHOR_WINDOW: usize = 10;

/// Author lines are short; anything longer is prose or an affiliation block.
const MAX_AUTHOR_LINE_CHARS: usize = 100;

const MIN_AUTHOR_WORDS: usize = 2;

/// Patterns that make a line an author-line candidate, checked in order.
pub const AUTHOR_PATTERNS: &[LineCheck] = &[
    ("simple_name", is_simple_name),
    ("marked_name", has_author_marker),
    ("name_with_affiliation", is_name_with_affiliation),
];

/// Two to four capitalized words and nothing else: `Jane Doe`, `John Smith Jane Doe`.
fn is_simple_name(line: &str) -> bool {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3}$").unwrap());
    RE.is_match(line)
}

/// `By Jane Doe`, `Dr. Smith`, `author: J. Doe`.
fn has_author_marker(line: &str) -> bool {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?i:by|author|prof|dr|mrs|mr|ms)\b[.:]?\s*[A-Z]").unwrap()
    });
    RE.is_match(line)
}

/// `Jane Doe, Department of Physics` and similar.
fn is_name_with_affiliation(line: &str) -> bool {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[A-Z][a-z]+\s+[A-Z][a-z]+.*(?:Department|University)").unwrap());
    RE.is_match(line)
}

/// Name of the first author pattern `line` matches, if any.
pub fn author_pattern(line: &str) -> Option<&'static str> {
    AUTHOR_PATTERNS
        .iter()
        .find(|(_, check)| check(line))
        .map(|(name, _)| *name)
}

/// Strip emails, a leading marker and any trailing affiliation from an
/// author line.
///
/// Every whitespace-delimited token containing `@` is removed, so the result
/// never contains one.
pub fn clean_author_line(line: &str) -> String {
    static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S*@\S*").unwrap());
    static MARKER_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?i:by|author|prof|dr|mrs|mr|ms)\b[.:]?\s*").unwrap());
    static AFFILIATION_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)department|university|college|institute|assistant|professor").unwrap()
    });

    let without_email = EMAIL_RE.replace_all(line, "");
    let without_marker = MARKER_RE.replace(without_email.trim_start(), "");
    let name_part = match AFFILIATION_RE.find(&without_marker) {
        Some(m) => &without_marker[..m.start()],
        None => &without_marker[..],
    };

    name_part
        .trim_matches(|c| matches!(c, '.' | ',' | ' '))
        .to_string()
}

/// Look for an author line in the window following the title region.
///
/// Scans `lines[end_idx + 1 .. min(len, end_idx + 10)]`. The first line that
/// matches an author pattern and still has at least two words after cleaning
/// wins.
pub fn scan_authors(lines: &[&str], end_idx: usize) -> Option<String> {
    let stop = lines.len().min(end_idx + AUTHOR_WINDOW);

    for (i, line) in lines.iter().enumerate().take(stop).skip(end_idx + 1) {
        let line = line.trim();
        if line.is_empty() || line.chars().count() > MAX_AUTHOR_LINE_CHARS {
            continue;
        }

        let Some(pattern) = author_pattern(line) else {
            continue;
        };

        let cleaned = clean_author_line(line);
        if cleaned.split_whitespace().count() >= MIN_AUTHOR_WORDS {
            tracing::trace!(line = i, pattern, "author line accepted");
            return Some(cleaned);
        }
        tracing::trace!(line = i, pattern, "author candidate too short after cleaning");
    }

    None
}
