use once_cell::sync::Lazy;
use regex::Regex;

/// A named line predicate. Heuristics are lists of these, checked in order.
pub type LineCheck = (&'static str, fn(&str) -> bool);

/// Journal header/footer fragments. Lines containing any of these are skipped
/// entirely: they neither join nor end the title.
const BOILERPLATE_MARKERS: &[&str] = &["©", "ISSN", "Volume", "DOI", "International Journal"];

/// Words that mark affiliations, venues or section headings, matched
/// case-insensitively anywhere in the line.
const EXCLUDED_KEYWORDS: &[&str] = &[
    "university",
    "department",
    "journal",
    "doi",
    "issn",
    "volume",
    "abstract",
];

const MIN_TITLE_WORDS: usize = 3;

/// Rules that disqualify a line from being part of the title.
pub const TITLE_REJECTIONS: &[LineCheck] = &[
    ("too_few_words", has_too_few_words),
    ("excluded_keyword", has_excluded_keyword),
    ("leading_noise", has_leading_noise),
];

/// Outcome of the title scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleScan {
    pub title: Option<String>,
    /// Index of the line that closed the title region: the terminal
    /// punctuated title line, or the first non-candidate after the title.
    /// Zero when the scan ran off the end of the page. Author detection
    /// starts at the line after this one.
    pub end_idx: usize,
}

pub fn is_boilerplate(line: &str) -> bool {
    BOILERPLATE_MARKERS.iter().any(|m| line.contains(m))
}

fn has_too_few_words(line: &str) -> bool {
    line.split_whitespace().count() < MIN_TITLE_WORDS
}

fn has_excluded_keyword(line: &str) -> bool {
    let lower = line.to_lowercase();
    EXCLUDED_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Page numbers and section headings at the start of a line.
fn has_leading_noise(line: &str) -> bool {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)^(?:\d+\s|page\s|abstract\s|introduction\s)").unwrap());
    RE.is_match(line)
}

/// Name of the first rejection rule `line` trips, if any.
pub fn title_rejection(line: &str) -> Option<&'static str> {
    TITLE_REJECTIONS
        .iter()
        .find(|(_, check)| check(line))
        .map(|(name, _)| *name)
}

pub fn is_title_candidate(line: &str) -> bool {
    title_rejection(line).is_none()
}

/// A candidate ending in terminal punctuation completes the title.
pub fn closes_title(line: &str) -> bool {
    line.ends_with(['.', '!', '?', ':'])
}

/// Find the title among the first-page lines.
///
/// Candidate lines accumulate until one ends in terminal punctuation or a
/// non-candidate line follows them. Boilerplate lines are skipped without
/// interrupting a multi-line title.
pub fn scan_title(lines: &[&str]) -> TitleScan {
    let mut title_lines: Vec<&str> = Vec::new();
    let mut end_idx = 0;

    for (i, line) in lines.iter().enumerate() {
        if is_boilerplate(line) {
            continue;
        }

        match title_rejection(line) {
            None => {
                title_lines.push(*line);
                if closes_title(line) {
                    end_idx = i;
                    break;
                }
            }
            Some(rule) => {
                if !title_lines.is_empty() {
                    tracing::trace!(line = i, rule, "title region ended");
                    end_idx = i;
                    break;
                }
            }
        }
    }

    let title = if title_lines.is_empty() {
        None
    } else {
        Some(title_lines.join(" "))
    };

    TitleScan { title, end_idx }
}
