/// Expand common typographic ligatures found in PDFs.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}

/// Split page text into trimmed, non-empty lines, preserving order.
pub fn text_lines(page: &str) -> Vec<&str> {
    page.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ligatures_expand() {
        assert_eq!(expand_ligatures("e\u{FB03}cient \u{FB01}eld"), "efficient field");
        assert_eq!(expand_ligatures("plain"), "plain");
    }

    #[test]
    fn lines_are_trimmed_and_blank_lines_dropped() {
        let page = "  Title Line  \n\n\t\nSecond line\r\n   \nthird";
        assert_eq!(text_lines(page), vec!["Title Line", "Second line", "third"]);
        assert!(text_lines("").is_empty());
        assert!(text_lines("\n \n").is_empty());
    }

    #[test]
    fn word_count_ignores_runs_of_whitespace() {
        assert_eq!(word_count("  one\ttwo \n three  "), 3);
        assert_eq!(word_count(""), 0);
    }
}
