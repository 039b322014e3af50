//! Sentence and word segmentation shared by scoring and flagging.
//!
//! Segmentation is deliberately naive: a sentence ends at `.`, `!` or `?`
//! followed by whitespace, or at a line break. Abbreviations and decimals
//! are not special-cased.

use regex::Regex;
use std::sync::LazyLock;

/// Terminal punctuation followed by whitespace.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])\s+").expect("valid regex"));

/// Split text into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for caps in SENTENCE_BREAK.captures_iter(text) {
        let (Some(whole), Some(mark)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_lines(&text[start..mark.end()], &mut sentences);
        start = whole.end();
    }
    push_lines(&text[start..], &mut sentences);
    sentences
}

fn push_lines<'t>(segment: &'t str, out: &mut Vec<&'t str>) {
    out.extend(
        segment
            .split('\n')
            .map(str::trim)
            .filter(|s| !s.is_empty()),
    );
}

/// Count whitespace-delimited tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Whitespace tokens that contain at least one letter or digit, with
/// surrounding punctuation trimmed.
pub fn lexical_words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
}

/// Truncate to at most `max_chars` characters, appending `...` when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        assert_eq!(
            split_sentences("One here. Two there! Three now? Four"),
            vec!["One here.", "Two there!", "Three now?", "Four"]
        );
    }

    #[test]
    fn punctuation_without_whitespace_does_not_split() {
        assert_eq!(
            split_sentences("Version 1.5 shipped.Then more."),
            vec!["Version 1.5 shipped.Then more."]
        );
    }

    #[test]
    fn line_breaks_split() {
        assert_eq!(
            split_sentences("first line\nsecond line"),
            vec!["first line", "second line"]
        );
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(split_sentences("A.   \n\n  B."), vec!["A.", "B."]);
        assert!(split_sentences("   ").is_empty());
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn word_counts() {
        assert_eq!(count_words("  one two\tthree\nfour "), 4);
        assert_eq!(count_words(""), 0);
        let words: Vec<_> = lexical_words("Hello, world - (again)!").collect();
        assert_eq!(words, vec!["Hello", "world", "again"]);
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("\u{e9}\u{e9}\u{e9}\u{e9}", 2), "\u{e9}\u{e9}...");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }
}
