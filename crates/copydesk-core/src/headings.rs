//! Heading hierarchy and capitalisation checks.
//!
//! Three checks run over the full heading sequence (every depth):
//!
//! - **multiple-h1**: every H1 after the first
//! - **skipped-level**: a heading more than one level deeper than its predecessor
//! - **not-sentence-case**: a heading that capitalises common words
//!
//! The sentence-case check is a heuristic. Its exemptions (acronyms,
//! camel-case identifiers, words after a colon or em-dash) are deliberately
//! simple and produce known false negatives and positives on unusual input.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::markdown::{CODE_PLACEHOLDER, Heading};

/// Words with an internal capital after a lower-case run (`GitHub`, `JavaScript`).
static CAMEL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+[A-Z]").expect("valid regex"));

/// An upper-case letter followed by a lower-case one (`Title`, not `API`).
static CAPITALISED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]").expect("valid regex"));

/// The kind of heading problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum HeadingIssueKind {
    /// Depth jumped by more than one level.
    SkippedLevel,
    /// More than one top-level heading.
    MultipleH1,
    /// Heading capitalises words that sentence case leaves lower-case.
    NotSentenceCase,
}

/// A heading hierarchy or capitalisation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HeadingIssue {
    /// The kind of issue.
    #[serde(rename = "type")]
    pub kind: HeadingIssueKind,
    /// 1-based source line of the heading.
    pub line: usize,
    /// The heading text.
    pub text: String,
    /// Human-readable description.
    pub message: String,
}

/// Run every heading check.
///
/// Issues are grouped by check: all multiple-h1 issues first, then
/// skipped levels, then sentence case.
#[tracing::instrument(skip_all, fields(heading_count = headings.len()))]
pub fn check_headings(headings: &[&Heading]) -> Vec<HeadingIssue> {
    let mut issues = Vec::new();

    let h1s: Vec<&Heading> = headings.iter().copied().filter(|h| h.depth == 1).collect();
    for (idx, h1) in h1s.iter().enumerate().skip(1) {
        issues.push(HeadingIssue {
            kind: HeadingIssueKind::MultipleH1,
            line: h1.line,
            text: h1.text.clone(),
            message: format!(
                "Multiple H1 headings found. \"{}\" is the {} H1; a document should have only one.",
                h1.text,
                ordinal(idx + 1)
            ),
        });
    }

    for pair in headings.windows(2) {
        let (prev, heading) = (pair[0], pair[1]);
        if heading.depth > prev.depth + 1 {
            issues.push(HeadingIssue {
                kind: HeadingIssueKind::SkippedLevel,
                line: heading.line,
                text: heading.text.clone(),
                message: format!(
                    "Heading level skipped: H{} \u{2192} H{}. Expected H{}.",
                    prev.depth,
                    heading.depth,
                    prev.depth + 1
                ),
            });
        }
    }

    for heading in headings {
        if !is_sentence_case(&heading.masked_text) {
            issues.push(HeadingIssue {
                kind: HeadingIssueKind::NotSentenceCase,
                line: heading.line,
                text: heading.text.clone(),
                message: format!("Heading is not in sentence case: \"{}\".", heading.text),
            });
        }
    }

    tracing::debug!(issue_count = issues.len(), "heading checks complete");
    issues
}

/// Whether heading text (with code spans already masked) reads as sentence case.
///
/// The first word is never checked. A later word is exempt when it is the
/// code placeholder, all capitals and longer than one character, camel-case,
/// or follows a word ending in `:` or an em-dash.
pub fn is_sentence_case(masked_text: &str) -> bool {
    let words: Vec<&str> = masked_text.split_whitespace().collect();

    for (i, word) in words.iter().enumerate().skip(1) {
        if *word == CODE_PLACEHOLDER {
            continue;
        }
        if word.chars().count() > 1 && *word == word.to_uppercase() {
            continue;
        }
        if CAMEL_CASE.is_match(word) {
            continue;
        }
        let prev = words[i - 1];
        if prev.ends_with(':') || prev.ends_with('\u{2014}') {
            continue;
        }
        if CAPITALISED.is_match(word) {
            return false;
        }
    }

    true
}

/// English ordinal for `n` ("1st", "2nd", "3rd", "11th", "22nd").
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
