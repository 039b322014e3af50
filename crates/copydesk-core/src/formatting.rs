//! Punctuation checks on raw source lines.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const EM_DASH: char = '\u{2014}';

/// The kind of formatting problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FormattingIssueKind {
    /// An em-dash character.
    EmDash,
}

/// A punctuation issue on a source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormattingIssue {
    /// The kind of issue.
    #[serde(rename = "type")]
    pub kind: FormattingIssueKind,
    /// 1-based source line.
    pub line: usize,
    /// The full source line.
    pub line_text: String,
    /// Human-readable description.
    pub message: String,
}

/// Report every line of `text` that contains an em-dash.
///
/// This runs over the raw source, so em-dashes in code and frontmatter
/// count too. A line with several em-dashes yields one issue.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn check_formatting(text: &str) -> Vec<FormattingIssue> {
    text.split('\n')
        .enumerate()
        .filter(|(_, line)| line.contains(EM_DASH))
        .map(|(i, line)| FormattingIssue {
            kind: FormattingIssueKind::EmDash,
            line: i + 1,
            line_text: line.trim_end_matches('\r').to_string(),
            message: format!(
                "Em-dash ({EM_DASH}) found. Use an alternative phrasing or punctuation."
            ),
        })
        .collect()
}
