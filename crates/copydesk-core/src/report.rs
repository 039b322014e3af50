//! Report assembly: the two top-level analysis entry points.
//!
//! [`copy_edit`] produces the copy-editing report (spelling, flagged words,
//! headings, punctuation). [`readability`] produces the readability report
//! (overall and per-section scores plus flags). Each call owns everything it
//! derives from the document; nothing is cached between calls.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::document::RawDocument;
use crate::error::AnalysisResult;
use crate::flagged_words::FlaggedTerms;
use crate::flags::{Flag, detect_flags};
use crate::formatting::{FormattingIssue, check_formatting};
use crate::headings::{HeadingIssue, check_headings};
use crate::lexical::{ForbiddenWordIssue, SpellingIssue, scan_lexical};
use crate::markdown;
use crate::metrics::{StandardMetrics, TextMetrics};
use crate::position::PositionIndex;
use crate::readability::{SectionScores, score_text_with};
use crate::sections::{build_sections, join_fragments};
use crate::spelling::{Language, SpellChecker};

/// Issue counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of spelling issues.
    pub spelling: usize,
    /// Number of flagged-word issues.
    pub forbidden_words: usize,
    /// Number of heading issues.
    pub headings: usize,
    /// Number of formatting issues.
    pub formatting: usize,
    /// Sum of the four categories.
    pub total: usize,
}

/// The copy-editing report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CopyEditReport {
    /// Misspelled words.
    pub spelling: Vec<SpellingIssue>,
    /// Flagged words from the word list.
    pub forbidden_words: Vec<ForbiddenWordIssue>,
    /// Heading hierarchy and capitalisation issues.
    pub headings: Vec<HeadingIssue>,
    /// Punctuation issues.
    pub formatting: Vec<FormattingIssue>,
    /// Counts by category.
    pub summary: Summary,
}

impl CopyEditReport {
    /// Build a report, deriving the summary from the issue lists.
    pub fn new(
        spelling: Vec<SpellingIssue>,
        forbidden_words: Vec<ForbiddenWordIssue>,
        headings: Vec<HeadingIssue>,
        formatting: Vec<FormattingIssue>,
    ) -> Self {
        let summary = Summary {
            spelling: spelling.len(),
            forbidden_words: forbidden_words.len(),
            headings: headings.len(),
            formatting: formatting.len(),
            total: spelling.len() + forbidden_words.len() + headings.len() + formatting.len(),
        };
        Self {
            spelling,
            forbidden_words,
            headings,
            formatting,
            summary,
        }
    }

    /// Whether any issue was found.
    pub const fn has_issues(&self) -> bool {
        self.summary.total > 0
    }
}

/// The readability report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    /// Scores over all prose in the document.
    pub overall: SectionScores,
    /// Scores per section, keyed by H2 text, in document order.
    pub sections: IndexMap<String, SectionScores>,
    /// Long sentences and long paragraphs.
    pub flags: Vec<Flag>,
}

/// Run every copy-editing check over `doc`.
///
/// The spell check is the only suspension point. Its failure aborts the run.
#[tracing::instrument(skip_all, fields(path = %doc.path, language = %language))]
pub async fn copy_edit<C: SpellChecker>(
    doc: &RawDocument,
    terms: &FlaggedTerms,
    checker: &C,
    language: Language,
) -> AnalysisResult<CopyEditReport> {
    let parsed = markdown::parse(&doc.text);
    let index = PositionIndex::new(&doc.text);

    let lexical = scan_lexical(&doc.text, &parsed, &index, terms, checker, language).await?;
    let headings = check_headings(&parsed.headings());
    let formatting = check_formatting(&doc.text);

    let report = CopyEditReport::new(
        lexical.spelling,
        lexical.forbidden_words,
        headings,
        formatting,
    );
    tracing::info!(total = report.summary.total, "copy edit complete");
    Ok(report)
}

/// Score the readability of `doc` with [`StandardMetrics`].
pub fn readability(doc: &RawDocument) -> ReadabilityReport {
    readability_with(&StandardMetrics, doc)
}

/// Score the readability of `doc` with any metrics provider.
#[tracing::instrument(skip_all, fields(path = %doc.path))]
pub fn readability_with<M: TextMetrics + ?Sized>(metrics: &M, doc: &RawDocument) -> ReadabilityReport {
    let nodes = markdown::parse_nodes(&doc.text);
    let sections = build_sections(&nodes);

    let scored: IndexMap<String, SectionScores> = sections
        .iter()
        .map(|section| {
            (
                section.label.clone(),
                score_text_with(metrics, &section.joined_text()),
            )
        })
        .collect();

    let overall_text = join_fragments(sections.iter().flat_map(|s| s.fragments.iter()));
    let overall = score_text_with(metrics, &overall_text);
    let flags = detect_flags(&sections);

    tracing::info!(
        grade = overall.flesch_kincaid_grade,
        sections = scored.len(),
        flags = flags.len(),
        "readability scored"
    );
    ReadabilityReport {
        overall,
        sections: scored,
        flags,
    }
}
