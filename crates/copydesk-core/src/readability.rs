//! Readability scoring using Flesch-Kincaid Grade Level and Flesch Reading Ease.
//!
//! Lower grade = more readable. Target: ≤ 8 for user docs, ≤ 12 for technical docs.
//! Reading ease runs the other way: 60 to 70 is plain English, higher is easier.
//!
//! Scores are computed per H2 section and once for the whole document, always
//! over extracted prose (see [`crate::sections`]), never over raw Markdown.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::metrics::{StandardMetrics, TextMetrics, round_to};

/// Readability scores for a section or a whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionScores {
    /// Flesch-Kincaid grade level.
    pub flesch_kincaid_grade: f64,
    /// Flesch reading ease (0 to 100, higher is easier).
    pub flesch_reading_ease: f64,
    /// Number of words.
    pub word_count: usize,
    /// Number of sentences.
    pub sentence_count: usize,
    /// Words per sentence, rounded to 1 decimal.
    pub avg_sentence_length: f64,
    /// Syllables per word, rounded to 1 decimal.
    pub avg_syllables_per_word: f64,
}

impl SectionScores {
    /// Whether the grade exceeds `max_grade`.
    pub fn over_grade(&self, max_grade: f64) -> bool {
        self.flesch_kincaid_grade > max_grade
    }
}

/// Score plain text with [`StandardMetrics`].
pub fn score_text(text: &str) -> SectionScores {
    score_text_with(&StandardMetrics, text)
}

/// Score plain text with any metrics provider.
///
/// Text with no words or no sentences scores zero across the board.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
#[allow(clippy::cast_precision_loss)]
pub fn score_text_with<M: TextMetrics + ?Sized>(metrics: &M, text: &str) -> SectionScores {
    let word_count = metrics.word_count(text);
    let sentence_count = metrics.sentence_count(text);
    if word_count == 0 || sentence_count == 0 {
        return SectionScores::default();
    }
    let syllable_count = metrics.syllable_count(text);

    SectionScores {
        flesch_kincaid_grade: metrics.flesch_kincaid_grade(text),
        flesch_reading_ease: metrics.flesch_reading_ease(text),
        word_count,
        sentence_count,
        avg_sentence_length: round_to(word_count as f64 / sentence_count as f64, 1),
        avg_syllables_per_word: round_to(syllable_count as f64 / word_count as f64, 1),
    }
}
