//! Flagged word lists.
//!
//! A flagged word list is a plain text file with one entry per line:
//!
//! ```text
//! # comment
//! simply
//! utilize → use
//! ```
//!
//! A bare entry is strictly forbidden. An entry with an arrow (`→`, or the
//! ASCII `->`) carries a suggested replacement. Terms are lower-cased on load.
//! Multi-word phrases are kept in the list but the scanner only matches
//! single words.

use std::collections::HashMap;

use camino::Utf8Path;

use crate::error::{AnalysisError, AnalysisResult};

/// The list shipped with copydesk, used when no list is configured.
const BUILTIN_LIST: &str = include_str!("../data/flagged-words.txt");

/// A single flagged word or phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedTerm {
    /// The word or phrase to flag, lower-cased.
    pub term: String,
    /// Preferred replacement, absent for strictly forbidden terms.
    pub suggestion: Option<String>,
}

impl FlaggedTerm {
    /// Whether the term is a single word (the only kind the scanner matches).
    pub fn is_single_word(&self) -> bool {
        !self.term.contains(char::is_whitespace)
    }
}

/// An ordered list of flagged terms, built once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlaggedTerms {
    terms: Vec<FlaggedTerm>,
}

impl FlaggedTerms {
    /// Parse a word list from its text.
    pub fn parse(content: &str) -> Self {
        let terms = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(parse_entry)
            .collect();
        Self { terms }
    }

    /// Read and parse a word list file.
    #[tracing::instrument(fields(path = %path))]
    pub fn load(path: &Utf8Path) -> AnalysisResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::WordList {
            path: path.to_owned(),
            source,
        })?;
        let terms = Self::parse(&content);
        tracing::debug!(term_count = terms.len(), "loaded flagged word list");
        Ok(terms)
    }

    /// The built-in list.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_LIST)
    }

    /// Load `path` if given, otherwise fall back to the built-in list.
    pub fn load_or_builtin(path: Option<&Utf8Path>) -> AnalysisResult<Self> {
        path.map_or_else(|| Ok(Self::builtin()), Self::load)
    }

    /// All terms, in file order.
    pub fn terms(&self) -> &[FlaggedTerm] {
        &self.terms
    }

    /// Number of terms, phrases included.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the list has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Single-word terms, in file order.
    pub fn single_words(&self) -> Vec<String> {
        self.terms
            .iter()
            .filter(|t| t.is_single_word())
            .map(|t| t.term.clone())
            .collect()
    }

    /// Map from single-word term to its suggestion.
    ///
    /// When a term appears twice, the later suggestion wins.
    pub fn suggestions(&self) -> HashMap<&str, &str> {
        self.terms
            .iter()
            .filter(|t| t.is_single_word())
            .filter_map(|t| t.suggestion.as_deref().map(|s| (t.term.as_str(), s)))
            .collect()
    }
}

fn parse_entry(line: &str) -> FlaggedTerm {
    let split = line
        .split_once('\u{2192}')
        .or_else(|| line.split_once("->"));
    match split {
        Some((term, suggestion)) => {
            let suggestion = suggestion.trim();
            FlaggedTerm {
                term: term.trim().to_lowercase(),
                suggestion: (!suggestion.is_empty()).then(|| suggestion.to_string()),
            }
        }
        None => FlaggedTerm {
            term: line.to_lowercase(),
            suggestion: None,
        },
    }
}
