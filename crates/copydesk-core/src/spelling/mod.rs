//! Spell checking.
//!
//! The analysis engine talks to a spell checker through the [`SpellChecker`]
//! trait. A checker receives the prose of a document (with every non-prose
//! byte blanked, so offsets still point into the source) and the list of
//! flagged words, and reports every word it objects to.
//!
//! [`DictionarySpellChecker`] is the built-in implementation backed by plain
//! word lists.

mod dictionary;

use std::future::Future;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use dictionary::DictionarySpellChecker;

/// Spell-check language profile.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Language {
    /// Any English dictionary.
    #[default]
    En,
    /// American English.
    #[cfg_attr(feature = "clap", value(name = "en-us"))]
    EnUs,
    /// British English.
    #[cfg_attr(feature = "clap", value(name = "en-gb"))]
    EnGb,
    /// Canadian English.
    #[cfg_attr(feature = "clap", value(name = "en-ca"))]
    EnCa,
    /// Australian English (follows British spelling).
    #[cfg_attr(feature = "clap", value(name = "en-au"))]
    EnAu,
}

impl Language {
    /// Returns the language as a BCP-47-style tag.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::EnUs => "en-us",
            Self::EnGb => "en-gb",
            Self::EnCa => "en-ca",
            Self::EnAu => "en-au",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for a single spell-check call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellCheckRequest {
    /// Text to check. Offsets in findings are byte offsets into this text.
    pub text: String,
    /// Language profile.
    pub language: Language,
    /// Lower-cased words to report as flagged regardless of spelling.
    pub flag_words: Vec<String>,
}

/// A word the checker objects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellFinding {
    /// The word as it appears in the text.
    pub text: String,
    /// Byte offset of the word in the checked text.
    pub offset: usize,
    /// `true` when the word matched a flagged word rather than being unknown.
    pub is_flagged: bool,
}

/// Failure reported by a spell checker.
#[derive(Error, Debug)]
pub enum SpellCheckError {
    /// The checker does not handle the requested language.
    #[error("spell checker does not support language {0}")]
    UnsupportedLanguage(Language),

    /// The checker failed for another reason.
    #[error("spell checker failed: {0}")]
    Backend(String),
}

/// A spell-checking collaborator.
///
/// Implementations may suspend (an external service, a worker process).
/// A failure aborts the whole analysis run.
pub trait SpellChecker {
    /// Check `request.text`, returning findings in text order.
    fn check(
        &self,
        request: &SpellCheckRequest,
    ) -> impl Future<Output = Result<Vec<SpellFinding>, SpellCheckError>> + Send;
}
