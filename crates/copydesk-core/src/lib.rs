//! Core library for copydesk.
//!
//! This crate provides the analysis engine behind the `copydesk` CLI and MCP
//! server: a copy-editing report (spelling, flagged words, heading structure,
//! punctuation) and a readability report (Flesch scores per H2 section plus
//! long-sentence and long-paragraph flags) for Markdown documents.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`markdown`] - Parsing into a line-addressable block model
//! - [`report`] - The two analysis entry points
//! - [`spelling`] - The spell-checker seam and the built-in dictionary checker
//!
//! # Quick Start
//!
//! ```no_run
//! use camino::Utf8Path;
//! use copydesk_core::{DictionarySpellChecker, FlaggedTerms, Language, RawDocument};
//!
//! # async fn run() -> copydesk_core::AnalysisResult<()> {
//! let doc = RawDocument::load(Utf8Path::new("README.md"), None)?;
//! let checker = DictionarySpellChecker::discover(Language::En, &[])?;
//! let report =
//!     copydesk_core::copy_edit(&doc, &FlaggedTerms::builtin(), &checker, Language::En).await?;
//! println!("{} issues", report.summary.total);
//!
//! let scores = copydesk_core::readability(&doc);
//! println!("grade {}", scores.overall.flesch_kincaid_grade);
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod document;
pub mod error;
pub mod flagged_words;
pub mod flags;
pub mod formatting;
pub mod headings;
pub mod lexical;
pub mod markdown;
pub mod metrics;
pub mod position;
pub mod readability;
pub mod report;
pub mod sections;
pub mod spelling;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use document::RawDocument;
pub use error::{AnalysisError, AnalysisResult, ConfigError, ConfigResult};
pub use flagged_words::{FlaggedTerm, FlaggedTerms};
pub use report::{CopyEditReport, ReadabilityReport, Summary, copy_edit, readability};
pub use spelling::{
    DictionarySpellChecker, Language, SpellCheckError, SpellCheckRequest, SpellChecker,
    SpellFinding,
};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
