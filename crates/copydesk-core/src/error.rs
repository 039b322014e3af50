//! Error types for copydesk-core.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::spelling::SpellCheckError;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that abort an analysis run.
///
/// There is no partial report: any of these fails the whole run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input document could not be read.
    #[error("failed to read {path}")]
    ReadInput {
        /// The document path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input document exceeds the configured size limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// The document path.
        path: Utf8PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The flagged-word list could not be read.
    #[error("failed to read flagged word list {path}")]
    WordList {
        /// The word list path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A spelling dictionary could not be read.
    #[error("failed to read dictionary {path}")]
    Dictionary {
        /// The dictionary path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No spelling dictionary was configured and none was found on the system.
    #[error("no spelling dictionary found (searched: {searched}); set `dictionaries` in config")]
    NoDictionary {
        /// Comma-separated list of locations that were tried.
        searched: String,
    },

    /// The spell-checking collaborator failed.
    #[error(transparent)]
    SpellCheck(#[from] SpellCheckError),
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;
