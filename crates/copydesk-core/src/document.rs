//! Input documents.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{AnalysisError, AnalysisResult};

/// A Markdown document as read from disk (or supplied inline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Where the text came from. Inline documents use a placeholder name.
    pub path: Utf8PathBuf,
    /// The full source text.
    pub text: String,
}

impl RawDocument {
    /// Wrap text that did not come from a file.
    pub fn from_text(path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read `path`, refusing files larger than `max_bytes`.
    ///
    /// The size is checked from metadata before anything is read into memory.
    /// `None` disables the limit.
    #[tracing::instrument(fields(path = %path))]
    pub fn load(path: &Utf8Path, max_bytes: Option<usize>) -> AnalysisResult<Self> {
        let read_err = |source| AnalysisError::ReadInput {
            path: path.to_owned(),
            source,
        };

        let metadata = std::fs::metadata(path).map_err(read_err)?;
        if let Some(limit) = max_bytes {
            let size = metadata.len();
            if size > limit as u64 {
                return Err(AnalysisError::InputTooLarge {
                    path: path.to_owned(),
                    size,
                    limit,
                });
            }
        }

        let text = std::fs::read_to_string(path).map_err(read_err)?;
        tracing::debug!(bytes = text.len(), "document loaded");
        Ok(Self {
            path: path.to_owned(),
            text,
        })
    }

    /// Check inline text against `max_bytes`.
    pub fn check_size(&self, max_bytes: Option<usize>) -> AnalysisResult<()> {
        match max_bytes {
            Some(limit) if self.text.len() > limit => Err(AnalysisError::InputTooLarge {
                path: self.path.clone(),
                size: self.text.len() as u64,
                limit,
            }),
            _ => Ok(()),
        }
    }
}
