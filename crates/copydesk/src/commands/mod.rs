//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use copydesk_core::RawDocument;

pub mod copy_edit;
pub mod info;
pub mod readability;
#[cfg(feature = "mcp")]
pub mod serve;

/// Load a document and validate its size against the configured limit.
///
/// Every analysis command reads its input through here so the size preflight
/// happens before the file is pulled into memory.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<RawDocument> {
    RawDocument::load(path, max_bytes).with_context(|| format!("failed to load {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn reads_within_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("doc.md")).unwrap();
        std::fs::write(&path, "# Title\n").unwrap();

        let doc = read_input_file(&path, Some(1024)).unwrap();
        assert_eq!(doc.text, "# Title\n");
    }

    #[test]
    fn rejects_oversize_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("big.md")).unwrap();
        std::fs::write(&path, "x".repeat(64)).unwrap();

        let err = read_input_file(&path, Some(16)).unwrap_err();
        assert!(format!("{err:#}").contains("too large"), "{err:#}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_input_file(Utf8Path::new("/nonexistent/doc.md"), None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/doc.md"));
    }
}
