//! Byte offset to line number mapping.
//!
//! Every diagnostic is attached to a 1-based source line. The index is built
//! once per document from newline positions and is read-only afterwards.

/// Line-start table for a single document.
#[derive(Debug, Clone)]
pub struct PositionIndex<'a> {
    text: &'a str,
    /// Byte offset of the first byte of each line. Always starts with `0`.
    line_starts: Vec<usize>,
}

impl<'a> PositionIndex<'a> {
    /// Build the index for `text`.
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    /// Return the 1-based line containing the byte `offset`.
    ///
    /// Equivalent to counting the newlines before `offset` and adding one.
    /// Offsets past the end of the text resolve to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        self.line_starts.partition_point(|&start| start <= offset)
    }

    /// Number of lines in the document (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The source text of a 1-based `line`, without its line terminator.
    ///
    /// Returns an empty string for lines outside the document.
    pub fn line_text(&self, line: usize) -> &'a str {
        let Some(&start) = line.checked_sub(1).and_then(|i| self.line_starts.get(i)) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line)
            .map_or(self.text.len(), |next| next - 1);
        self.text[start..end].trim_end_matches('\r')
    }
}
