//! Long sentence and long paragraph detection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sections::Section;
use crate::text::{count_words, split_sentences, truncate_chars};

/// Sentences with more words than this are flagged.
pub const LONG_SENTENCE_WORDS: usize = 25;

/// Paragraphs with more sentences than this are flagged.
pub const LONG_PARAGRAPH_SENTENCES: usize = 5;

/// Long-paragraph flag text is cut to this many characters.
const PARAGRAPH_PREVIEW_CHARS: usize = 100;

/// The kind of readability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FlagKind {
    /// A sentence over [`LONG_SENTENCE_WORDS`] words.
    LongSentence,
    /// A paragraph over [`LONG_PARAGRAPH_SENTENCES`] sentences.
    LongParagraph,
}

/// A specific readability problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Flag {
    /// The kind of flag.
    #[serde(rename = "type")]
    pub kind: FlagKind,
    /// Label of the section the text belongs to.
    pub section: String,
    /// 1-based line where the paragraph starts.
    pub line: usize,
    /// The sentence, or the paragraph truncated to 100 characters.
    pub text: String,
    /// Word count for sentences, sentence count for paragraphs.
    pub value: usize,
}

/// Scan sections for long sentences and long paragraphs.
///
/// Within each section, every long-sentence flag precedes every
/// long-paragraph flag.
#[tracing::instrument(skip_all, fields(section_count = sections.len()))]
pub fn detect_flags(sections: &[Section]) -> Vec<Flag> {
    let mut flags = Vec::new();

    for section in sections {
        for fragment in &section.fragments {
            for sentence in split_sentences(&fragment.text) {
                let words = count_words(sentence);
                if words > LONG_SENTENCE_WORDS {
                    flags.push(Flag {
                        kind: FlagKind::LongSentence,
                        section: section.label.clone(),
                        line: fragment.line,
                        text: sentence.to_string(),
                        value: words,
                    });
                }
            }
        }

        for fragment in &section.fragments {
            let sentences = split_sentences(&fragment.text).len();
            if sentences > LONG_PARAGRAPH_SENTENCES {
                flags.push(Flag {
                    kind: FlagKind::LongParagraph,
                    section: section.label.clone(),
                    line: fragment.line,
                    text: truncate_chars(&fragment.text, PARAGRAPH_PREVIEW_CHARS),
                    value: sentences,
                });
            }
        }
    }

    tracing::debug!(flag_count = flags.len(), "readability flags detected");
    flags
}
