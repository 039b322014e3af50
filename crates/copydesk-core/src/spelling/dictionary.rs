//! Word-list backed spell checker.
//!
//! Dictionaries are newline-delimited word lists such as
//! `/usr/share/dict/words`. Hunspell `.dic` files also load: the leading
//! entry count is skipped and `/FLAGS` affix suffixes are stripped (affix
//! rules themselves are not applied).

use std::collections::HashSet;
use std::future::Future;
use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;

use super::{Language, SpellCheckError, SpellCheckRequest, SpellChecker, SpellFinding};
use crate::error::{AnalysisError, AnalysisResult};

/// Words shorter than this are never reported as misspelled.
const MIN_WORD_LEN: usize = 4;

/// Whitespace-delimited chunks that look like URLs.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:[a-z][a-z0-9+.-]*://|www\.)").expect("valid regex"));

/// Whitespace-delimited chunks that look like email addresses.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex")
});

/// Spell checker backed by an in-memory set of known words.
#[derive(Debug, Clone, Default)]
pub struct DictionarySpellChecker {
    /// Known words, lower-cased.
    words: HashSet<String>,
}

impl DictionarySpellChecker {
    /// Build a checker that knows exactly `words`.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut checker = Self::default();
        checker.add_words(words);
        checker
    }

    /// Add accepted words.
    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| normalize(w.as_ref())));
    }

    /// Load every dictionary in `paths`, plus `extra` accepted words.
    #[tracing::instrument(skip(extra), fields(extra_count = extra.len()))]
    pub fn load(paths: &[Utf8PathBuf], extra: &[String]) -> AnalysisResult<Self> {
        let mut checker = Self::default();
        for path in paths {
            checker.load_file(path)?;
        }
        checker.add_words(extra);
        tracing::debug!(word_count = checker.len(), "dictionaries loaded");
        Ok(checker)
    }

    /// Load the first system dictionary found for `language`, plus `extra`.
    ///
    /// Fails with [`AnalysisError::NoDictionary`] when nothing is installed.
    #[tracing::instrument(skip(extra), fields(extra_count = extra.len()))]
    pub fn discover(language: Language, extra: &[String]) -> AnalysisResult<Self> {
        let candidates = system_candidates(language);
        let Some(found) = candidates.iter().find(|path| path.is_file()) else {
            return Err(AnalysisError::NoDictionary {
                searched: candidates
                    .iter()
                    .map(|path| path.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        };
        tracing::info!(dictionary = %found, "using system dictionary");
        Self::load(std::slice::from_ref(found), extra)
    }

    /// Load `paths` when any are given, otherwise discover a system dictionary.
    pub fn open(paths: &[Utf8PathBuf], language: Language, extra: &[String]) -> AnalysisResult<Self> {
        if paths.is_empty() {
            Self::discover(language, extra)
        } else {
            Self::load(paths, extra)
        }
    }

    /// Number of known words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the checker knows no words at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `word` is known, ignoring case and a trailing possessive.
    pub fn is_known(&self, word: &str) -> bool {
        let word = normalize(word);
        if self.words.contains(&word) {
            return true;
        }
        word.strip_suffix("'s")
            .is_some_and(|stem| self.words.contains(stem))
    }

    fn load_file(&mut self, path: &Utf8Path) -> AnalysisResult<()> {
        let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Dictionary {
            path: path.to_owned(),
            source,
        })?;
        self.words.extend(parse_word_list(&content));
        Ok(())
    }

    /// Whether an unflagged token should be reported.
    fn is_misspelled(&self, word: &str) -> bool {
        if word.chars().count() < MIN_WORD_LEN {
            return false;
        }
        if !word.chars().any(char::is_lowercase) {
            return false;
        }
        if self.is_known(word) {
            return false;
        }
        let parts = camel_case_parts(word);
        if parts.len() > 1 {
            return !parts
                .iter()
                .all(|part| part.chars().count() < MIN_WORD_LEN || self.is_known(part));
        }
        true
    }

    fn find(&self, request: &SpellCheckRequest) -> Vec<SpellFinding> {
        let flagged: HashSet<String> = request.flag_words.iter().map(|w| normalize(w)).collect();

        let mut findings = Vec::new();
        for (chunk_start, chunk) in chunks(&request.text) {
            if URL_PATTERN.is_match(chunk) || EMAIL_PATTERN.is_match(chunk) {
                continue;
            }
            for (word_start, word) in words(chunk) {
                let is_flagged = flagged.contains(&normalize(word));
                if is_flagged || self.is_misspelled(word) {
                    findings.push(SpellFinding {
                        text: word.to_string(),
                        offset: chunk_start + word_start,
                        is_flagged,
                    });
                }
            }
        }
        findings
    }
}

impl SpellChecker for DictionarySpellChecker {
    fn check(
        &self,
        request: &SpellCheckRequest,
    ) -> impl Future<Output = Result<Vec<SpellFinding>, SpellCheckError>> + Send {
        std::future::ready(Ok(self.find(request)))
    }
}

/// System word lists to try for `language`, most specific first.
fn system_candidates(language: Language) -> Vec<Utf8PathBuf> {
    let (dict_names, hunspell_names): (&[&str], &[&str]) = match language {
        Language::En => (
            &["words", "american-english", "british-english"],
            &["en_US", "en_GB"],
        ),
        Language::EnUs => (&["american-english", "words"], &["en_US"]),
        Language::EnGb | Language::EnAu => (&["british-english", "words"], &["en_GB", "en_AU"]),
        Language::EnCa => (
            &["canadian-english", "american-english", "words"],
            &["en_CA", "en_US"],
        ),
    };

    dict_names
        .iter()
        .map(|name| Utf8PathBuf::from(format!("/usr/share/dict/{name}")))
        .chain(
            hunspell_names
                .iter()
                .map(|name| Utf8PathBuf::from(format!("/usr/share/hunspell/{name}.dic"))),
        )
        .collect()
}

/// Parse a word list, tolerating hunspell count headers and affix flags.
fn parse_word_list(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| !line.bytes().all(|b| b.is_ascii_digit()))
        .map(|line| line.split_once('/').map_or(line, |(word, _flags)| word))
        .map(normalize)
}

/// Lower-case and fold typographic apostrophes to ASCII.
fn normalize(word: &str) -> String {
    word.to_lowercase().replace('\u{2019}', "'")
}

const fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}')
}

/// Whitespace-delimited chunks with their byte offsets.
fn chunks(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                out.push((s, &text[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push((s, &text[s..]));
    }
    out
}

/// Letter runs in `chunk`, joined across inner apostrophes, with byte offsets.
fn words(chunk: &str) -> Vec<(usize, &str)> {
    let chars: Vec<(usize, char)> = chunk.char_indices().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].1.is_alphabetic() {
            i += 1;
            continue;
        }
        let start = chars[i].0;
        let mut j = i + 1;
        loop {
            if j < chars.len() && chars[j].1.is_alphabetic() {
                j += 1;
            } else if j + 1 < chars.len() && is_apostrophe(chars[j].1) && chars[j + 1].1.is_alphabetic()
            {
                j += 2;
            } else {
                break;
            }
        }
        let end = chars.get(j).map_or(chunk.len(), |&(offset, _)| offset);
        out.push((start, &chunk[start..end]));
        i = j;
    }

    out
}

/// Split `camelCase` and `PascalCase` words at each lower-to-upper boundary.
fn camel_case_parts(word: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev_lower = false;
    for (i, c) in word.char_indices() {
        if c.is_uppercase() && prev_lower {
            parts.push(&word[start..i]);
            start = i;
        }
        prev_lower = c.is_lowercase();
    }
    parts.push(&word[start..]);
    parts
}
