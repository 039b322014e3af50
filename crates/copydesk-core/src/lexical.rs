//! Spelling and flagged-word scanning.
//!
//! The scanner hands the document's prose mask to a [`SpellChecker`] together
//! with the single-word flagged terms, then splits the findings in one pass:
//! flagged findings become [`ForbiddenWordIssue`]s and everything else becomes
//! a [`SpellingIssue`].

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisResult;
use crate::flagged_words::FlaggedTerms;
use crate::markdown::ParsedMarkdown;
use crate::position::PositionIndex;
use crate::spelling::{Language, SpellCheckRequest, SpellChecker};

/// A word the spell checker does not recognise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SpellingIssue {
    /// The word, in its original casing.
    pub word: String,
    /// 1-based source line.
    pub line: usize,
    /// Byte offset from the start of the document.
    pub offset: usize,
}

/// A flagged word found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForbiddenWordIssue {
    /// The flagged word, lower-cased.
    pub word: String,
    /// 1-based source line.
    pub line: usize,
    /// The full source line the word appears on.
    pub line_text: String,
    /// Preferred replacement, when the list provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Output of [`scan_lexical`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexicalFindings {
    /// Misspelled words, in document order.
    pub spelling: Vec<SpellingIssue>,
    /// Flagged words, one per `(line, word)`, in document order.
    pub forbidden_words: Vec<ForbiddenWordIssue>,
}

/// Spell-check the prose of `source` and report flagged words.
///
/// `parsed` must come from parsing `source`. A checker failure is returned
/// unchanged and no partial findings are kept.
#[tracing::instrument(skip_all, fields(language = %language, term_count = terms.len()))]
pub async fn scan_lexical<C: SpellChecker>(
    source: &str,
    parsed: &ParsedMarkdown,
    index: &PositionIndex<'_>,
    terms: &FlaggedTerms,
    checker: &C,
    language: Language,
) -> AnalysisResult<LexicalFindings> {
    let request = SpellCheckRequest {
        text: parsed.prose_mask(source),
        language,
        flag_words: terms.single_words(),
    };

    let findings = checker.check(&request).await?;
    tracing::debug!(finding_count = findings.len(), "spell check returned");

    let suggestions = terms.suggestions();
    let mut seen: HashSet<(usize, String)> = HashSet::new();
    let mut out = LexicalFindings::default();

    for finding in findings {
        let line = index.line_of(finding.offset);
        if finding.is_flagged {
            let word = finding.text.to_lowercase();
            if !seen.insert((line, word.clone())) {
                continue;
            }
            out.forbidden_words.push(ForbiddenWordIssue {
                suggestion: suggestions.get(word.as_str()).map(|s| (*s).to_string()),
                word,
                line,
                line_text: index.line_text(line).to_string(),
            });
        } else {
            out.spelling.push(SpellingIssue {
                word: finding.text,
                line,
                offset: finding.offset,
            });
        }
    }

    tracing::debug!(
        spelling = out.spelling.len(),
        forbidden_words = out.forbidden_words.len(),
        "lexical scan complete"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::markdown::parse;
    use crate::spelling::{DictionarySpellChecker, SpellCheckError, SpellFinding};
    use std::future::Future;

    struct FailingChecker;

    impl SpellChecker for FailingChecker {
        fn check(
            &self,
            _request: &SpellCheckRequest,
        ) -> impl Future<Output = Result<Vec<SpellFinding>, SpellCheckError>> + Send {
            std::future::ready(Err(SpellCheckError::Backend("offline".into())))
        }
    }

    /// Returns canned findings regardless of input.
    struct CannedChecker(Vec<SpellFinding>);

    impl SpellChecker for CannedChecker {
        fn check(
            &self,
            _request: &SpellCheckRequest,
        ) -> impl Future<Output = Result<Vec<SpellFinding>, SpellCheckError>> + Send {
            std::future::ready(Ok(self.0.clone()))
        }
    }

    fn scan<C: SpellChecker>(
        source: &str,
        terms: &FlaggedTerms,
        checker: &C,
    ) -> AnalysisResult<LexicalFindings> {
        let parsed = parse(source);
        let index = PositionIndex::new(source);
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        rt.block_on(scan_lexical(source, &parsed, &index, terms, checker, Language::En))
    }

    fn dictionary() -> DictionarySpellChecker {
        DictionarySpellChecker::from_words([
            "title", "this", "component", "works", "well", "here", "used",
        ])
    }

    #[test]
    fn splits_spelling_and_flagged() {
        let source = "# Title\n\nThis componnet simply works.\n";
        let terms = FlaggedTerms::parse("simply\n");
        let found = scan(source, &terms, &dictionary()).unwrap();

        assert_eq!(
            found.spelling,
            vec![SpellingIssue {
                word: "componnet".into(),
                line: 3,
                offset: source.find("componnet").unwrap(),
            }]
        );
        assert_eq!(
            found.forbidden_words,
            vec![ForbiddenWordIssue {
                word: "simply".into(),
                line: 3,
                line_text: "This componnet simply works.".into(),
                suggestion: None,
            }]
        );
    }

    #[test]
    fn forbidden_words_deduplicate_per_line() {
        let source = "Just this, just here.\n\nJust used.\n";
        let terms = FlaggedTerms::parse("just\n");
        let found = scan(source, &terms, &dictionary()).unwrap();
        let lines: Vec<_> = found.forbidden_words.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![1, 3]);
        assert!(found.forbidden_words.iter().all(|f| f.word == "just"));
    }

    #[test]
    fn suggestions_are_attached() {
        let source = "Utilize this component.\n";
        let terms = FlaggedTerms::parse("utilize \u{2192} use\n");
        let found = scan(source, &terms, &dictionary()).unwrap();
        assert_eq!(found.forbidden_words[0].suggestion.as_deref(), Some("use"));

        let json = serde_json::to_value(&found.forbidden_words[0]).unwrap();
        assert_eq!(json["lineText"], "Utilize this component.");
        assert_eq!(json["suggestion"], "use");
    }

    #[test]
    fn missing_suggestion_is_omitted_from_json() {
        let issue = ForbiddenWordIssue {
            word: "simply".into(),
            line: 1,
            line_text: "simply".into(),
            suggestion: None,
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert!(json.get("suggestion").is_none());
    }

    #[test]
    fn code_is_never_checked() {
        let source = "This works.\n\n```\nsimply componnet\n```\n\nUse `componnet` here.\n";
        let terms = FlaggedTerms::parse("simply\n");
        let found = scan(source, &terms, &dictionary()).unwrap();
        assert!(found.spelling.is_empty(), "{:?}", found.spelling);
        assert!(found.forbidden_words.is_empty());
    }

    #[test]
    fn checker_failure_propagates() {
        let err = scan("Some text.", &FlaggedTerms::default(), &FailingChecker).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::SpellCheck(SpellCheckError::Backend(_))
        ));
    }

    #[test]
    fn flagged_findings_are_lower_cased_and_keep_first() {
        let source = "Simply. simply.\n";
        let checker = CannedChecker(vec![
            SpellFinding {
                text: "Simply".into(),
                offset: 0,
                is_flagged: true,
            },
            SpellFinding {
                text: "simply".into(),
                offset: 8,
                is_flagged: true,
            },
        ]);
        let found = scan(source, &FlaggedTerms::parse("simply"), &checker).unwrap();
        assert_eq!(found.forbidden_words.len(), 1);
        assert_eq!(found.forbidden_words[0].word, "simply");
    }

    #[test]
    fn empty_document_has_no_findings() {
        let found = scan("", &FlaggedTerms::builtin(), &dictionary()).unwrap();
        assert_eq!(found, LexicalFindings::default());
    }
}
