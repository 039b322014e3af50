//! Text statistics behind the readability formulas.
//!
//! [`TextMetrics`] supplies word, sentence and syllable counts; the Flesch
//! formulas are provided methods on top of them:
//!
//! - Flesch-Kincaid grade: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//! - Flesch reading ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//!
//! Both return `0.0` for text with no words or no sentences.
//!
//! Syllables come from a table of known words (`data/syllables.txt`) and fall
//! back to a vowel-group estimate for everything else.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::text;

const KNOWN_SYLLABLES_DATA: &str = include_str!("../data/syllables.txt");

/// Lower-case word to syllable count, parsed from `<count>: <word> ...` lines.
static KNOWN_SYLLABLES: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    KNOWN_SYLLABLES_DATA
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (count, words) = line.split_once(':')?;
            let count = count.trim().parse::<usize>().ok()?;
            Some(words.split_whitespace().map(move |word| (word, count)))
        })
        .flatten()
        .collect()
});

/// Counts that feed the readability formulas.
pub trait TextMetrics {
    /// Number of words.
    fn word_count(&self, text: &str) -> usize;

    /// Number of sentences. At least 1 whenever there are words.
    fn sentence_count(&self, text: &str) -> usize;

    /// Total syllables across all words.
    fn syllable_count(&self, text: &str) -> usize;

    /// Flesch-Kincaid grade level, rounded to 1 decimal.
    fn flesch_kincaid_grade(&self, text: &str) -> f64 {
        let Some((asl, asw)) = self.averages(text) else {
            return 0.0;
        };
        round_to(0.39f64.mul_add(asl, 11.8f64.mul_add(asw, -15.59)), 1)
    }

    /// Flesch reading ease, rounded to 2 decimals.
    fn flesch_reading_ease(&self, text: &str) -> f64 {
        let Some((asl, asw)) = self.averages(text) else {
            return 0.0;
        };
        round_to(84.6f64.mul_add(-asw, 1.015f64.mul_add(-asl, 206.835)), 2)
    }

    /// Unrounded words per sentence and syllables per word, or `None` when
    /// either count is zero.
    #[allow(clippy::cast_precision_loss)]
    fn averages(&self, text: &str) -> Option<(f64, f64)> {
        let words = self.word_count(text);
        if words == 0 {
            return None;
        }
        let sentences = self.sentence_count(text);
        if sentences == 0 {
            return None;
        }
        let syllables = self.syllable_count(text);
        Some((
            words as f64 / sentences as f64,
            syllables as f64 / words as f64,
        ))
    }
}

/// Default metrics: lexical word counting, punctuation-based sentence
/// splitting and [`count_syllables`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMetrics;

impl TextMetrics for StandardMetrics {
    fn word_count(&self, text: &str) -> usize {
        text::lexical_words(text).count()
    }

    fn sentence_count(&self, text: &str) -> usize {
        let sentences = text::split_sentences(text)
            .into_iter()
            .filter(|s| text::lexical_words(s).next().is_some())
            .count();
        if sentences == 0 && self.word_count(text) > 0 {
            1
        } else {
            sentences
        }
    }

    fn syllable_count(&self, text: &str) -> usize {
        text::lexical_words(text).map(count_syllables).sum()
    }
}

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Syllables in a single word: the known-word table first, then [`syllables`].
pub fn count_syllables(word: &str) -> usize {
    KNOWN_SYLLABLES
        .get(word.to_lowercase().as_str())
        .copied()
        .unwrap_or_else(|| syllables(word))
}

/// Estimate the syllables in a single word.
///
/// Counts vowel groups (`y` counts as a vowel after the first letter), then
/// drops a silent final `e` and the silent vowel in `-es`/`-ed` endings.
/// Words without letters (numbers) count as one syllable.
pub fn syllables(word: &str) -> usize {
    let word: Vec<char> = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if word.is_empty() {
        return 1;
    }

    let is_vowel = |i: usize| match word[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => true,
        'y' => i > 0,
        _ => false,
    };

    let mut count = 0;
    let mut in_group = false;
    for i in 0..word.len() {
        let vowel = is_vowel(i);
        if vowel && !in_group {
            count += 1;
        }
        in_group = vowel;
    }

    let n = word.len();
    if count > 1 && n >= 3 {
        let last = word[n - 1];
        let prev = word[n - 2];
        let before = word[n - 3];
        let consonant_before = !matches!(before, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        let silent = match (prev, last) {
            // "make", "note"; but "table", "little" keep their "-le" syllable.
            (p, 'e') if !matches!(p, 'a' | 'e' | 'i' | 'o' | 'u' | 'y') => {
                !(p == 'l' && consonant_before)
            }
            // "walked", "played"; but "wanted", "needed" sound the "-ed".
            ('e', 'd') => !matches!(before, 't' | 'd') && consonant_before,
            // "makes", "notes"; but "boxes", "wishes" sound the "-es".
            ('e', 's') => !matches!(before, 's' | 'x' | 'z' | 'c' | 'g' | 'h') && consonant_before,
            _ => false,
        };
        if silent {
            count -= 1;
        }
    }

    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllable_estimates() {
        for (word, expected) in [
            ("the", 1),
            ("cat", 1),
            ("make", 1),
            ("table", 2),
            ("little", 2),
            ("hello", 2),
            ("walked", 1),
            ("wanted", 2),
            ("notes", 1),
            ("boxes", 2),
            ("beautiful", 3),
            ("readability", 5),
            ("yellow", 2),
            ("rhythm", 1),
            ("documentation", 5),
            ("Component's", 3),
        ] {
            assert_eq!(syllables(word), expected, "{word}");
        }
    }

    #[test]
    fn known_words_override_the_estimate() {
        // The estimate gets these wrong.
        assert_eq!(syllables("area"), 2);
        assert_eq!(syllables("science"), 1);
        for (word, expected) in [
            ("area", 3),
            ("Science", 2),
            ("Idea", 3),
            ("accessibility", 6),
            ("everything", 3),
            ("police", 2),
        ] {
            assert_eq!(count_syllables(word), expected, "{word}");
        }
    }

    #[test]
    fn unknown_words_fall_back_to_the_estimate() {
        assert!(!KNOWN_SYLLABLES.contains_key("storybook"));
        assert_eq!(count_syllables("storybook"), syllables("storybook"));
        assert_eq!(count_syllables("Tooltips"), 2);
    }

    #[test]
    fn known_syllable_table_is_well_formed() {
        assert!(KNOWN_SYLLABLES.len() > 300, "{}", KNOWN_SYLLABLES.len());
        assert!(KNOWN_SYLLABLES.values().all(|n| (1..=6).contains(n)));
        assert!(KNOWN_SYLLABLES.keys().all(|w| *w == w.to_lowercase()));
        assert_eq!(KNOWN_SYLLABLES.get("the"), Some(&1));
        assert_eq!(KNOWN_SYLLABLES.get("documentation"), Some(&5));
    }

    #[test]
    fn numbers_are_one_syllable() {
        assert_eq!(syllables("2024"), 1);
    }

    #[test]
    fn counts_words_sentences_syllables() {
        let m = StandardMetrics;
        let text = "The cat sat on the mat. The dog ran fast.";
        assert_eq!(m.word_count(text), 10);
        assert_eq!(m.sentence_count(text), 2);
        assert_eq!(m.syllable_count(text), 10);
    }

    #[test]
    fn punctuation_only_tokens_are_not_words() {
        let m = StandardMetrics;
        assert_eq!(m.word_count("Wait - what ... ok"), 3);
    }

    #[test]
    fn unterminated_text_is_one_sentence() {
        assert_eq!(StandardMetrics.sentence_count("no punctuation here"), 1);
    }

    #[test]
    fn flesch_formulas() {
        let m = StandardMetrics;
        let text = "The cat sat on the mat. The dog ran fast.";
        // 10 words, 2 sentences, 10 syllables: ASL 5, ASW 1.
        assert!((m.flesch_kincaid_grade(text) - (-1.8)).abs() < 1e-9);
        assert!((m.flesch_reading_ease(text) - 117.16).abs() < 1e-9);
    }

    #[test]
    fn empty_text_scores_zero() {
        let m = StandardMetrics;
        assert_eq!(m.word_count(""), 0);
        assert_eq!(m.sentence_count(""), 0);
        assert!(m.flesch_kincaid_grade("").abs() < f64::EPSILON);
        assert!(m.flesch_reading_ease("").abs() < f64::EPSILON);
    }

    #[test]
    fn rounding() {
        assert!((round_to(5.46, 1) - 5.5).abs() < 1e-9);
        assert!((round_to(2.0 / 3.0, 2) - 0.67).abs() < 1e-9);
        assert!((round_to(-1.84, 1) - (-1.8)).abs() < 1e-9);
    }
}
