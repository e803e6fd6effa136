//! # Text Utilities
//!
//! Short string transformations: case styles, counts, readability,
//! reversal, line diffs and line sorting. Everything works on `char`s,
//! so multi-byte input is never split mid-codepoint.

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

use crate::errors::{CalcError, CalcResult};

/// Average adult silent reading speed.
pub const WORDS_PER_MINUTE: f64 = 200.0;

// =============================================================================
// CASE CONVERSION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStyle {
    Upper,
    Lower,
    Title,
    Sentence,
    Camel,
    Snake,
    Kebab,
}

impl CaseStyle {
    pub const KEYS: &'static [&'static str] = &["upper", "lower", "title", "sentence", "camel", "snake", "kebab"];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "upper" => Some(CaseStyle::Upper),
            "lower" => Some(CaseStyle::Lower),
            "title" => Some(CaseStyle::Title),
            "sentence" => Some(CaseStyle::Sentence),
            "camel" => Some(CaseStyle::Camel),
            "snake" => Some(CaseStyle::Snake),
            "kebab" => Some(CaseStyle::Kebab),
            _ => None,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Alphanumeric runs, lowercased. Used by the identifier styles.
fn identifier_words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn convert_case(text: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Upper => text.to_uppercase(),
        CaseStyle::Lower => text.to_lowercase(),
        CaseStyle::Title => text
            .split(' ')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" "),
        CaseStyle::Sentence => {
            // Capitalize the first letter after each sentence terminator
            let mut out = String::with_capacity(text.len());
            let mut at_start = true;
            for c in text.chars() {
                if at_start && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                    at_start = false;
                } else {
                    out.extend(c.to_lowercase());
                }
                if matches!(c, '.' | '!' | '?') {
                    at_start = true;
                }
            }
            out
        }
        CaseStyle::Camel => identifier_words(text)
            .iter()
            .enumerate()
            .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
            .collect(),
        CaseStyle::Snake => identifier_words(text).join("_"),
        CaseStyle::Kebab => identifier_words(text).join("-"),
    }
}

// =============================================================================
// COUNTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub reading_minutes: f64,
}

/// Sentences are runs of text ending in `.`, `!` or `?` (or end of input).
pub fn count_sentences(text: &str) -> usize {
    text.split(|c: char| matches!(c, '.' | '!' | '?'))
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count()
}

pub fn text_stats(text: &str) -> TextStats {
    let words = text.split_whitespace().count();
    TextStats {
        characters: text.chars().count(),
        characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
        words,
        sentences: count_sentences(text),
        paragraphs: text
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .count(),
        reading_minutes: words as f64 / WORDS_PER_MINUTE,
    }
}

// =============================================================================
// READABILITY
// =============================================================================

/// Vowel-group syllable estimate: trailing silent `e` dropped, minimum one.
///
/// ```rust
/// use calc_core::formulas::text::count_syllables;
/// assert_eq!(count_syllables("table"), 2);
/// assert_eq!(count_syllables("make"), 1);
/// assert_eq!(count_syllables("the"), 1);
/// ```
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut in_group = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !in_group {
            groups += 1;
        }
        in_group = vowel;
    }

    // "-le" after a consonant keeps its syllable ("table", "little")
    let n = letters.len();
    let silent_e = n > 2
        && letters[n - 1] == 'e'
        && !is_vowel(letters[n - 2])
        && !(letters[n - 2] == 'l' && !is_vowel(letters[n - 3]));
    if silent_e {
        groups -= 1;
    }
    groups.max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
    /// Flesch-Kincaid grade level, never below zero
    pub grade: f64,
    pub reading_ease: f64,
}

/// Flesch-Kincaid grade: 0.39·(words/sentences) + 11.8·(syllables/words) − 15.59.
pub fn readability(text: &str) -> CalcResult<Readability> {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().any(char::is_alphabetic))
        .collect();
    if words.is_empty() {
        return Err(CalcError::calculation_failed("readability", "Enter some text to analyze"));
    }

    let sentences = count_sentences(text).max(1);
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;
    let grade = 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59;

    Ok(Readability {
        words: words.len(),
        sentences,
        syllables,
        grade: grade.max(0.0),
        reading_ease: 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
    })
}

// =============================================================================
// REVERSAL
// =============================================================================

pub fn reverse_characters(text: &str) -> String {
    text.chars().rev().collect()
}

pub fn reverse_words(text: &str) -> String {
    text.split_whitespace().rev().collect::<Vec<_>>().join(" ")
}

// =============================================================================
// DIFF
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDiff {
    /// Unified-style lines prefixed with `+ `, `- ` or two spaces
    pub lines: Vec<String>,
    pub added: usize,
    pub removed: usize,
    /// 0.0 (nothing shared) to 1.0 (identical)
    pub similarity: f32,
}

pub fn diff_lines(original: &str, changed: &str) -> LineDiff {
    let diff = TextDiff::from_lines(original, changed);
    let mut lines = Vec::new();
    let mut added = 0;
    let mut removed = 0;

    for change in diff.iter_all_changes() {
        let prefix = match change.tag() {
            ChangeTag::Equal => "  ",
            ChangeTag::Delete => {
                removed += 1;
                "- "
            }
            ChangeTag::Insert => {
                added += 1;
                "+ "
            }
        };
        lines.push(format!("{}{}", prefix, change.value().trim_end_matches(&['\n', '\r'][..])));
    }

    LineDiff {
        lines,
        added,
        removed,
        similarity: diff.ratio(),
    }
}

// =============================================================================
// LINE SORTING
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
    Length,
    Reverse,
}

impl SortOrder {
    pub const KEYS: &'static [&'static str] = &["ascending", "descending", "length", "reverse"];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ascending" => Some(SortOrder::Ascending),
            "descending" => Some(SortOrder::Descending),
            "length" => Some(SortOrder::Length),
            "reverse" => Some(SortOrder::Reverse),
            _ => None,
        }
    }
}

/// Sort non-empty lines. Comparison ignores case; ties keep input order.
pub fn sort_lines(text: &str, order: SortOrder, dedupe: bool) -> Vec<String> {
    let mut lines: Vec<String> = text
        .lines()
        .map(|l| l.trim_end().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    if dedupe {
        let mut seen = std::collections::HashSet::new();
        lines.retain(|l| seen.insert(l.clone()));
    }

    match order {
        SortOrder::Ascending => lines.sort_by_key(|l| l.to_lowercase()),
        SortOrder::Descending => {
            lines.sort_by_key(|l| l.to_lowercase());
            lines.reverse();
        }
        SortOrder::Length => lines.sort_by_key(|l| l.chars().count()),
        SortOrder::Reverse => lines.reverse(),
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_styles() {
        let s = "hello big WORLD";
        assert_eq!(convert_case(s, CaseStyle::Upper), "HELLO BIG WORLD");
        assert_eq!(convert_case(s, CaseStyle::Title), "Hello Big World");
        assert_eq!(convert_case(s, CaseStyle::Camel), "helloBigWorld");
        assert_eq!(convert_case(s, CaseStyle::Snake), "hello_big_world");
        assert_eq!(convert_case(s, CaseStyle::Kebab), "hello-big-world");
        assert_eq!(
            convert_case("first one. SECOND one! third", CaseStyle::Sentence),
            "First one. Second one! Third"
        );
    }

    #[test]
    fn test_text_stats() {
        let stats = text_stats("One two three. Four five!\n\nSix.");
        assert_eq!(stats.words, 6);
        assert_eq!(stats.sentences, 3);
        assert_eq!(stats.paragraphs, 2);
        assert_eq!(stats.characters_no_spaces, 25);
        assert!((stats.reading_minutes - 0.03).abs() < 1e-9);

        let empty = text_stats("");
        assert_eq!((empty.words, empty.sentences, empty.paragraphs), (0, 0, 0));
    }

    #[test]
    fn test_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("water"), 2);
        assert_eq!(count_syllables("little"), 2);
        assert_eq!(count_syllables("Readability,"), 5);
        assert_eq!(count_syllables("rhythm"), 1);
    }

    #[test]
    fn test_readability_floor() {
        // Monosyllabic short sentences produce a negative raw grade
        let r = readability("The cat sat. The dog ran.").unwrap();
        assert_eq!(r.words, 6);
        assert_eq!(r.sentences, 2);
        assert_eq!(r.grade, 0.0);
        assert!(readability("   ").is_err());
    }

    #[test]
    fn test_readability_grade() {
        let r = readability("Comprehensive documentation facilitates understanding considerably.").unwrap();
        assert!(r.grade > 12.0, "grade = {}", r.grade);
    }

    #[test]
    fn test_reverse() {
        assert_eq!(reverse_characters("abc é"), "é cba");
        assert_eq!(reverse_words("one  two three"), "three two one");
    }

    #[test]
    fn test_diff_lines() {
        let d = diff_lines("a\nb\nc\n", "a\nx\nc\n");
        assert_eq!(d.added, 1);
        assert_eq!(d.removed, 1);
        assert!(d.lines.contains(&"- b".to_string()));
        assert!(d.lines.contains(&"+ x".to_string()));
        assert!(d.lines.contains(&"  a".to_string()));

        let same = diff_lines("a\nb\n", "a\nb\n");
        assert_eq!((same.added, same.removed), (0, 0));
        assert_eq!(same.similarity, 1.0);
    }

    #[test]
    fn test_sort_lines() {
        let text = "banana\nApple\n\ncherry\nbanana";
        assert_eq!(sort_lines(text, SortOrder::Ascending, false), vec!["Apple", "banana", "banana", "cherry"]);
        assert_eq!(sort_lines(text, SortOrder::Descending, true), vec!["cherry", "banana", "Apple"]);
        assert_eq!(sort_lines(text, SortOrder::Reverse, true), vec!["cherry", "Apple", "banana"]);
        assert_eq!(sort_lines("ccc\na\nbb", SortOrder::Length, false), vec!["a", "bb", "ccc"]);
    }
}
