//! Text tool calculators.

use crate::errors::CalcResult;
use crate::form::{ComputationRequest, FieldSpec};
use crate::formulas::text::{self, CaseStyle, SortOrder};
use crate::result::{FormatHints, Output};

use super::{choice_as, CalculatorDef, Category, Compute};

/// Characters accepted in a single text field.
pub const MAX_TEXT_LENGTH: usize = 100_000;

fn input(name: &str, label: &str) -> FieldSpec {
    FieldSpec::text(name, label).required().max_length(MAX_TEXT_LENGTH)
}

pub fn definitions() -> Vec<CalculatorDef> {
    vec![
        CalculatorDef::new(
            "case-converter",
            "Case Converter",
            Category::Text,
            "Rewrite text in another letter case or identifier style.",
            "upper, lower, Title, Sentence, camelCase, snake_case, kebab-case",
            vec![
                input("text", "Text"),
                FieldSpec::choice("style", "Style", CaseStyle::KEYS),
            ],
            Compute::Pure(case_converter),
        ),
        CalculatorDef::new(
            "word-counter",
            "Word Counter",
            Category::Text,
            "Counts of characters, words, sentences and paragraphs.",
            "words = whitespace-separated tokens; reading time = words / 200 per minute",
            vec![input("text", "Text")],
            Compute::Pure(word_counter),
        ),
        CalculatorDef::new(
            "readability",
            "Readability",
            Category::Text,
            "Flesch-Kincaid grade level and reading ease.",
            "grade = 0.39 × (words/sentences) + 11.8 × (syllables/words) − 15.59",
            vec![input("text", "Text")],
            Compute::Pure(readability),
        )
        .note("Grade is floored at 0")
        .note("Syllables are estimated from vowel groups, dropping a trailing silent e"),
        CalculatorDef::new(
            "text-reverse",
            "Reverse Text",
            Category::Text,
            "Reverse the characters or the word order of a text.",
            "characters: last to first; words: whitespace-separated tokens in reverse",
            vec![
                input("text", "Text"),
                FieldSpec::choice("mode", "Reverse", &["characters", "words"]),
            ],
            Compute::Pure(text_reverse),
        ),
        CalculatorDef::new(
            "text-diff",
            "Text Diff",
            Category::Text,
            "Line-by-line differences between two texts.",
            "longest common subsequence over lines; similarity = 2 × matches / total lines",
            vec![
                input("original", "Original"),
                FieldSpec::text("changed", "Changed").max_length(MAX_TEXT_LENGTH),
            ],
            Compute::Pure(text_diff),
        ),
        CalculatorDef::new(
            "line-sorter",
            "Line Sorter",
            Category::Text,
            "Sort lines alphabetically, by length, or reverse them.",
            "case-insensitive comparison; empty lines dropped",
            vec![
                input("text", "Lines"),
                FieldSpec::choice("order", "Order", SortOrder::KEYS),
                FieldSpec::flag("dedupe", "Remove duplicates", false),
            ],
            Compute::Pure(line_sorter),
        ),
    ]
}

fn case_converter(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let style = choice_as(request, "style", CaseStyle::from_key)?;
    Ok(vec![Output::text("result", "Result", text::convert_case(request.text("text")?, style))])
}

fn word_counter(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let stats = text::text_stats(request.text("text")?);
    Ok(vec![
        Output::integer("words", "Words", stats.words as i64),
        Output::integer("characters", "Characters", stats.characters as i64),
        Output::integer("characters_no_spaces", "Characters (no spaces)", stats.characters_no_spaces as i64),
        Output::integer("sentences", "Sentences", stats.sentences as i64),
        Output::integer("paragraphs", "Paragraphs", stats.paragraphs as i64),
        Output::number(
            "reading_time",
            "Reading time",
            stats.reading_minutes,
            FormatHints::decimals(1).with_suffix("min"),
        ),
    ])
}

fn readability(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let r = text::readability(request.text("text")?)?;
    Ok(vec![
        Output::number("grade", "Grade level", r.grade, FormatHints::decimals(1)),
        Output::number("reading_ease", "Reading ease", r.reading_ease, FormatHints::decimals(1)),
        Output::integer("words", "Words", r.words as i64),
        Output::integer("sentences", "Sentences", r.sentences as i64),
        Output::integer("syllables", "Syllables", r.syllables as i64),
    ])
}

fn text_reverse(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let input = request.text("text")?;
    let reversed = match request.choice("mode")? {
        "words" => text::reverse_words(input),
        _ => text::reverse_characters(input),
    };
    Ok(vec![Output::text("result", "Result", reversed)])
}

fn text_diff(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let diff = text::diff_lines(request.text("original")?, request.text_or_empty("changed"));
    Ok(vec![
        Output::text("diff", "Diff", diff.lines.join("\n")),
        Output::integer("added", "Lines added", diff.added as i64),
        Output::integer("removed", "Lines removed", diff.removed as i64),
        Output::number(
            "similarity",
            "Similarity",
            diff.similarity as f64 * 100.0,
            FormatHints::percent(1),
        ),
    ])
}

fn line_sorter(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let order = choice_as(request, "order", SortOrder::from_key)?;
    let lines = text::sort_lines(request.text("text")?, order, request.flag("dedupe"));
    let count = lines.len() as i64;
    Ok(vec![
        Output::text("lines", "Sorted", lines.join("\n")),
        Output::integer("count", "Lines", count),
    ])
}

#[cfg(test)]
mod tests {
    use crate::calculators::run_with;
    use crate::presenter::clipboard_text;

    #[test]
    fn test_case_converter() {
        let r = run_with("case-converter", &[("text", "Hello World"), ("style", "snake")]).unwrap();
        assert_eq!(r.text("result"), Some("hello_world"));
        assert_eq!(clipboard_text(&r).as_deref(), Some("hello_world"));
    }

    #[test]
    fn test_text_required() {
        let errors = run_with("word-counter", &[("text", "")]).unwrap_err();
        assert_eq!(errors[0].field, "text");
        assert_eq!(errors[0].message, "This field is required");
    }

    #[test]
    fn test_word_counter() {
        let r = run_with("word-counter", &[("text", "Two words.")]).unwrap();
        assert_eq!(r.number("words"), Some(2.0));
        assert_eq!(r.number("sentences"), Some(1.0));
    }

    #[test]
    fn test_readability_punctuation_only_fails() {
        let r = run_with("readability", &[("text", "... !!!")]).unwrap();
        assert!(!r.is_success());
    }

    #[test]
    fn test_reverse_words() {
        let r = run_with("text-reverse", &[("text", "one two three"), ("mode", "words")]).unwrap();
        assert_eq!(r.text("result"), Some("three two one"));
    }

    #[test]
    fn test_diff_against_empty() {
        let r = run_with("text-diff", &[("original", "a\nb")]).unwrap();
        assert_eq!(r.number("removed"), Some(2.0));
        assert_eq!(r.number("added"), Some(0.0));
        assert_eq!(r.number("similarity"), Some(0.0));
    }

    #[test]
    fn test_line_sorter() {
        let r = run_with("line-sorter", &[("text", "b\na\nb"), ("dedupe", "yes")]).unwrap();
        assert_eq!(r.text("lines"), Some("a\nb"));
        assert_eq!(r.number("count"), Some(2.0));
    }
}
