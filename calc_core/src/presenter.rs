//! # Result Presenter
//!
//! Turns a [`ComputationResult`] into text: display lines with rounding,
//! units and thousands separators, and a plain form for the clipboard.

use serde::{Deserialize, Serialize};

use crate::result::{ComputationResult, FormatHints, Output, Value};

/// Upper bound on decimals when a hint does not fix them.
const MAX_FREE_DECIMALS: usize = 10;

/// Presentation preferences (part of [`Settings`](crate::settings::Settings)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    /// Group integer digits with commas on display
    pub thousands_separator: bool,
    /// Decimal places for outputs whose hints leave them open
    pub default_decimals: Option<u8>,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        PresentationSettings {
            thousands_separator: true,
            default_decimals: None,
        }
    }
}

/// Format a number.
///
/// With `decimals` the value is rounded to exactly that many places.
/// Without, up to ten places are kept and trailing zeros trimmed.
///
/// ```rust
/// use calc_core::presenter::format_number;
///
/// assert_eq!(format_number(1234567.0, Some(2), true), "1,234,567.00");
/// assert_eq!(format_number(1.0 / 3.0, None, false), "0.3333333333");
/// assert_eq!(format_number(-2.50, None, true), "-2.5");
/// ```
pub fn format_number(value: f64, decimals: Option<u8>, separators: bool) -> String {
    let formatted = match decimals {
        Some(d) => format!("{:.*}", d as usize, value),
        None => {
            let s = format!("{:.*}", MAX_FREE_DECIMALS, value);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    };
    // "-0" and "-0.00" read badly
    let formatted = if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        formatted[1..].to_string()
    } else {
        formatted
    };
    if separators {
        group_thousands(&formatted)
    } else {
        formatted
    }
}

/// Insert commas into the integer part of an already-formatted number.
fn group_thousands(formatted: &str) -> String {
    let (sign, rest) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(pos) => rest.split_at(pos),
        None => (rest, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}{}", sign, grouped, frac_part)
}

fn decorate(body: String, hints: &FormatHints) -> String {
    let mut out = String::new();
    if let Some(prefix) = &hints.prefix {
        out.push_str(prefix);
    }
    out.push_str(&body);
    if let Some(suffix) = &hints.suffix {
        if suffix != "%" {
            out.push(' ');
        }
        out.push_str(suffix);
    }
    out
}

/// Display form of one output value.
pub fn format_value(output: &Output, settings: &PresentationSettings) -> String {
    let hints = &output.hints;
    match &output.value {
        Value::Number(n) => {
            let decimals = hints.decimals.or(settings.default_decimals);
            decorate(format_number(*n, decimals, settings.thousands_separator), hints)
        }
        Value::Integer(i) => decorate(format_number(*i as f64, Some(0), settings.thousands_separator), hints),
        Value::BigInteger(digits) => {
            let body = if settings.thousands_separator {
                group_thousands(digits)
            } else {
                digits.clone()
            };
            decorate(body, hints)
        }
        Value::Text(s) => decorate(s.clone(), hints),
        Value::List(items) => decorate(items.join(", "), hints),
    }
}

/// One line per output, or a single `Error: ...` line for a failure.
pub fn display_lines(result: &ComputationResult, settings: &PresentationSettings) -> Vec<String> {
    match result {
        ComputationResult::Success { outputs } => outputs
            .iter()
            .map(|o| {
                let value = format_value(o, settings);
                if value.contains('\n') {
                    format!("{}:\n{}", o.label, value)
                } else {
                    format!("{}: {}", o.label, value)
                }
            })
            .collect(),
        ComputationResult::Failure { reason, .. } => vec![format!("Error: {}", reason)],
    }
}

fn plain_value(output: &Output) -> String {
    match &output.value {
        Value::Number(n) => {
            let body = format_number(*n, output.hints.decimals, false);
            match &output.hints.suffix {
                Some(s) if s == "%" => format!("{}%", body),
                _ => body,
            }
        }
        Value::Integer(i) => i.to_string(),
        Value::BigInteger(digits) => digits.clone(),
        Value::Text(s) => s.clone(),
        Value::List(items) => items.join("\n"),
    }
}

/// Plain text for the clipboard, without separators or currency symbols.
///
/// A single output copies the bare value; several copy `label: value`
/// lines. Failures copy nothing.
pub fn clipboard_text(result: &ComputationResult) -> Option<String> {
    match result {
        ComputationResult::Success { outputs } => match outputs.as_slice() {
            [] => None,
            [only] => Some(plain_value(only)),
            many => Some(
                many.iter()
                    .map(|o| format!("{}: {}", o.label, plain_value(o)))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        },
        ComputationResult::Failure { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousand_separators() {
        assert_eq!(format_number(1_000_000.0, None, true), "1,000,000");
        assert_eq!(format_number(999.0, None, true), "999");
        assert_eq!(format_number(-1234.5, Some(2), true), "-1,234.50");
        assert_eq!(format_number(1234.5, Some(2), false), "1234.50");
    }

    #[test]
    fn test_negative_zero_is_plain_zero() {
        assert_eq!(format_number(-0.0001, Some(2), true), "0.00");
        assert_eq!(format_number(-0.0, None, true), "0");
    }

    #[test]
    fn test_display_lines_with_hints() {
        let result = ComputationResult::success(vec![
            Output::number("discount_amount", "Discount", 50.0, FormatHints::money()),
            Output::number("final_price", "Final price", 1500.0, FormatHints::money()),
            Output::number("bmr", "BMR", 1780.0, FormatHints::decimals(0).with_suffix("kcal/day")),
            Output::number("fat", "Body fat", 18.26, FormatHints::percent(1)),
        ]);
        let lines = display_lines(&result, &PresentationSettings::default());
        assert_eq!(lines[0], "Discount: $50.00");
        assert_eq!(lines[1], "Final price: $1,500.00");
        assert_eq!(lines[2], "BMR: 1,780 kcal/day");
        assert_eq!(lines[3], "Body fat: 18.3%");
    }

    #[test]
    fn test_big_integer_grouping() {
        let output = Output::new(
            "factorial",
            "n!",
            Value::BigInteger("3628800".to_string()),
            FormatHints::default(),
        );
        assert_eq!(format_value(&output, &PresentationSettings::default()), "3,628,800");
    }

    #[test]
    fn test_failure_display_and_clipboard() {
        let result = ComputationResult::failure("Cannot divide by zero");
        assert_eq!(
            display_lines(&result, &PresentationSettings::default()),
            vec!["Error: Cannot divide by zero".to_string()]
        );
        assert_eq!(clipboard_text(&result), None);
    }

    #[test]
    fn test_clipboard_text() {
        let single = ComputationResult::success(vec![Output::number(
            "total",
            "Total",
            1234.5,
            FormatHints::money(),
        )]);
        assert_eq!(clipboard_text(&single).as_deref(), Some("1234.50"));

        let several = ComputationResult::success(vec![
            Output::integer("remainder", "Remainder", 2),
            Output::integer("quotient", "Quotient", 3),
        ]);
        assert_eq!(
            clipboard_text(&several).as_deref(),
            Some("Remainder: 2\nQuotient: 3")
        );
    }
}
