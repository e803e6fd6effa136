//! Field declarations and per-field parsing.
//!
//! A [`FieldSpec`] is declared once at page setup. Raw user text is kept
//! verbatim by the form and only turned into a [`ParsedValue`] when the form
//! validates or snapshots itself.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Input kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Number,
    Text,
    /// One of a fixed set of tags
    Enum,
    Boolean,
    /// Comma/space/semicolon separated decimals
    NumberList,
    /// Calendar date, `YYYY-MM-DD`
    Date,
}

impl FieldKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::Text => "text",
            FieldKind::Enum => "choice",
            FieldKind::Boolean => "yes/no",
            FieldKind::NumberList => "list of numbers",
            FieldKind::Date => "date",
        }
    }
}

/// Domain constraints checked by the validator.
///
/// `min`, `max`, `step` and `nonzero` apply to each element of a number list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConstraints {
    pub required: bool,
    /// Inclusive lower bound
    pub min: Option<f64>,
    /// Inclusive upper bound
    pub max: Option<f64>,
    /// Value must be a multiple of `step`, counted from `min` (or zero)
    pub step: Option<f64>,
    pub nonzero: bool,
    pub allowed_values: Vec<String>,
    pub min_items: Option<usize>,
    /// Character limit for text fields
    pub max_length: Option<usize>,
}

/// A parsed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsedValue {
    Number(f64),
    Text(String),
    Choice(String),
    Flag(bool),
    Numbers(Vec<f64>),
    Date(NaiveDate),
}

/// Declaration of one form input.
///
/// ```rust
/// use calc_core::form::FieldSpec;
///
/// let reps = FieldSpec::number("reps", "Repetitions")
///     .required()
///     .range(2.0, 36.0)
///     .integer()
///     .default_value("5");
///
/// assert!(reps.parse("5").is_ok());
/// assert!(reps.parse("1").is_err());
/// assert!(reps.parse("2.5").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub constraints: FieldConstraints,
    /// Raw value restored on reset
    pub default: String,
    /// Date field starts out as the local date at registration and reset,
    /// in place of `default`
    #[serde(default)]
    pub today_by_default: bool,
    pub help: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        FieldSpec {
            name: name.into(),
            label: label.into(),
            kind,
            constraints: FieldConstraints::default(),
            default: String::new(),
            today_by_default: false,
            help: None,
        }
    }

    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        FieldSpec::new(name, label, FieldKind::Number)
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        FieldSpec::new(name, label, FieldKind::Text)
    }

    /// Enum field. The first allowed value becomes the default.
    pub fn choice(name: impl Into<String>, label: impl Into<String>, values: &[&str]) -> Self {
        let mut spec = FieldSpec::new(name, label, FieldKind::Enum);
        spec.constraints.allowed_values = values.iter().map(|v| v.to_string()).collect();
        spec.constraints.required = true;
        spec.default = values.first().map(|v| v.to_string()).unwrap_or_default();
        spec
    }

    pub fn flag(name: impl Into<String>, label: impl Into<String>, default: bool) -> Self {
        let mut spec = FieldSpec::new(name, label, FieldKind::Boolean);
        spec.default = default.to_string();
        spec
    }

    pub fn numbers(name: impl Into<String>, label: impl Into<String>) -> Self {
        FieldSpec::new(name, label, FieldKind::NumberList)
    }

    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        FieldSpec::new(name, label, FieldKind::Date)
    }

    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    pub fn step(mut self, step: f64) -> Self {
        self.constraints.step = Some(step);
        self
    }

    /// Shorthand for `step(1.0)`.
    pub fn integer(self) -> Self {
        self.step(1.0)
    }

    pub fn nonzero(mut self) -> Self {
        self.constraints.nonzero = true;
        self
    }

    pub fn min_items(mut self, n: usize) -> Self {
        self.constraints.min_items = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.constraints.max_length = Some(n);
        self
    }

    pub fn default_value(mut self, raw: impl Into<String>) -> Self {
        self.default = raw.into();
        self
    }

    pub fn today_by_default(mut self) -> Self {
        self.today_by_default = true;
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Raw value the form starts from and returns to on reset.
    pub fn initial_raw(&self) -> String {
        if self.today_by_default {
            Local::now().date_naive().format("%Y-%m-%d").to_string()
        } else {
            self.default.clone()
        }
    }

    /// Default as shown in listings, `None` when the field starts empty.
    pub fn default_label(&self) -> Option<&str> {
        if self.today_by_default {
            Some("today")
        } else if self.default.is_empty() {
            None
        } else {
            Some(&self.default)
        }
    }

    /// Parse a raw value and check every constraint.
    ///
    /// `Ok(None)` means the field is optional and was left empty.
    /// `Err` carries the message to show next to the input.
    pub fn parse(&self, raw: &str) -> Result<Option<ParsedValue>, String> {
        let trimmed = raw.trim();
        let c = &self.constraints;

        // Booleans always have a value; an empty toggle is off.
        if self.kind == FieldKind::Boolean {
            return parse_flag(trimmed).map(|b| Some(ParsedValue::Flag(b)));
        }

        if trimmed.is_empty() {
            return if c.required {
                Err("This field is required".to_string())
            } else {
                Ok(None)
            };
        }

        let value = match self.kind {
            FieldKind::Number => {
                let n = parse_number(trimmed).ok_or_else(|| "Enter a valid number".to_string())?;
                check_number(n, c, "")?;
                ParsedValue::Number(n)
            }
            FieldKind::NumberList => {
                let mut numbers = Vec::new();
                for token in trimmed
                    .split(|ch: char| ch == ',' || ch == ';' || ch.is_whitespace())
                    .filter(|t| !t.is_empty())
                {
                    let n = parse_number(token)
                        .ok_or_else(|| format!("'{}' is not a valid number", token))?;
                    check_number(n, c, "Each number ")?;
                    numbers.push(n);
                }
                if let Some(min_items) = c.min_items {
                    if numbers.len() < min_items {
                        return Err(format!("Enter at least {} numbers", min_items));
                    }
                }
                ParsedValue::Numbers(numbers)
            }
            FieldKind::Text => {
                if let Some(limit) = c.max_length {
                    if raw.chars().count() > limit {
                        return Err(format!("Must be at most {} characters", limit));
                    }
                }
                // Text keeps its inner formatting; only the emptiness check trims.
                ParsedValue::Text(raw.to_string())
            }
            FieldKind::Enum => {
                if !c.allowed_values.iter().any(|v| v == trimmed) {
                    return Err(format!("Choose one of: {}", c.allowed_values.join(", ")));
                }
                ParsedValue::Choice(trimmed.to_string())
            }
            FieldKind::Date => {
                let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .map_err(|_| "Enter a date as YYYY-MM-DD".to_string())?;
                ParsedValue::Date(date)
            }
            FieldKind::Boolean => ParsedValue::Flag(parse_flag(trimmed)?),
        };

        Ok(Some(value))
    }

    /// Human-readable summary of the constraints, for help screens.
    pub fn describe_constraints(&self) -> String {
        let c = &self.constraints;
        let mut parts = Vec::new();
        if c.required {
            parts.push("required".to_string());
        }
        match (c.min, c.max) {
            (Some(min), Some(max)) => parts.push(format!("{} to {}", min, max)),
            (Some(min), None) => parts.push(format!(">= {}", min)),
            (None, Some(max)) => parts.push(format!("<= {}", max)),
            (None, None) => {}
        }
        if let Some(step) = c.step {
            if step == 1.0 {
                parts.push("whole number".to_string());
            } else {
                parts.push(format!("step {}", step));
            }
        }
        if c.nonzero {
            parts.push("not zero".to_string());
        }
        if !c.allowed_values.is_empty() {
            parts.push(format!("one of {}", c.allowed_values.join("|")));
        }
        if let Some(n) = c.min_items {
            parts.push(format!("at least {} values", n));
        }
        if let Some(n) = c.max_length {
            parts.push(format!("max {} chars", n));
        }
        parts.join(", ")
    }
}

/// Standard decimal parsing; NaN and infinities are rejected.
fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_flag(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" | "off" => Ok(false),
        "true" | "1" | "yes" | "on" => Ok(true),
        _ => Err("Enter yes or no".to_string()),
    }
}

fn check_number(n: f64, c: &FieldConstraints, subject: &str) -> Result<(), String> {
    let lead = |rest: String| {
        if subject.is_empty() {
            format!("Must {}", rest)
        } else {
            format!("{}must {}", subject, rest)
        }
    };

    if let Some(min) = c.min {
        if n < min {
            return Err(lead(format!("be at least {}", min)));
        }
    }
    if let Some(max) = c.max {
        if n > max {
            return Err(lead(format!("be at most {}", max)));
        }
    }
    if let Some(step) = c.step {
        if step > 0.0 && !is_multiple_of_step(n, c.min.unwrap_or(0.0), step) {
            return Err(if step == 1.0 {
                lead("be a whole number".to_string())
            } else {
                lead(format!("be a multiple of {}", step))
            });
        }
    }
    if c.nonzero && n == 0.0 {
        return Err(lead("not be zero".to_string()));
    }
    Ok(())
}

/// Absolute slack for fractional steps such as `0.1`.
const STEP_TOLERANCE: f64 = 1e-9;

/// Whole steps from a whole base are checked exactly.
fn is_multiple_of_step(n: f64, base: f64, step: f64) -> bool {
    let offset = n - base;
    if step.fract() == 0.0 && base.fract() == 0.0 {
        return offset.fract() == 0.0 && offset % step == 0.0;
    }
    let nearest = (offset / step).round() * step;
    (offset - nearest).abs() <= STEP_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_parsing() {
        let spec = FieldSpec::number("price", "Price").required().min(0.0);
        assert_eq!(spec.parse(" 19.5 "), Ok(Some(ParsedValue::Number(19.5))));
        assert_eq!(spec.parse("abc"), Err("Enter a valid number".to_string()));
        assert_eq!(spec.parse("NaN"), Err("Enter a valid number".to_string()));
        assert_eq!(spec.parse("inf"), Err("Enter a valid number".to_string()));
        assert_eq!(spec.parse("-1"), Err("Must be at least 0".to_string()));
        assert_eq!(spec.parse(""), Err("This field is required".to_string()));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let spec = FieldSpec::number("pct", "Percent").range(0.0, 100.0);
        assert!(spec.parse("0").is_ok());
        assert!(spec.parse("100").is_ok());
        assert_eq!(spec.parse("100.01"), Err("Must be at most 100".to_string()));
    }

    #[test]
    fn test_optional_empty_is_absent() {
        let spec = FieldSpec::number("hip", "Hip").min(0.0);
        assert_eq!(spec.parse("   "), Ok(None));
        // Non-empty garbage still fails even when optional
        assert!(spec.parse("x").is_err());
    }

    #[test]
    fn test_step_and_nonzero() {
        let n = FieldSpec::number("n", "n").range(0.0, 170.0).integer();
        assert!(n.parse("170").is_ok());
        assert_eq!(n.parse("3.5"), Err("Must be a whole number".to_string()));

        let quarter = FieldSpec::number("q", "q").min(1.0).step(0.25);
        assert!(quarter.parse("1.75").is_ok());
        assert!(quarter.parse("1.8").is_err());
        assert!(quarter.parse("1.7500001").is_err());

        let divisor = FieldSpec::number("divisor", "Divisor").nonzero();
        assert_eq!(divisor.parse("0"), Err("Must not be zero".to_string()));
        assert!(divisor.parse("-2").is_ok());
    }

    #[test]
    fn test_whole_number_step_is_exact() {
        let n = FieldSpec::number("n", "n").range(0.0, 170.0).integer();
        assert_eq!(n.parse("150.0000001"), Err("Must be a whole number".to_string()));
        assert_eq!(n.parse("149.9999999999"), Err("Must be a whole number".to_string()));
        assert_eq!(n.parse("150"), Ok(Some(ParsedValue::Number(150.0))));

        let even = FieldSpec::number("e", "e").step(2.0);
        assert!(even.parse("1000000").is_ok());
        assert!(even.parse("1000001").is_err());

        let tenths = FieldSpec::number("t", "t").step(0.1);
        assert!(tenths.parse("0.3").is_ok());
        assert!(tenths.parse("12.7").is_ok());
        assert!(tenths.parse("0.35").is_err());
    }

    #[test]
    fn test_number_list() {
        let spec = FieldSpec::numbers("values", "Values").required().min(1.0).integer().min_items(2);
        assert_eq!(
            spec.parse("4, 6 ;8"),
            Ok(Some(ParsedValue::Numbers(vec![4.0, 6.0, 8.0])))
        );
        assert_eq!(spec.parse("4"), Err("Enter at least 2 numbers".to_string()));
        assert_eq!(spec.parse("4, x"), Err("'x' is not a valid number".to_string()));
        assert_eq!(spec.parse("4, 0"), Err("Each number must be at least 1".to_string()));
        assert_eq!(spec.parse("4, 2.5"), Err("Each number must be a whole number".to_string()));
    }

    #[test]
    fn test_enum_and_flag() {
        let sex = FieldSpec::choice("sex", "Sex", &["male", "female"]);
        assert_eq!(sex.default, "male");
        assert_eq!(sex.parse("female"), Ok(Some(ParsedValue::Choice("female".to_string()))));
        assert_eq!(sex.parse("other"), Err("Choose one of: male, female".to_string()));

        let flag = FieldSpec::flag("symbols", "Symbols", true);
        assert_eq!(flag.default, "true");
        assert_eq!(flag.parse("YES"), Ok(Some(ParsedValue::Flag(true))));
        assert_eq!(flag.parse(""), Ok(Some(ParsedValue::Flag(false))));
        assert!(flag.parse("maybe").is_err());
    }

    #[test]
    fn test_text_and_date() {
        let text = FieldSpec::text("text", "Text").required().max_length(5);
        assert_eq!(text.parse("  hi "), Ok(Some(ParsedValue::Text("  hi ".to_string()))));
        assert!(text.parse("toolong").is_err());

        let date = FieldSpec::date("born", "Born").required();
        assert_eq!(
            date.parse("1990-02-28"),
            Ok(Some(ParsedValue::Date(NaiveDate::from_ymd_opt(1990, 2, 28).unwrap())))
        );
        assert!(date.parse("1990-02-30").is_err());
    }

    #[test]
    fn test_today_by_default() {
        let on = FieldSpec::date("on", "As of").required().today_by_default();
        let today = Local::now().date_naive();
        match on.parse(&on.initial_raw()) {
            Ok(Some(ParsedValue::Date(d))) => assert!((d - today).num_days().abs() <= 1),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(on.default_label(), Some("today"));

        let born = FieldSpec::date("born", "Born").default_value("1990-01-01");
        assert_eq!(born.initial_raw(), "1990-01-01");
        assert_eq!(born.default_label(), Some("1990-01-01"));
        assert_eq!(FieldSpec::date("d", "d").default_label(), None);
    }

    #[test]
    fn test_describe_constraints() {
        let spec = FieldSpec::number("n", "n").required().range(0.0, 170.0).integer();
        assert_eq!(spec.describe_constraints(), "required, 0 to 170, whole number");
    }
}
