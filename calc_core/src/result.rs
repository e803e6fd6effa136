//! # Computation Results
//!
//! A [`ComputationResult`] is the tagged outcome of one compute call: either a
//! list of named [`Output`]s, or a failure with a human-readable reason.
//! Domain impossibilities (division by zero, even root of a negative, ...)
//! are failures here, never panics.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "status": "success",
//!   "outputs": [
//!     { "key": "discount_amount", "label": "Discount", "value": { "number": 50.0 },
//!       "hints": { "decimals": 2, "prefix": "$", "suffix": null } },
//!     { "key": "final_price", "label": "Final price", "value": { "number": 150.0 },
//!       "hints": { "decimals": 2, "prefix": "$", "suffix": null } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A typed output value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Number(f64),
    Integer(i64),
    /// Arbitrary-precision integer kept as its decimal digits
    BigInteger(String),
    Text(String),
    List(Vec<String>),
}

impl Value {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::BigInteger(s) => Some(s),
            _ => None,
        }
    }
}

/// Formatting hints attached to an output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatHints {
    /// Fixed number of decimal places; `None` trims trailing zeros
    pub decimals: Option<u8>,
    /// Written before the value (e.g. "$")
    pub prefix: Option<String>,
    /// Written after the value (e.g. "kg", "%")
    pub suffix: Option<String>,
}

impl FormatHints {
    pub fn decimals(decimals: u8) -> Self {
        FormatHints {
            decimals: Some(decimals),
            ..Default::default()
        }
    }

    pub fn money() -> Self {
        FormatHints {
            decimals: Some(2),
            prefix: Some("$".to_string()),
            suffix: None,
        }
    }

    pub fn percent(decimals: u8) -> Self {
        FormatHints {
            decimals: Some(decimals),
            prefix: None,
            suffix: Some("%".to_string()),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }
}

/// One named output of a computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// Stable machine name (e.g. "final_price")
    pub key: String,
    /// Display label (e.g. "Final price")
    pub label: String,
    pub value: Value,
    pub hints: FormatHints,
}

impl Output {
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: Value, hints: FormatHints) -> Self {
        Output {
            key: key.into(),
            label: label.into(),
            value,
            hints,
        }
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>, value: f64, hints: FormatHints) -> Self {
        Output::new(key, label, Value::Number(value), hints)
    }

    pub fn integer(key: impl Into<String>, label: impl Into<String>, value: i64) -> Self {
        Output::new(key, label, Value::Integer(value), FormatHints::default())
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Output::new(key, label, Value::Text(value.into()), FormatHints::default())
    }

    pub fn list(key: impl Into<String>, label: impl Into<String>, items: Vec<String>) -> Self {
        Output::new(key, label, Value::List(items), FormatHints::default())
    }
}

/// Tagged outcome of one compute invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComputationResult {
    Success { outputs: Vec<Output> },
    Failure { code: String, reason: String },
}

impl ComputationResult {
    pub fn success(outputs: Vec<Output>) -> Self {
        ComputationResult::Success { outputs }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        ComputationResult::Failure {
            code: "CALCULATION_FAILED".to_string(),
            reason: reason.into(),
        }
    }

    /// Convert a formula outcome into a result. Errors become failures
    /// carrying the error's code and message.
    pub fn from_outputs(outputs: CalcResult<Vec<Output>>) -> Self {
        match outputs {
            Ok(outputs) => ComputationResult::Success { outputs },
            Err(e) => ComputationResult::from_error(&e),
        }
    }

    pub fn from_error(error: &CalcError) -> Self {
        ComputationResult::Failure {
            code: error.error_code().to_string(),
            reason: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ComputationResult::Success { .. })
    }

    pub fn outputs(&self) -> &[Output] {
        match self {
            ComputationResult::Success { outputs } => outputs,
            ComputationResult::Failure { .. } => &[],
        }
    }

    /// Failure reason, if this is a failure.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ComputationResult::Success { .. } => None,
            ComputationResult::Failure { reason, .. } => Some(reason),
        }
    }

    pub fn output(&self, key: &str) -> Option<&Output> {
        self.outputs().iter().find(|o| o.key == key)
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.output(key).map(|o| &o.value)
    }

    /// Numeric output by key.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.value(key).and_then(Value::as_f64)
    }

    /// Text output by key.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(Value::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_key() {
        let result = ComputationResult::success(vec![
            Output::number("bmi", "BMI", 24.7, FormatHints::decimals(1)),
            Output::text("category", "Category", "Normal weight"),
        ]);
        assert!(result.is_success());
        assert_eq!(result.number("bmi"), Some(24.7));
        assert_eq!(result.text("category"), Some("Normal weight"));
        assert!(result.output("missing").is_none());
    }

    #[test]
    fn test_failure_from_error() {
        let err = CalcError::calculation_failed("modulo", "Divisor must not be zero");
        let result = ComputationResult::from_outputs(Err(err));
        assert!(!result.is_success());
        assert_eq!(result.reason(), Some("Divisor must not be zero"));
        assert!(result.outputs().is_empty());
        match result {
            ComputationResult::Failure { code, .. } => assert_eq!(code, "CALCULATION_FAILED"),
            _ => panic!("expected failure"),
        }
    }

    #[test]
    fn test_result_serialization() {
        let result = ComputationResult::success(vec![Output::integer("lcm", "LCM", 12)]);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("\"integer\":12"));
    }
}
