//! Immutable snapshot of parsed field values handed to compute functions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::{CalcError, CalcResult};
use super::field::ParsedValue;

/// Parsed field values at the moment computation was triggered.
///
/// Fields that were optional and left empty are absent. Typed accessors
/// return [`CalcError::MissingField`] for absent fields and
/// [`CalcError::InvalidInput`] when the field has a different kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComputationRequest {
    values: BTreeMap<String, ParsedValue>,
}

impl ComputationRequest {
    pub(crate) fn from_values(values: BTreeMap<String, ParsedValue>) -> Self {
        ComputationRequest { values }
    }

    pub fn get(&self, name: &str) -> Option<&ParsedValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, name: &str) -> CalcResult<&ParsedValue> {
        self.values.get(name).ok_or_else(|| CalcError::missing_field(name))
    }

    pub fn number(&self, name: &str) -> CalcResult<f64> {
        match self.require(name)? {
            ParsedValue::Number(n) => Ok(*n),
            other => Err(wrong_kind(name, other, "a number")),
        }
    }

    pub fn opt_number(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ParsedValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// A number field declared with `integer()`.
    pub fn integer(&self, name: &str) -> CalcResult<i64> {
        let n = self.number(name)?;
        if n.fract() != 0.0 || n.abs() > i64::MAX as f64 {
            return Err(CalcError::invalid_input(name, n.to_string(), "Expected a whole number"));
        }
        Ok(n as i64)
    }

    pub fn text(&self, name: &str) -> CalcResult<&str> {
        match self.require(name)? {
            ParsedValue::Text(s) => Ok(s),
            other => Err(wrong_kind(name, other, "text")),
        }
    }

    /// Text field, with an absent optional field read as empty.
    pub fn text_or_empty(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(ParsedValue::Text(s)) => s,
            _ => "",
        }
    }

    pub fn choice(&self, name: &str) -> CalcResult<&str> {
        match self.require(name)? {
            ParsedValue::Choice(s) => Ok(s),
            other => Err(wrong_kind(name, other, "a choice")),
        }
    }

    /// Boolean field; absent reads as `false`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(ParsedValue::Flag(true)))
    }

    pub fn numbers(&self, name: &str) -> CalcResult<&[f64]> {
        match self.require(name)? {
            ParsedValue::Numbers(v) => Ok(v),
            other => Err(wrong_kind(name, other, "a list of numbers")),
        }
    }

    pub fn date(&self, name: &str) -> CalcResult<NaiveDate> {
        match self.require(name)? {
            ParsedValue::Date(d) => Ok(*d),
            other => Err(wrong_kind(name, other, "a date")),
        }
    }
}

fn wrong_kind(name: &str, value: &ParsedValue, expected: &str) -> CalcError {
    CalcError::invalid_input(name, format!("{:?}", value), format!("Expected {}", expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ComputationRequest {
        let mut values = BTreeMap::new();
        values.insert("n".to_string(), ParsedValue::Number(5.0));
        values.insert("x".to_string(), ParsedValue::Number(2.5));
        values.insert("mode".to_string(), ParsedValue::Choice("upper".to_string()));
        values.insert("on".to_string(), ParsedValue::Flag(true));
        ComputationRequest::from_values(values)
    }

    #[test]
    fn test_typed_accessors() {
        let req = request();
        assert_eq!(req.number("n").unwrap(), 5.0);
        assert_eq!(req.integer("n").unwrap(), 5);
        assert_eq!(req.choice("mode").unwrap(), "upper");
        assert!(req.flag("on"));
        assert!(!req.flag("absent"));
        assert_eq!(req.text_or_empty("absent"), "");
        assert_eq!(req.opt_number("absent"), None);
    }

    #[test]
    fn test_accessor_errors() {
        let req = request();
        assert_eq!(req.number("missing").unwrap_err().error_code(), "MISSING_FIELD");
        assert_eq!(req.text("n").unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(req.integer("x").unwrap_err().error_code(), "INVALID_INPUT");
    }
}
