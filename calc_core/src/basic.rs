//! # General-Purpose Calculator
//!
//! A key-driven four-function calculator with powers and remainders.
//! Operations chain left to right (`2 + 3 × 4 =` is 20), and every completed
//! binary operation lands in a [`History`].
//!
//! ```rust
//! use calc_core::basic::BasicCalculator;
//!
//! let mut calc = BasicCalculator::new();
//! calc.press_str("12+30=");
//! assert_eq!(calc.display(), "42");
//! assert_eq!(calc.history().latest().unwrap().expression, "12 + 30 = 42");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::history::{History, HistoryEntry};
use crate::presenter::format_number;

/// Digits accepted in one entry (sign and point excluded).
pub const MAX_ENTRY_DIGITS: usize = 16;

pub const ERROR_DISPLAY: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    /// Remainder of truncated division
    Remainder,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "−",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
            Operator::Power => "^",
            Operator::Remainder => "%",
        }
    }

    /// `None` when the operation has no finite answer.
    fn apply(&self, lhs: f64, rhs: f64) -> Option<f64> {
        let value = match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide | Operator::Remainder if rhs == 0.0 => return None,
            Operator::Divide => lhs / rhs,
            Operator::Remainder => lhs % rhs,
            Operator::Power => lhs.powf(rhs),
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Digit(u8),
    Point,
    Op(Operator),
    Equals,
    ToggleSign,
    Backspace,
    /// Clear the current entry, keep the pending operation
    ClearEntry,
    AllClear,
}

impl Key {
    /// Keyboard mapping: digits, `.`, `+ - * x / ^ %` (and `− × ÷`), `=`,
    /// `n` or `±` sign, `<` backspace, `c` clear entry, `a` all clear.
    pub fn from_char(c: char) -> Option<Key> {
        Some(match c {
            '0'..='9' => Key::Digit(c as u8 - b'0'),
            '.' | ',' => Key::Point,
            '+' => Key::Op(Operator::Add),
            '-' | '−' => Key::Op(Operator::Subtract),
            '*' | 'x' | '×' => Key::Op(Operator::Multiply),
            '/' | '÷' => Key::Op(Operator::Divide),
            '^' => Key::Op(Operator::Power),
            '%' => Key::Op(Operator::Remainder),
            '=' => Key::Equals,
            'n' | '±' => Key::ToggleSign,
            '<' => Key::Backspace,
            'c' => Key::ClearEntry,
            'a' => Key::AllClear,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BasicCalculator {
    entry: String,
    accumulator: Option<f64>,
    pending: Option<Operator>,
    /// The next digit replaces the entry instead of extending it
    fresh: bool,
    error: bool,
    history: History,
}

impl Default for BasicCalculator {
    fn default() -> Self {
        BasicCalculator::with_history(History::default())
    }
}

impl BasicCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: History) -> Self {
        BasicCalculator {
            entry: "0".to_string(),
            accumulator: None,
            pending: None,
            fresh: false,
            error: false,
            history,
        }
    }

    pub fn display(&self) -> &str {
        if self.error {
            ERROR_DISPLAY
        } else {
            &self.entry
        }
    }

    /// The left operand and operator waiting for a right operand, e.g. `"12 +"`.
    pub fn pending_expression(&self) -> Option<String> {
        match (self.accumulator, self.pending) {
            (Some(lhs), Some(op)) if !self.error => Some(format!("{} {}", fmt(lhs), op.symbol())),
            _ => None,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Feed every recognized character of `keys`; others are skipped.
    pub fn press_str(&mut self, keys: &str) {
        for key in keys.chars().filter_map(Key::from_char) {
            self.press(key);
        }
    }

    pub fn press(&mut self, key: Key) {
        if self.error {
            // Anything after an error starts over
            self.clear_all();
        }
        match key {
            Key::Digit(d) => self.push_digit(d),
            Key::Point => self.push_point(),
            Key::Op(op) => self.push_operator(op),
            Key::Equals => self.equals(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Backspace => self.backspace(),
            Key::ClearEntry => {
                self.entry = "0".to_string();
                self.fresh = false;
            }
            Key::AllClear => self.clear_all(),
        }
    }

    fn clear_all(&mut self) {
        self.entry = "0".to_string();
        self.accumulator = None;
        self.pending = None;
        self.fresh = false;
        self.error = false;
    }

    fn digit_count(&self) -> usize {
        self.entry.chars().filter(char::is_ascii_digit).count()
    }

    fn push_digit(&mut self, d: u8) {
        let digit = char::from(b'0' + d.min(9));
        if self.fresh {
            self.entry = digit.to_string();
            self.fresh = false;
        } else if self.entry == "0" {
            self.entry = digit.to_string();
        } else if self.entry == "-0" {
            self.entry = format!("-{}", digit);
        } else if self.digit_count() < MAX_ENTRY_DIGITS {
            self.entry.push(digit);
        }
    }

    fn push_point(&mut self) {
        if self.fresh {
            self.entry = "0.".to_string();
            self.fresh = false;
        } else if !self.entry.contains('.') {
            self.entry.push('.');
        }
    }

    fn value(&self) -> f64 {
        self.entry.parse().unwrap_or(0.0)
    }

    fn push_operator(&mut self, op: Operator) {
        if self.pending.is_some() && !self.fresh {
            if !self.evaluate() {
                return;
            }
        } else {
            self.accumulator = Some(self.value());
        }
        self.pending = Some(op);
        self.fresh = true;
    }

    fn equals(&mut self) {
        if self.pending.is_some() && self.evaluate() {
            self.pending = None;
            self.accumulator = None;
        }
        self.fresh = true;
    }

    /// Apply the pending operation to the entry. Returns false on error.
    fn evaluate(&mut self) -> bool {
        let (Some(lhs), Some(op)) = (self.accumulator, self.pending) else {
            return true;
        };
        let rhs = self.value();
        match op.apply(lhs, rhs) {
            Some(result) => {
                let expression = format!("{} {} {} = {}", fmt(lhs), op.symbol(), fmt(rhs), fmt(result));
                debug!(%expression, "basic calculation");
                self.history.push(HistoryEntry::new(expression));
                self.entry = fmt(result);
                self.accumulator = Some(result);
                true
            }
            None => {
                debug!(lhs, rhs, op = op.symbol(), "basic calculation has no finite result");
                self.error = true;
                self.accumulator = None;
                self.pending = None;
                false
            }
        }
    }

    fn toggle_sign(&mut self) {
        if let Some(stripped) = self.entry.strip_prefix('-') {
            self.entry = stripped.to_string();
        } else {
            self.entry.insert(0, '-');
        }
    }

    fn backspace(&mut self) {
        if self.fresh {
            return;
        }
        self.entry.pop();
        if self.entry.is_empty() || self.entry == "-" {
            self.entry = "0".to_string();
        }
    }
}

fn fmt(value: f64) -> String {
    format_number(value, None, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(keys: &str) -> BasicCalculator {
        let mut calc = BasicCalculator::new();
        calc.press_str(keys);
        calc
    }

    #[test]
    fn test_addition_records_history() {
        let calc = run("12+30=");
        assert_eq!(calc.display(), "42");
        let entries: Vec<_> = calc.history().entries().map(|e| e.expression.as_str()).collect();
        assert_eq!(entries, vec!["12 + 30 = 42"]);
    }

    #[test]
    fn test_chains_left_to_right() {
        let calc = run("2+3*4=");
        assert_eq!(calc.display(), "20");
        let entries: Vec<_> = calc.history().entries().map(|e| e.expression.as_str()).collect();
        assert_eq!(entries, vec!["5 × 4 = 20", "2 + 3 = 5"]);
    }

    #[test]
    fn test_operator_replaced_before_operand() {
        let calc = run("9+-4=");
        assert_eq!(calc.display(), "5");
        assert_eq!(calc.history().len(), 1);
    }

    #[test]
    fn test_divide_by_zero() {
        let mut calc = run("5/0=");
        assert_eq!(calc.display(), "Error");
        assert!(calc.history().is_empty());

        calc.press_str("7");
        assert_eq!(calc.display(), "7");
        assert!(!calc.is_error());
    }

    #[test]
    fn test_remainder_and_power() {
        assert_eq!(run("17%5=").display(), "2");
        assert_eq!(run("2^10=").display(), "1024");
        assert_eq!(run("5%0=").display(), "Error");
    }

    #[test]
    fn test_decimals() {
        assert_eq!(run("0.1+0.2=").display(), "0.3");
        assert_eq!(run("1..5").display(), "1.5");
        assert_eq!(run(".5").display(), "0.5");
    }

    #[test]
    fn test_sign_backspace_and_clear() {
        assert_eq!(run("12n").display(), "-12");
        assert_eq!(run("12nn").display(), "12");
        assert_eq!(run("123<").display(), "12");
        assert_eq!(run("1<<").display(), "0");

        let calc = run("8+5c2=");
        assert_eq!(calc.display(), "10");

        let calc = run("8+5a");
        assert_eq!(calc.display(), "0");
        assert!(calc.pending_expression().is_none());
    }

    #[test]
    fn test_pending_expression() {
        assert_eq!(run("12+").pending_expression().as_deref(), Some("12 +"));
    }

    #[test]
    fn test_entry_length_cap() {
        let calc = run("12345678901234567890");
        assert_eq!(calc.display().len(), MAX_ENTRY_DIGITS);
    }

    #[test]
    fn test_result_starts_new_entry() {
        let mut calc = run("2+2=");
        calc.press_str("5");
        assert_eq!(calc.display(), "5");
        calc.press_str("+1=");
        assert_eq!(calc.display(), "6");
        assert_eq!(calc.history().len(), 2);
    }
}
