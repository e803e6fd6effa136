//! # Formulas
//!
//! Pure functions behind every calculator. Each takes typed arguments and
//! returns [`CalcResult`](crate::errors::CalcResult); a domain impossibility
//! is an `Err(CalcError::CalculationFailed)`, never a panic.
//!
//! Keeping formulas apart from the form harness means they can be tested
//! without any input handling. The registry in
//! [`calculators`](crate::calculators) adapts them to form fields.
//!
//! ## Modules
//!
//! - [`arithmetic`] - GCD/LCM, factorial, median, mean, modulo, roots, logs, trig
//! - [`finance`] - discounts, tips, tax, interest, loans, margins
//! - [`health`] - BMI, BMR, TDEE, body fat, one-rep max, pace, age
//! - [`text`] - case transforms, counts, readability, reversal, diff, line sorting
//! - [`random`] - passwords, numbers, colors, names, lorem ipsum, picks, dice, coins

pub mod arithmetic;
pub mod finance;
pub mod health;
pub mod random;
pub mod text;

/// Round to `places` decimal places (half away from zero).
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
