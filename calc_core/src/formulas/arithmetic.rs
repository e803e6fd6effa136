//! # Arithmetic Formulas
//!
//! Number theory, descriptive statistics and elementary functions.
//!
//! ## Notation
//!
//! - `a`, `b` = positive integers
//! - `n` = non-negative integer or root degree
//! - `x` = real operand

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Largest n whose factorial the factorial calculator accepts.
pub const MAX_FACTORIAL_N: u32 = 170;

// =============================================================================
// NUMBER THEORY
// =============================================================================

/// Greatest common divisor by iterative Euclidean remainder.
///
/// ```rust
/// use calc_core::formulas::arithmetic::gcd;
/// assert_eq!(gcd(12, 18), 6);
/// assert_eq!(gcd(7, 0), 7);
/// ```
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple: LCM(a, b) = |a×b| / GCD(a, b).
///
/// The product is formed in 128 bits; a result that does not fit in 64
/// bits is a failure.
pub fn lcm(a: u64, b: u64) -> CalcResult<u64> {
    if a == 0 || b == 0 {
        return Err(CalcError::calculation_failed("lcm", "LCM is only defined for positive integers"));
    }
    let product = a as u128 * b as u128;
    let l = product / gcd(a, b) as u128;
    u64::try_from(l).map_err(|_| CalcError::calculation_failed("lcm", "Result is too large"))
}

/// LCM of a list, folded left.
pub fn lcm_all(values: &[u64]) -> CalcResult<u64> {
    let (first, rest) = values
        .split_first()
        .ok_or_else(|| CalcError::calculation_failed("lcm", "Enter at least one number"))?;
    rest.iter().try_fold(*first, |acc, &v| lcm(acc, v))
}

/// GCD of a list, folded left.
pub fn gcd_all(values: &[u64]) -> CalcResult<u64> {
    let (first, rest) = values
        .split_first()
        .ok_or_else(|| CalcError::calculation_failed("gcd", "Enter at least one number"))?;
    Ok(rest.iter().fold(*first, |acc, &v| gcd(acc, v)))
}

/// n! by arbitrary-precision accumulation, for 0 ≤ n ≤ 170.
///
/// ```rust
/// use calc_core::formulas::arithmetic::factorial;
/// assert_eq!(factorial(10).unwrap().to_string(), "3628800");
/// assert!(factorial(171).is_err());
/// ```
pub fn factorial(n: u32) -> CalcResult<BigUint> {
    if n > MAX_FACTORIAL_N {
        return Err(CalcError::invalid_input(
            "n",
            n.to_string(),
            format!("Must be at most {}", MAX_FACTORIAL_N),
        ));
    }
    let mut acc = BigUint::from(1u32);
    for i in 2..=n {
        acc *= BigUint::from(i);
    }
    Ok(acc)
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Median: sort ascending; odd count takes the middle element, even count
/// the mean of the two central elements.
pub fn median(values: &[f64]) -> CalcResult<f64> {
    if values.is_empty() {
        return Err(CalcError::calculation_failed("median", "Enter at least one number"));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

pub fn mean(values: &[f64]) -> CalcResult<f64> {
    if values.is_empty() {
        return Err(CalcError::calculation_failed("mean", "Enter at least one number"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation. `sample` divides by n-1 and needs two values.
pub fn standard_deviation(values: &[f64], sample: bool) -> CalcResult<f64> {
    let m = mean(values)?;
    let n = values.len();
    let divisor = if sample {
        if n < 2 {
            return Err(CalcError::calculation_failed(
                "standard deviation",
                "A sample needs at least two numbers",
            ));
        }
        (n - 1) as f64
    } else {
        n as f64
    };
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Ok((ss / divisor).sqrt())
}

// =============================================================================
// DIVISION, POWERS, ROOTS, LOGARITHMS
// =============================================================================

/// Truncating division: returns (remainder, quotient).
///
/// The remainder takes the sign of the dividend.
pub fn modulo(dividend: f64, divisor: f64) -> CalcResult<(f64, f64)> {
    if divisor == 0.0 {
        return Err(CalcError::calculation_failed("modulo", "Cannot divide by zero"));
    }
    Ok((dividend % divisor, (dividend / divisor).trunc()))
}

fn finite(value: f64, calculation: &str) -> CalcResult<f64> {
    if value.is_nan() {
        Err(CalcError::calculation_failed(calculation, "The result is not a real number"))
    } else if value.is_infinite() {
        Err(CalcError::calculation_failed(calculation, "The result is too large"))
    } else {
        Ok(value)
    }
}

pub fn power(base: f64, exponent: f64) -> CalcResult<f64> {
    if base == 0.0 && exponent < 0.0 {
        return Err(CalcError::calculation_failed("power", "Zero has no negative powers"));
    }
    finite(base.powf(exponent), "power")
}

/// n-th root of x.
///
/// Negative radicands have a real root only for odd integer degrees.
pub fn root(x: f64, n: f64) -> CalcResult<f64> {
    if n == 0.0 {
        return Err(CalcError::calculation_failed("root", "Root degree must not be zero"));
    }
    if x < 0.0 {
        let is_int = n.fract() == 0.0;
        if is_int && (n as i64) % 2 != 0 {
            return finite(-(-x).powf(1.0 / n), "root");
        }
        return Err(CalcError::calculation_failed(
            "root",
            "Even root of a negative number is not a real number",
        ));
    }
    finite(x.powf(1.0 / n), "root")
}

pub fn logarithm(x: f64, base: f64) -> CalcResult<f64> {
    if x <= 0.0 {
        return Err(CalcError::calculation_failed("logarithm", "Logarithm is only defined for positive numbers"));
    }
    if base <= 0.0 || base == 1.0 {
        return Err(CalcError::calculation_failed("logarithm", "Base must be positive and not 1"));
    }
    finite(x.ln() / base.ln(), "logarithm")
}

/// `percent`% of `value`.
pub fn percentage_of(percent: f64, value: f64) -> f64 {
    percent / 100.0 * value
}

/// Relative change from `from` to `to`, in percent.
pub fn percent_change(from: f64, to: f64) -> CalcResult<f64> {
    if from == 0.0 {
        return Err(CalcError::calculation_failed(
            "percent change",
            "Change from zero is undefined",
        ));
    }
    Ok((to - from) / from.abs() * 100.0)
}

// =============================================================================
// TRIGONOMETRY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

impl TrigFunction {
    pub const KEYS: &'static [&'static str] = &["sin", "cos", "tan", "asin", "acos", "atan"];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "sin" => Some(TrigFunction::Sin),
            "cos" => Some(TrigFunction::Cos),
            "tan" => Some(TrigFunction::Tan),
            "asin" => Some(TrigFunction::Asin),
            "acos" => Some(TrigFunction::Acos),
            "atan" => Some(TrigFunction::Atan),
            _ => None,
        }
    }

    pub fn is_inverse(&self) -> bool {
        matches!(self, TrigFunction::Asin | TrigFunction::Acos | TrigFunction::Atan)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl AngleUnit {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "degrees" => Some(AngleUnit::Degrees),
            "radians" => Some(AngleUnit::Radians),
            _ => None,
        }
    }
}

/// Evaluate a trig function. Forward functions read `x` as an angle in
/// `unit`; inverse functions return an angle in `unit`.
pub fn trig(function: TrigFunction, x: f64, unit: AngleUnit) -> CalcResult<f64> {
    let to_rad = |a: f64| match unit {
        AngleUnit::Degrees => a.to_radians(),
        AngleUnit::Radians => a,
    };
    let from_rad = |r: f64| match unit {
        AngleUnit::Degrees => r.to_degrees(),
        AngleUnit::Radians => r,
    };

    let value = match function {
        TrigFunction::Sin => to_rad(x).sin(),
        TrigFunction::Cos => to_rad(x).cos(),
        TrigFunction::Tan => {
            let r = to_rad(x);
            if r.cos().abs() < 1e-12 {
                return Err(CalcError::calculation_failed("tan", "Tangent is undefined at this angle"));
            }
            r.tan()
        }
        TrigFunction::Asin | TrigFunction::Acos => {
            if !(-1.0..=1.0).contains(&x) {
                return Err(CalcError::calculation_failed(
                    "inverse trig",
                    "Input must be between -1 and 1",
                ));
            }
            if function == TrigFunction::Asin {
                from_rad(x.asin())
            } else {
                from_rad(x.acos())
            }
        }
        TrigFunction::Atan => from_rad(x.atan()),
    };
    finite(value, "trigonometry")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcm_scenarios() {
        assert_eq!(lcm_all(&[4, 6]).unwrap(), 12);
        assert_eq!(lcm_all(&[3, 5, 7]).unwrap(), 105);
        assert_eq!(gcd_all(&[12, 18, 30]).unwrap(), 6);
    }

    #[test]
    fn test_lcm_gcd_identity() {
        for a in 1..=60u64 {
            for b in 1..=60u64 {
                let l = lcm(a, b).unwrap();
                assert_eq!(l * gcd(a, b), a * b, "a={} b={}", a, b);
                assert!(l >= a.max(b));
            }
        }
    }

    #[test]
    fn test_lcm_overflow_is_failure() {
        let big = u64::MAX - 1;
        assert!(lcm(big, big - 1).is_err());
    }

    #[test]
    fn test_factorial_recurrence() {
        assert_eq!(factorial(0).unwrap(), BigUint::from(1u32));
        let mut prev = factorial(0).unwrap();
        let mut prev_digits = prev.to_string().len();
        for n in 1..=MAX_FACTORIAL_N {
            let f = factorial(n).unwrap();
            assert_eq!(f, &prev * BigUint::from(n));
            let digits = f.to_string().len();
            assert!(digits >= prev_digits);
            prev = f;
            prev_digits = digits;
        }
        // 170! has 307 digits
        assert_eq!(prev_digits, 307);
    }

    #[test]
    fn test_median_scenarios() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
        assert_eq!(median(&[1.0, 3.0, 5.0]).unwrap(), 3.0);
        assert!(median(&[]).is_err());
    }

    #[test]
    fn test_median_permutation_invariant() {
        let base = [7.0, -2.0, 3.5, 10.0, 0.0, 3.5];
        let expected = median(&base).unwrap();
        let mut rotated = base.to_vec();
        for _ in 0..base.len() {
            rotated.rotate_left(1);
            assert_eq!(median(&rotated).unwrap(), expected);
        }
        let mut reversed = base.to_vec();
        reversed.reverse();
        assert_eq!(median(&reversed).unwrap(), expected);
        assert!(expected >= -2.0 && expected <= 10.0);
    }

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values).unwrap(), 5.0);
        assert_eq!(standard_deviation(&values, false).unwrap(), 2.0);
        assert!(standard_deviation(&[1.0], true).is_err());
    }

    #[test]
    fn test_modulo_scenario() {
        assert_eq!(modulo(17.0, 5.0).unwrap(), (2.0, 3.0));
        assert_eq!(modulo(-17.0, 5.0).unwrap(), (-2.0, -3.0));
        assert!(modulo(1.0, 0.0).is_err());
    }

    #[test]
    fn test_root_of_power_roundtrip() {
        for n in 1..=8 {
            for i in 0..50 {
                let x = i as f64 * 0.731;
                let p = power(x, n as f64).unwrap();
                let r = root(p, n as f64).unwrap();
                assert!((r - x).abs() <= 1e-9 * x.max(1.0), "x={} n={}", x, n);
            }
        }
    }

    #[test]
    fn test_root_domain() {
        assert!((root(-27.0, 3.0).unwrap() + 3.0).abs() < 1e-12);
        assert_eq!(
            root(-4.0, 2.0).unwrap_err().to_string(),
            "Even root of a negative number is not a real number"
        );
        assert!(root(4.0, 0.0).is_err());
    }

    #[test]
    fn test_power_and_log_domain() {
        assert_eq!(power(2.0, 10.0).unwrap(), 1024.0);
        assert!(power(0.0, -1.0).is_err());
        assert!(power(10.0, 400.0).is_err());
        assert!((logarithm(1000.0, 10.0).unwrap() - 3.0).abs() < 1e-12);
        assert!(logarithm(0.0, 10.0).is_err());
        assert!(logarithm(5.0, 1.0).is_err());
    }

    #[test]
    fn test_percentages() {
        assert_eq!(percentage_of(25.0, 200.0), 50.0);
        assert_eq!(percent_change(50.0, 75.0).unwrap(), 50.0);
        assert_eq!(percent_change(-50.0, -25.0).unwrap(), 50.0);
        assert!(percent_change(0.0, 1.0).is_err());
    }

    #[test]
    fn test_trig() {
        assert!((trig(TrigFunction::Sin, 30.0, AngleUnit::Degrees).unwrap() - 0.5).abs() < 1e-12);
        assert!((trig(TrigFunction::Atan, 1.0, AngleUnit::Degrees).unwrap() - 45.0).abs() < 1e-12);
        assert!(trig(TrigFunction::Tan, 90.0, AngleUnit::Degrees).is_err());
        assert!(trig(TrigFunction::Asin, 1.5, AngleUnit::Radians).is_err());
        assert_eq!(TrigFunction::from_key("acos"), Some(TrigFunction::Acos));
    }
}
