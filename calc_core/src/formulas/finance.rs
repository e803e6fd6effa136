//! # Finance Formulas
//!
//! Rates are entered as percentages (25 means 25 %). Money amounts are plain
//! `f64`; rounding to cents happens at presentation.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub discount_amount: f64,
    pub final_price: f64,
}

/// Price after a percentage discount.
///
/// ```rust
/// use calc_core::formulas::finance::discount;
/// let d = discount(200.0, 25.0);
/// assert_eq!(d.discount_amount, 50.0);
/// assert_eq!(d.final_price, 150.0);
/// ```
pub fn discount(price: f64, percent: f64) -> Discount {
    let discount_amount = price * percent / 100.0;
    Discount {
        discount_amount,
        final_price: price - discount_amount,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub tip_amount: f64,
    pub total: f64,
    pub per_person: f64,
}

pub fn tip(bill: f64, percent: f64, people: u32) -> CalcResult<Tip> {
    if people == 0 {
        return Err(CalcError::calculation_failed("tip", "Split between at least one person"));
    }
    let tip_amount = bill * percent / 100.0;
    let total = bill + tip_amount;
    Ok(Tip {
        tip_amount,
        total,
        per_person: total / people as f64,
    })
}

/// Returns (tax, total).
pub fn sales_tax(price: f64, rate: f64) -> (f64, f64) {
    let tax = price * rate / 100.0;
    (tax, price + tax)
}

/// I = P·r·t. Returns (interest, total).
pub fn simple_interest(principal: f64, rate: f64, years: f64) -> (f64, f64) {
    let interest = principal * rate / 100.0 * years;
    (interest, principal + interest)
}

/// How often interest is compounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundFrequency {
    Annually,
    Semiannually,
    Quarterly,
    Monthly,
    Daily,
}

impl CompoundFrequency {
    pub const KEYS: &'static [&'static str] = &["annually", "semiannually", "quarterly", "monthly", "daily"];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "annually" => Some(CompoundFrequency::Annually),
            "semiannually" => Some(CompoundFrequency::Semiannually),
            "quarterly" => Some(CompoundFrequency::Quarterly),
            "monthly" => Some(CompoundFrequency::Monthly),
            "daily" => Some(CompoundFrequency::Daily),
            _ => None,
        }
    }

    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundFrequency::Annually => 1,
            CompoundFrequency::Semiannually => 2,
            CompoundFrequency::Quarterly => 4,
            CompoundFrequency::Monthly => 12,
            CompoundFrequency::Daily => 365,
        }
    }
}

/// A = P(1 + r/n)^(n·t). Returns (final amount, interest earned).
pub fn compound_interest(principal: f64, rate: f64, years: f64, frequency: CompoundFrequency) -> CalcResult<(f64, f64)> {
    let n = frequency.periods_per_year() as f64;
    let amount = principal * (1.0 + rate / 100.0 / n).powf(n * years);
    if !amount.is_finite() {
        return Err(CalcError::calculation_failed("compound interest", "The result is too large"));
    }
    Ok((amount, amount - principal))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// Amortized monthly payment: M = P·i / (1 − (1 + i)^−n), i = annual/12.
///
/// A zero rate spreads the principal evenly.
pub fn loan_payment(principal: f64, annual_rate: f64, months: u32) -> CalcResult<LoanSummary> {
    if months == 0 {
        return Err(CalcError::calculation_failed("loan", "Term must be at least one month"));
    }
    let n = months as f64;
    let i = annual_rate / 100.0 / 12.0;
    let monthly_payment = if i == 0.0 {
        principal / n
    } else {
        principal * i / (1.0 - (1.0 + i).powf(-n))
    };
    let total_paid = monthly_payment * n;
    Ok(LoanSummary {
        monthly_payment,
        total_paid,
        total_interest: total_paid - principal,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub profit: f64,
    pub margin_percent: f64,
    /// Undefined when the cost is zero
    pub markup_percent: Option<f64>,
}

pub fn profit_margin(cost: f64, revenue: f64) -> CalcResult<Margin> {
    if revenue == 0.0 {
        return Err(CalcError::calculation_failed("margin", "Revenue must not be zero"));
    }
    let profit = revenue - cost;
    Ok(Margin {
        profit,
        margin_percent: profit / revenue * 100.0,
        markup_percent: (cost != 0.0).then(|| profit / cost * 100.0),
    })
}
