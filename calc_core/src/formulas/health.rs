//! # Health & Fitness Formulas
//!
//! All body measurements are metric (kg, cm). Callers with imperial input
//! convert through the newtypes in [`units`](crate::units).
//!
//! ## References
//!
//! - Mifflin MD, St Jeor ST et al., 1990 (BMR)
//! - Hodgdon & Beckett, U.S. Navy circumference method, 1984 (body fat)
//! - Brzycki M., 1993 (one-rep max)

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Body-fat results outside this band mean the measurements are off.
pub const BODY_FAT_PLAUSIBLE_RANGE: (f64, f64) = (3.0, 70.0);

/// Brzycki's denominator reaches zero just below 37 reps.
pub const ONE_REP_MAX_REPS_LIMIT: u32 = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const KEYS: &'static [&'static str] = &["male", "female"];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }
}

// =============================================================================
// BODY MASS & ENERGY
// =============================================================================

/// BMI = kg / m².
pub fn bmi(weight_kg: f64, height_cm: f64) -> CalcResult<f64> {
    if height_cm <= 0.0 {
        return Err(CalcError::calculation_failed("bmi", "Height must be greater than zero"));
    }
    let m = height_cm / 100.0;
    Ok(weight_kg / (m * m))
}

/// WHO adult category for a BMI value.
pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal weight"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obesity"
    }
}

/// Mifflin-St Jeor basal metabolic rate (kcal/day):
/// 10·kg + 6.25·cm − 5·age + 5 (male) or − 161 (female).
///
/// ```rust
/// use calc_core::formulas::health::{bmr_mifflin, Sex};
/// assert_eq!(bmr_mifflin(Sex::Male, 30.0, 180.0, 80.0), 1780.0);
/// ```
pub fn bmr_mifflin(sex: Sex, age: f64, height_cm: f64, weight_kg: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age;
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const KEYS: &'static [&'static str] = &["sedentary", "light", "moderate", "active", "very_active"];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" => Some(ActivityLevel::Light),
            "moderate" => Some(ActivityLevel::Moderate),
            "active" => Some(ActivityLevel::Active),
            "very_active" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Total daily energy expenditure = BMR × activity multiplier.
pub fn tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.multiplier()
}

// =============================================================================
// BODY FAT (U.S. NAVY)
// =============================================================================

/// U.S. Navy body-fat percentage from circumferences in cm.
///
/// - male: 495 / (1.0324 − 0.19077·log10(waist − neck) + 0.15456·log10(height)) − 450
/// - female: 495 / (1.29579 − 0.35004·log10(waist + hip − neck) + 0.22100·log10(height)) − 450
///
/// Results outside [`BODY_FAT_PLAUSIBLE_RANGE`] are reported as a failure.
pub fn body_fat_navy(sex: Sex, height_cm: f64, neck_cm: f64, waist_cm: f64, hip_cm: Option<f64>) -> CalcResult<f64> {
    let fail = |reason: &str| CalcError::calculation_failed("body fat", reason);

    let (girth, a, b, c) = match sex {
        Sex::Male => (waist_cm - neck_cm, 1.0324, 0.19077, 0.15456),
        Sex::Female => {
            let hip = hip_cm.ok_or_else(|| CalcError::missing_field("hip"))?;
            (waist_cm + hip - neck_cm, 1.29579, 0.35004, 0.22100)
        }
    };
    if girth <= 0.0 || height_cm <= 0.0 {
        return Err(fail("Waist must be larger than neck; check your measurements"));
    }

    let percent = 495.0 / (a - b * girth.log10() + c * height_cm.log10()) - 450.0;
    let (lo, hi) = BODY_FAT_PLAUSIBLE_RANGE;
    if !percent.is_finite() || percent < lo || percent > hi {
        return Err(fail("Result is outside the realistic range (3-70%); check your measurements"));
    }
    Ok(percent)
}

// =============================================================================
// STRENGTH & ENDURANCE
// =============================================================================

/// Brzycki one-rep max: weight / (1.0278 − 0.0278 × reps), for reps > 1.
pub fn one_rep_max(weight: f64, reps: u32) -> CalcResult<f64> {
    if reps <= 1 {
        return Err(CalcError::invalid_input(
            "reps",
            reps.to_string(),
            "Reps must be greater than 1",
        ));
    }
    if reps > ONE_REP_MAX_REPS_LIMIT {
        return Err(CalcError::invalid_input(
            "reps",
            reps.to_string(),
            format!("Reps must be at most {}", ONE_REP_MAX_REPS_LIMIT),
        ));
    }
    Ok(weight / (1.0278 - 0.0278 * reps as f64))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pace {
    /// Minutes per kilometer
    pub minutes_per_km: f64,
    pub km_per_hour: f64,
}

pub fn pace(distance_km: f64, total_minutes: f64) -> CalcResult<Pace> {
    if distance_km <= 0.0 || total_minutes <= 0.0 {
        return Err(CalcError::calculation_failed("pace", "Distance and time must be greater than zero"));
    }
    Ok(Pace {
        minutes_per_km: total_minutes / distance_km,
        km_per_hour: distance_km / (total_minutes / 60.0),
    })
}

/// Render fractional minutes as `m:ss`.
pub fn format_minutes(minutes: f64) -> String {
    let total_seconds = (minutes * 60.0).round() as i64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

// =============================================================================
// AGE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Age {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub total_days: i64,
}

/// Calendar age of someone born on `birth` as of `on`.
pub fn age(birth: NaiveDate, on: NaiveDate) -> CalcResult<Age> {
    if birth > on {
        return Err(CalcError::calculation_failed("age", "Birth date is after the reference date"));
    }

    // Largest whole-month count k with birth + k months <= on. Adding months
    // clamps to the end of shorter months (Jan 31 + 1 month = Feb 28).
    let estimate = (on.year() - birth.year()) * 12 + on.month() as i32 - birth.month() as i32;
    let mut whole_months = u32::try_from(estimate.max(0)).unwrap_or(0);
    let mut anchor = add_months(birth, whole_months)?;
    if anchor > on {
        whole_months = whole_months.saturating_sub(1);
        anchor = add_months(birth, whole_months)?;
    }

    Ok(Age {
        years: (whole_months / 12) as i32,
        months: (whole_months % 12) as i32,
        days: (on - anchor).num_days() as i32,
        total_days: (on - birth).num_days(),
    })
}

fn add_months(date: NaiveDate, months: u32) -> CalcResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| CalcError::calculation_failed("age", "Date is out of range"))
}
