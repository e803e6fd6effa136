//! Health & fitness calculators.
//!
//! Body measurements are entered in metric units except on the BMI page,
//! which also accepts pounds and inches.

use crate::errors::{CalcResult, FieldError};
use crate::form::{ComputationRequest, FieldSpec};
use crate::formulas::health::{self, ActivityLevel, Sex};
use crate::formulas::round_to;
use crate::result::{FormatHints, Output};
use crate::units::{Centimeters, Inches, Kilograms, Pounds};

use super::{choice_as, whole, CalculatorDef, Category, Compute};

fn sex() -> FieldSpec {
    FieldSpec::choice("sex", "Sex", Sex::KEYS)
}

fn age() -> FieldSpec {
    FieldSpec::number("age", "Age (years)")
        .required()
        .range(15.0, 100.0)
        .integer()
        .default_value("30")
}

fn height_cm() -> FieldSpec {
    FieldSpec::number("height", "Height (cm)").required().range(50.0, 272.0).default_value("175")
}

fn weight_kg() -> FieldSpec {
    FieldSpec::number("weight", "Weight (kg)").required().range(2.0, 650.0).default_value("70")
}

fn girth(name: &str, label: &str) -> FieldSpec {
    FieldSpec::number(name, label).range(10.0, 300.0)
}

pub fn definitions() -> Vec<CalculatorDef> {
    vec![
        CalculatorDef::new(
            "bmi",
            "BMI",
            Category::Health,
            "Body mass index with its WHO adult category.",
            "BMI = kg / m²",
            vec![
                FieldSpec::choice("system", "Units", &["metric", "imperial"]),
                FieldSpec::number("weight", "Weight (kg or lb)").required().min(1.0).default_value("70"),
                FieldSpec::number("height", "Height (cm or in)").required().min(1.0).default_value("175"),
            ],
            Compute::Pure(bmi),
        )
        .note("Categories: under 18.5, 18.5-24.9 normal, 25-29.9 overweight, 30+ obesity"),
        CalculatorDef::new(
            "bmr",
            "BMR",
            Category::Health,
            "Basal metabolic rate by the Mifflin-St Jeor equation.",
            "BMR = 10·kg + 6.25·cm − 5·age + 5 (male) or − 161 (female)",
            vec![sex(), age(), height_cm(), weight_kg()],
            Compute::Pure(bmr),
        ),
        CalculatorDef::new(
            "tdee",
            "TDEE",
            Category::Health,
            "Total daily energy expenditure from BMR and activity level.",
            "TDEE = BMR × activity factor (1.2, 1.375, 1.55, 1.725, 1.9)",
            vec![
                sex(),
                age(),
                height_cm(),
                weight_kg(),
                FieldSpec::choice("activity", "Activity level", ActivityLevel::KEYS),
            ],
            Compute::Pure(tdee),
        ),
        CalculatorDef::new(
            "body-fat",
            "Body Fat",
            Category::Health,
            "Body-fat percentage by the U.S. Navy circumference method.",
            "male: 495 / (1.0324 − 0.19077·log10(waist − neck) + 0.15456·log10(height)) − 450; \
             female: 495 / (1.29579 − 0.35004·log10(waist + hip − neck) + 0.22100·log10(height)) − 450",
            vec![
                sex(),
                height_cm(),
                girth("neck", "Neck (cm)").required().default_value("38"),
                girth("waist", "Waist (cm)").required().default_value("85"),
                girth("hip", "Hip (cm)").help("Required for women"),
            ],
            Compute::Pure(body_fat),
        )
        .rule(hip_required_for_women)
        .note("Results outside 3-70% are reported as a measurement problem, not clamped"),
        CalculatorDef::new(
            "one-rep-max",
            "One-Rep Max",
            Category::Health,
            "Estimated single-repetition maximum from a set of several reps.",
            "1RM = weight / (1.0278 − 0.0278 × reps)",
            vec![
                FieldSpec::number("weight", "Weight lifted").required().min(0.0).default_value("100"),
                FieldSpec::number("reps", "Repetitions")
                    .required()
                    .range(2.0, health::ONE_REP_MAX_REPS_LIMIT as f64)
                    .integer()
                    .default_value("5"),
            ],
            Compute::Pure(one_rep_max),
        )
        .note("Brzycki formula; a single rep already is the maximum"),
        CalculatorDef::new(
            "pace",
            "Running Pace",
            Category::Health,
            "Pace per kilometer and average speed.",
            "pace = minutes / km; speed = km / hours",
            vec![
                FieldSpec::number("distance", "Distance (km)").required().min(0.01).default_value("10"),
                FieldSpec::number("minutes", "Time (minutes)").required().min(0.01).default_value("50"),
            ],
            Compute::Pure(pace),
        ),
        CalculatorDef::new(
            "age",
            "Age",
            Category::Health,
            "Exact age in years, months and days.",
            "calendar difference between birth date and reference date",
            vec![
                FieldSpec::date("birth", "Date of birth").required().default_value("1990-01-01"),
                FieldSpec::date("on", "As of").required().today_by_default(),
            ],
            Compute::Pure(age_on),
        ),
    ]
}

fn hip_required_for_women(request: &ComputationRequest) -> Option<FieldError> {
    let female = request.choice("sex").ok() == Some("female");
    (female && request.opt_number("hip").is_none())
        .then(|| FieldError::new("hip", "Hip measurement is required for women"))
}

fn bmi(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let weight = request.number("weight")?;
    let height = request.number("height")?;
    let (kg, cm) = match request.choice("system")? {
        "imperial" => (Kilograms::from(Pounds(weight)), Centimeters::from(Inches(height))),
        _ => (Kilograms(weight), Centimeters(height)),
    };
    let value = health::bmi(kg.0, cm.0)?;
    Ok(vec![
        Output::number("bmi", "BMI", value, FormatHints::decimals(1)),
        Output::text("category", "Category", health::bmi_category(value)),
    ])
}

fn bmr_from(request: &ComputationRequest) -> CalcResult<f64> {
    let sex = choice_as(request, "sex", Sex::from_key)?;
    Ok(health::bmr_mifflin(
        sex,
        whole(request, "age")? as f64,
        request.number("height")?,
        request.number("weight")?,
    ))
}

fn kcal() -> FormatHints {
    FormatHints::decimals(0).with_suffix("kcal/day")
}

fn bmr(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    Ok(vec![Output::number("bmr", "BMR", bmr_from(request)?, kcal())])
}

fn tdee(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let bmr = bmr_from(request)?;
    let activity = choice_as(request, "activity", ActivityLevel::from_key)?;
    Ok(vec![
        Output::number("bmr", "BMR", bmr, kcal()),
        Output::number("tdee", "TDEE", health::tdee(bmr, activity), kcal()),
    ])
}

fn body_fat(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let sex = choice_as(request, "sex", Sex::from_key)?;
    let percent = health::body_fat_navy(
        sex,
        request.number("height")?,
        request.number("neck")?,
        request.number("waist")?,
        request.opt_number("hip"),
    )?;
    Ok(vec![Output::number("body_fat", "Body fat", percent, FormatHints::percent(1))])
}

fn one_rep_max(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let reps = u32::try_from(whole(request, "reps")?).unwrap_or(u32::MAX);
    let max = health::one_rep_max(request.number("weight")?, reps)?;
    let zones = [95, 90, 85, 80, 75, 70]
        .iter()
        .map(|pct| format!("{}%: {}", pct, round_to(max * *pct as f64 / 100.0, 1)))
        .collect();
    Ok(vec![
        Output::number("one_rep_max", "Estimated 1RM", max, FormatHints::decimals(1)),
        Output::list("zones", "Training loads", zones),
    ])
}

fn pace(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let p = health::pace(request.number("distance")?, request.number("minutes")?)?;
    Ok(vec![
        Output::text("pace", "Pace", format!("{} /km", health::format_minutes(p.minutes_per_km))),
        Output::number("speed", "Speed", p.km_per_hour, FormatHints::decimals(2).with_suffix("km/h")),
    ])
}

fn age_on(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let birth = request.date("birth")?;
    let on = request.date("on")?;
    let a = health::age(birth, on)?;
    let plural = |n: i32, unit: &str| format!("{} {}{}", n, unit, if n == 1 { "" } else { "s" });
    Ok(vec![
        Output::text(
            "age",
            "Age",
            format!("{}, {}, {}", plural(a.years, "year"), plural(a.months, "month"), plural(a.days, "day")),
        ),
        Output::integer("total_days", "Days lived", a.total_days),
    ])
}

#[cfg(test)]
mod tests {
    use crate::calculators::run_with;

    #[test]
    fn test_bmr_scenario() {
        let r = run_with(
            "bmr",
            &[("sex", "male"), ("age", "30"), ("height", "180"), ("weight", "80")],
        )
        .unwrap();
        assert_eq!(r.number("bmr"), Some(1780.0));
    }

    #[test]
    fn test_bmi_imperial_matches_metric() {
        let metric = run_with("bmi", &[("weight", "80"), ("height", "180")]).unwrap();
        let imperial = run_with(
            "bmi",
            &[("system", "imperial"), ("weight", "176.37"), ("height", "70.866")],
        )
        .unwrap();
        let a = metric.number("bmi").unwrap();
        let b = imperial.number("bmi").unwrap();
        assert!((a - b).abs() < 0.01, "{} vs {}", a, b);
        assert_eq!(metric.text("category"), Some("Normal weight"));
    }

    #[test]
    fn test_body_fat_rules() {
        let errors = run_with("body-fat", &[("sex", "female"), ("height", "165")]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "hip");

        let r = run_with(
            "body-fat",
            &[("sex", "female"), ("height", "165"), ("neck", "33"), ("waist", "75"), ("hip", "100")],
        )
        .unwrap();
        assert!(r.is_success());

        // Waist barely above neck: outside the plausible band
        let r = run_with("body-fat", &[("height", "180"), ("neck", "38"), ("waist", "40")]).unwrap();
        assert!(!r.is_success());
        assert!(r.reason().unwrap().contains("check your measurements"));
    }

    #[test]
    fn test_one_rep_max_rejects_single_rep() {
        let errors = run_with("one-rep-max", &[("reps", "1")]).unwrap_err();
        assert_eq!(errors[0].field, "reps");
        let r = run_with("one-rep-max", &[("weight", "100"), ("reps", "5")]).unwrap();
        assert!((r.number("one_rep_max").unwrap() - 112.511).abs() < 0.001);
    }

    #[test]
    fn test_age_with_reference_date() {
        let r = run_with("age", &[("birth", "2000-02-29"), ("on", "2024-02-29")]).unwrap();
        assert_eq!(r.text("age"), Some("24 years, 0 months, 0 days"));

        let r = run_with("age", &[("birth", "2025-01-01"), ("on", "2024-01-01")]).unwrap();
        assert!(!r.is_success());
    }

    #[test]
    fn test_age_page_starts_on_today() {
        let def = crate::calculators::find("age").unwrap();
        let form = def.form();
        let on = form.raw_value("on").unwrap();
        let today = chrono::Local::now().date_naive();
        let parsed = chrono::NaiveDate::parse_from_str(on, "%Y-%m-%d").unwrap();
        assert!((parsed - today).num_days().abs() <= 1);

        let errors = run_with("age", &[("on", "")]).unwrap_err();
        assert_eq!(errors[0].field, "on");
    }

    #[test]
    fn test_pace() {
        let r = run_with("pace", &[("distance", "5"), ("minutes", "27.5")]).unwrap();
        assert_eq!(r.text("pace"), Some("5:30 /km"));
    }
}
