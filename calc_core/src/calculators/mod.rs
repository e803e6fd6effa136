//! # Calculator Registry
//!
//! Declarative definitions binding each formula to a form: which fields it
//! takes, which cross-field rules apply, and how the formula's output maps
//! to named [`Output`]s. A page never knows which calculator it hosts; it
//! only sees a [`CalculatorDef`].
//!
//! ## Modules
//!
//! - [`math`] - LCM, GCD, factorial, statistics, modulo, powers, logs, trig
//! - [`finance`] - discount, tip, tax, interest, loans, margins
//! - [`health`] - BMI, BMR, TDEE, body fat, one-rep max, pace, age
//! - [`conversion`] - unit converters for every [`Quantity`](crate::units::Quantity)
//! - [`text`] - case, counts, readability, reverse, diff, sort
//! - [`random`] - passwords, numbers, colors, names, lorem ipsum, picks, dice, coins
//!
//! The catalog is built once on first access and never mutated.

pub mod conversion;
pub mod finance;
pub mod health;
pub mod math;
pub mod random;
pub mod text;

use once_cell::sync::Lazy;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult, FieldError};
use crate::form::{ComputationRequest, FieldSpec, FormState};
use crate::result::{ComputationResult, FormatHints, Output, Value};

// ============================================================================
// Categories
// ============================================================================

/// Catalog sections, in listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Math,
    Finance,
    Health,
    Conversion,
    Text,
    Random,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Math,
        Category::Finance,
        Category::Health,
        Category::Conversion,
        Category::Text,
        Category::Random,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Math => "Math",
            Category::Finance => "Finance",
            Category::Health => "Health & Fitness",
            Category::Conversion => "Unit Conversion",
            Category::Text => "Text Tools",
            Category::Random => "Random Generators",
        }
    }

    /// Lowercase key used on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Category::Math => "math",
            Category::Finance => "finance",
            Category::Health => "health",
            Category::Conversion => "conversion",
            Category::Text => "text",
            Category::Random => "random",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }
}

// ============================================================================
// Definitions
// ============================================================================

/// Deterministic formula over validated inputs.
pub type PureFn = fn(&ComputationRequest) -> CalcResult<Vec<Output>>;

/// Formula that draws from an injected random source.
pub type RandomFn = fn(&ComputationRequest, &mut dyn RngCore) -> CalcResult<Vec<Output>>;

/// Check spanning several fields, run after per-field validation passes.
pub type Rule = fn(&ComputationRequest) -> Option<FieldError>;

#[derive(Clone, Copy)]
pub enum Compute {
    Pure(PureFn),
    Random(RandomFn),
}

impl std::fmt::Debug for Compute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compute::Pure(_) => f.write_str("Pure"),
            Compute::Random(_) => f.write_str("Random"),
        }
    }
}

/// Everything needed to host one calculator.
#[derive(Debug, Clone)]
pub struct CalculatorDef {
    /// URL-style identifier (e.g., "body-fat")
    pub slug: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    /// Plain-text formula for documentation
    pub formula: &'static str,
    pub fields: Vec<FieldSpec>,
    pub rules: Vec<Rule>,
    pub compute: Compute,
    /// Assumptions or limits worth showing next to the formula
    pub notes: Vec<&'static str>,
}

impl CalculatorDef {
    pub fn new(
        slug: &'static str,
        name: &'static str,
        category: Category,
        description: &'static str,
        formula: &'static str,
        fields: Vec<FieldSpec>,
        compute: Compute,
    ) -> Self {
        CalculatorDef {
            slug,
            name,
            category,
            description,
            formula,
            fields,
            rules: Vec::new(),
            compute,
            notes: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn note(mut self, note: &'static str) -> Self {
        self.notes.push(note);
        self
    }

    /// A fresh form with this calculator's fields at their defaults.
    pub fn form(&self) -> FormState {
        FormState::with_fields(self.fields.iter().cloned())
    }

    pub fn is_random(&self) -> bool {
        matches!(self.compute, Compute::Random(_))
    }

    /// Cross-field rule violations for a request that passed field validation.
    pub fn check_rules(&self, request: &ComputationRequest) -> Vec<FieldError> {
        self.rules.iter().filter_map(|rule| rule(request)).collect()
    }

    /// Run the formula. Errors become failure-tagged results.
    pub fn evaluate(&self, request: &ComputationRequest, rng: &mut dyn RngCore) -> ComputationResult {
        let outputs = match self.compute {
            Compute::Pure(f) => f(request),
            Compute::Random(f) => f(request, rng),
        };
        ComputationResult::from_outputs(outputs)
    }
}

// ============================================================================
// Catalog
// ============================================================================

static CATALOG: Lazy<Vec<CalculatorDef>> = Lazy::new(|| {
    let mut all = Vec::new();
    all.extend(math::definitions());
    all.extend(finance::definitions());
    all.extend(health::definitions());
    all.extend(conversion::definitions());
    all.extend(text::definitions());
    all.extend(random::definitions());
    all
});

/// Every registered calculator, grouped by category.
pub fn catalog() -> &'static [CalculatorDef] {
    &CATALOG
}

pub fn find(slug: &str) -> CalcResult<&'static CalculatorDef> {
    CATALOG
        .iter()
        .find(|def| def.slug == slug)
        .ok_or_else(|| CalcError::unknown_calculator(slug))
}

pub fn in_category(category: Category) -> impl Iterator<Item = &'static CalculatorDef> {
    CATALOG.iter().filter(move |def| def.category == category)
}

// ============================================================================
// Shared helpers for definitions
// ============================================================================

/// Whole-number field value as `u64`, for inputs declared `integer().min(0.0)`.
pub(crate) fn whole(request: &ComputationRequest, name: &str) -> CalcResult<u64> {
    let n = request.integer(name)?;
    u64::try_from(n).map_err(|_| CalcError::invalid_input(name, n.to_string(), "Must not be negative"))
}

/// Each list element as `u64`, for lists declared `integer().min(0.0)`.
pub(crate) fn whole_list(request: &ComputationRequest, name: &str) -> CalcResult<Vec<u64>> {
    request
        .numbers(name)?
        .iter()
        .map(|&n| {
            if n < 0.0 || n.fract() != 0.0 || n > u64::MAX as f64 {
                Err(CalcError::invalid_input(name, n.to_string(), "Each number must be a whole number"))
            } else {
                Ok(n as u64)
            }
        })
        .collect()
}

/// Enum field value mapped through a `from_key` constructor.
pub(crate) fn choice_as<T>(
    request: &ComputationRequest,
    name: &str,
    from_key: impl Fn(&str) -> Option<T>,
) -> CalcResult<T> {
    let key = request.choice(name)?;
    from_key(key).ok_or_else(|| CalcError::invalid_input(name, key, "Unknown option"))
}

/// Integer output, falling back to decimal digits past `i64`.
pub(crate) fn count_output(key: &str, label: &str, value: u64) -> Output {
    match i64::try_from(value) {
        Ok(v) => Output::integer(key, label, v),
        Err(_) => Output::new(key, label, Value::BigInteger(value.to_string()), FormatHints::default()),
    }
}

// ============================================================================
// Markdown Catalog
// ============================================================================

/// Render the full catalog as markdown (written to `CALCULATORS.md` by the
/// `gen-catalog` binary).
pub fn generate_catalog_markdown() -> String {
    let mut output = String::with_capacity(24_000);

    output.push_str(
        r#"# Calcdeck Calculator Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-catalog`

Every calculator below shares the same cycle: fill the fields, validate,
compute, present. Field constraints are checked before any formula runs;
formula failures are reported with a reason instead of a number.

---

"#,
    );

    let mut categories = 0;
    for category in Category::ALL {
        let defs: Vec<_> = in_category(category).collect();
        if defs.is_empty() {
            continue;
        }
        categories += 1;

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for def in defs {
            output.push_str(&format!("### {} (`{}`)\n\n", def.name, def.slug));
            output.push_str(&format!("{}\n\n", def.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", def.formula));

            if !def.fields.is_empty() {
                output.push_str("| Field | Label | Kind | Constraints | Default |\n");
                output.push_str("|-------|-------|------|-------------|---------|\n");
                for field in &def.fields {
                    output.push_str(&format!(
                        "| `{}` | {} | {} | {} | {} |\n",
                        field.name,
                        field.label,
                        field.kind.display_name(),
                        field.describe_constraints(),
                        field.default_label().unwrap_or("-"),
                    ));
                }
                output.push('\n');
            }

            if !def.notes.is_empty() {
                output.push_str("**Notes:**\n");
                for note in &def.notes {
                    output.push_str(&format!("- {}\n", note));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Calculators:** {}\n- **Categories:** {}\n",
        CATALOG.len(),
        categories
    ));

    output
}

// ============================================================================
// Test support
// ============================================================================

/// Fill a calculator's form from `name=value` pairs and compute with a
/// seeded RNG. Field or rule errors are returned as `Err`.
#[cfg(test)]
pub(crate) fn run_with(slug: &str, values: &[(&str, &str)]) -> Result<ComputationResult, Vec<FieldError>> {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let def = find(slug).unwrap();
    let mut form = def.form();
    for (name, value) in values {
        form.set_field_value(name, *value).unwrap();
    }
    let request = form.request()?;
    let broken = def.check_rules(&request);
    if !broken.is_empty() {
        return Err(broken);
    }
    let mut rng = StdRng::seed_from_u64(7);
    Ok(def.evaluate(&request, &mut rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugs_unique() {
        let mut seen = HashSet::new();
        for def in catalog() {
            assert!(seen.insert(def.slug), "duplicate slug {}", def.slug);
        }
    }

    #[test]
    fn test_every_category_populated() {
        for category in Category::ALL {
            assert!(in_category(category).count() > 0, "{:?} is empty", category);
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        // A freshly opened page must not start out with invalid defaults
        // in fields that carry one.
        for def in catalog() {
            for field in &def.fields {
                if field.default.is_empty() {
                    continue;
                }
                assert!(
                    field.parse(&field.default).is_ok(),
                    "{}: default {:?} for {} fails validation",
                    def.slug,
                    field.default,
                    field.name
                );
            }
        }
    }

    #[test]
    fn test_field_names_unique_per_calculator() {
        for def in catalog() {
            let mut names = HashSet::new();
            for field in &def.fields {
                assert!(names.insert(field.name.as_str()), "{}: duplicate field {}", def.slug, field.name);
            }
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("lcm").unwrap().name, "Least Common Multiple");
        assert_eq!(find("nope").unwrap_err().error_code(), "UNKNOWN_CALCULATOR");
    }

    #[test]
    fn test_category_keys() {
        assert_eq!(Category::from_key("Health"), Some(Category::Health));
        assert_eq!(Category::from_key("cooking"), None);
    }

    #[test]
    fn test_generate_catalog_markdown() {
        let md = generate_catalog_markdown();
        assert!(md.contains("# Calcdeck Calculator Reference"));
        for def in catalog() {
            assert!(md.contains(&format!("(`{}`)", def.slug)));
        }
        assert!(md.contains(&format!("**Total Calculators:** {}", catalog().len())));
    }
}
