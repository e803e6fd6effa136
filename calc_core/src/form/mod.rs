//! # Form Harness
//!
//! [`FormState`] is the generic calculator harness every page is built on:
//! it holds raw field values, validates them, runs a compute function over a
//! snapshot, and remembers the last result until reset.
//!
//! ## Lifecycle
//!
//! ```text
//!   Idle ──compute──▶ Computed ──compute──▶ Computed
//!    ▲                   │
//!    └──────reset────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::form::{FieldSpec, FormState};
//! use calc_core::result::{ComputationResult, FormatHints, Output};
//!
//! let mut form = FormState::new();
//! form.register_field(FieldSpec::number("price", "Price").required().min(0.0).default_value("0"));
//! form.register_field(FieldSpec::number("discount", "Discount %").required().range(0.0, 100.0));
//!
//! form.set_field_value("price", "200").unwrap();
//! form.set_field_value("discount", "25").unwrap();
//! assert!(form.validate().is_empty());
//!
//! let result = form.compute(|req| {
//!     let price = req.number("price").unwrap_or(0.0);
//!     let pct = req.number("discount").unwrap_or(0.0);
//!     ComputationResult::success(vec![Output::number(
//!         "final_price", "Final price", price * (1.0 - pct / 100.0), FormatHints::money(),
//!     )])
//! });
//! assert_eq!(result.number("final_price"), Some(150.0));
//!
//! form.reset();
//! assert!(form.last_result().is_none());
//! assert_eq!(form.raw_value("price"), Some("0"));
//! ```

pub mod field;
pub mod request;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult, FieldError};
use crate::result::ComputationResult;

pub use field::{FieldConstraints, FieldKind, FieldSpec, ParsedValue};
pub use request::ComputationRequest;

/// Whether the form currently holds a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Computed,
}

#[derive(Debug, Clone)]
struct Field {
    spec: FieldSpec,
    raw: String,
}

/// Page-scoped form state: declared fields, their raw values, and the last
/// computation result.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    fields: Vec<Field>,
    last_result: Option<ComputationResult>,
    /// Set by the first compute; registration is closed afterwards
    started: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form with all fields registered up front.
    pub fn with_fields(specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        let mut form = Self::new();
        for spec in specs {
            form.register_field(spec);
        }
        form
    }

    /// Declare an input. The raw value starts at the field's default.
    ///
    /// Returns `false` and changes nothing when computation has already
    /// started or the name is taken.
    pub fn register_field(&mut self, spec: FieldSpec) -> bool {
        if self.started {
            warn!(field = %spec.name, "field registration after compute ignored");
            return false;
        }
        if self.fields.iter().any(|f| f.spec.name == spec.name) {
            warn!(field = %spec.name, "duplicate field registration ignored");
            return false;
        }
        let raw = spec.initial_raw();
        self.fields.push(Field { spec, raw });
        true
    }

    /// Store a raw value verbatim. No parsing happens here.
    pub fn set_field_value(&mut self, name: &str, raw: impl Into<String>) -> CalcResult<()> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.spec.name == name)
            .ok_or_else(|| CalcError::unknown_field(name))?;
        field.raw = raw.into();
        Ok(())
    }

    pub fn raw_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.spec.name == name)
            .map(|f| f.raw.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.spec.name == name).map(|f| &f.spec)
    }

    /// Declared fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().map(|f| &f.spec)
    }

    /// Parse every field and check its constraints.
    ///
    /// An empty list means the form is valid.
    pub fn validate(&self) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|f| match f.spec.parse(&f.raw) {
                Ok(_) => None,
                Err(message) => Some(FieldError::new(f.spec.name.clone(), message)),
            })
            .collect()
    }

    /// Validate and, when every field passes, build the request.
    pub fn request(&self) -> Result<ComputationRequest, Vec<FieldError>> {
        let mut values = BTreeMap::new();
        let mut errors = Vec::new();
        for f in &self.fields {
            match f.spec.parse(&f.raw) {
                Ok(Some(value)) => {
                    values.insert(f.spec.name.clone(), value);
                }
                Ok(None) => {}
                Err(message) => errors.push(FieldError::new(f.spec.name.clone(), message)),
            }
        }
        if errors.is_empty() {
            Ok(ComputationRequest::from_values(values))
        } else {
            Err(errors)
        }
    }

    /// Snapshot of whatever currently parses; invalid fields are absent.
    fn snapshot(&self) -> ComputationRequest {
        let values = self
            .fields
            .iter()
            .filter_map(|f| match f.spec.parse(&f.raw) {
                Ok(Some(value)) => Some((f.spec.name.clone(), value)),
                _ => None,
            })
            .collect();
        ComputationRequest::from_values(values)
    }

    /// Run `compute` over the current field values and keep the result.
    ///
    /// The caller is expected to have validated first; nothing is
    /// re-validated here. Use [`FormState::submit`] for the checked path.
    pub fn compute<F>(&mut self, compute: F) -> &ComputationResult
    where
        F: FnOnce(&ComputationRequest) -> ComputationResult,
    {
        let request = self.snapshot();
        self.store(compute(&request))
    }

    /// Validate, then compute. Field errors leave the last result untouched.
    pub fn submit<F>(&mut self, compute: F) -> Result<&ComputationResult, Vec<FieldError>>
    where
        F: FnOnce(&ComputationRequest) -> ComputationResult,
    {
        let request = self.request()?;
        Ok(self.store(compute(&request)))
    }

    /// Record a result produced outside the closure-based entry points.
    pub(crate) fn store(&mut self, result: ComputationResult) -> &ComputationResult {
        self.started = true;
        debug!(success = result.is_success(), "computation finished");
        self.last_result.insert(result)
    }

    /// Restore every field to its default and clear the last result.
    pub fn reset(&mut self) {
        for f in &mut self.fields {
            f.raw = f.spec.initial_raw();
        }
        self.last_result = None;
    }

    pub fn last_result(&self) -> Option<&ComputationResult> {
        self.last_result.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.last_result.is_some() {
            Phase::Computed
        } else {
            Phase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{FormatHints, Output};

    fn modulo_form() -> FormState {
        FormState::with_fields([
            FieldSpec::number("dividend", "Dividend").required().default_value("10"),
            FieldSpec::number("divisor", "Divisor").required().nonzero().default_value("3"),
            FieldSpec::text("note", "Note"),
        ])
    }

    fn remainder(req: &ComputationRequest) -> ComputationResult {
        let out = req
            .number("dividend")
            .and_then(|a| req.number("divisor").map(|b| a % b))
            .map(|r| vec![Output::number("remainder", "Remainder", r, FormatHints::default())]);
        ComputationResult::from_outputs(out)
    }

    #[test]
    fn test_set_value_is_verbatim() {
        let mut form = modulo_form();
        form.set_field_value("dividend", "  abc ").unwrap();
        assert_eq!(form.raw_value("dividend"), Some("  abc "));
        assert_eq!(
            form.set_field_value("nope", "1").unwrap_err().error_code(),
            "UNKNOWN_FIELD"
        );
    }

    #[test]
    fn test_validate_collects_every_error() {
        let mut form = modulo_form();
        form.set_field_value("dividend", "").unwrap();
        form.set_field_value("divisor", "0").unwrap();
        let errors = form.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], FieldError::new("dividend", "This field is required"));
        assert_eq!(errors[1], FieldError::new("divisor", "Must not be zero"));
    }

    #[test]
    fn test_submit_and_phase() {
        let mut form = modulo_form();
        assert_eq!(form.phase(), Phase::Idle);
        form.set_field_value("dividend", "17").unwrap();
        form.set_field_value("divisor", "5").unwrap();
        let result = form.submit(remainder).unwrap();
        assert_eq!(result.number("remainder"), Some(2.0));
        assert_eq!(form.phase(), Phase::Computed);

        // Recompute without reset replaces the result
        form.set_field_value("dividend", "18").unwrap();
        form.submit(remainder).unwrap();
        assert_eq!(form.last_result().unwrap().number("remainder"), Some(3.0));
    }

    #[test]
    fn test_submit_with_errors_keeps_previous_result() {
        let mut form = modulo_form();
        form.submit(remainder).unwrap();
        form.set_field_value("divisor", "0").unwrap();
        let errors = form.submit(remainder).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(form.last_result().unwrap().number("remainder"), Some(1.0));
    }

    #[test]
    fn test_compute_does_not_revalidate() {
        let mut form = modulo_form();
        form.set_field_value("dividend", "oops").unwrap();
        let result = form.compute(remainder);
        // The compute function sees the field as absent and reports it
        assert_eq!(result.reason(), Some("Missing required field: dividend"));
    }

    #[test]
    fn test_reset_restores_defaults_regardless_of_history() {
        let mut form = modulo_form();
        form.set_field_value("dividend", "x").unwrap();
        let _ = form.validate();
        form.compute(remainder);
        form.set_field_value("divisor", "7").unwrap();
        form.set_field_value("note", "hello").unwrap();
        form.submit(remainder).unwrap_err();

        form.reset();
        assert_eq!(form.raw_value("dividend"), Some("10"));
        assert_eq!(form.raw_value("divisor"), Some("3"));
        assert_eq!(form.raw_value("note"), Some(""));
        assert!(form.last_result().is_none());
        assert_eq!(form.phase(), Phase::Idle);
    }

    #[test]
    fn test_registration_closed_after_compute() {
        let mut form = modulo_form();
        assert!(!form.register_field(FieldSpec::number("dividend", "Again")));
        form.compute(remainder);
        assert!(!form.register_field(FieldSpec::number("late", "Late")));
        assert!(form.field("late").is_none());
        assert_eq!(form.fields().count(), 3);
    }

    #[test]
    fn test_request_omits_optional_empty_fields() {
        let form = modulo_form();
        let request = form.request().unwrap();
        assert_eq!(request.len(), 2);
        assert!(!request.contains("note"));
    }
}
