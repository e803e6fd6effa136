//! # Calculator Pages
//!
//! A [`Page`] is one open calculator: a registry entry bound to its own
//! [`FormState`]. Pages share nothing; dropping one discards its inputs and
//! result.
//!
//! ```rust
//! use calc_core::page::Page;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut page = Page::open("discount").unwrap();
//! page.set("price", "200").unwrap();
//! page.set("percent", "25").unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let result = page.submit(&mut rng).unwrap();
//! assert_eq!(result.number("final_price"), Some(150.0));
//! ```

use rand::RngCore;
use tracing::{debug, info_span};
use uuid::Uuid;

use crate::calculators::{self, CalculatorDef};
use crate::errors::{CalcResult, FieldError};
use crate::form::{FieldSpec, FormState, Phase};
use crate::presenter::{clipboard_text, display_lines, PresentationSettings};
use crate::result::ComputationResult;

#[derive(Debug, Clone)]
pub struct Page {
    id: Uuid,
    def: &'static CalculatorDef,
    form: FormState,
}

impl Page {
    /// Open the calculator registered under `slug` with default inputs.
    pub fn open(slug: &str) -> CalcResult<Self> {
        Ok(Page::for_def(calculators::find(slug)?))
    }

    pub fn for_def(def: &'static CalculatorDef) -> Self {
        let page = Page {
            id: Uuid::new_v4(),
            def,
            form: def.form(),
        };
        debug!(page = %page.id, slug = def.slug, "page opened");
        page
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn def(&self) -> &'static CalculatorDef {
        self.def
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.form.fields()
    }

    pub fn set(&mut self, name: &str, raw: impl Into<String>) -> CalcResult<()> {
        self.form.set_field_value(name, raw)
    }

    /// Field validation, then the calculator's cross-field rules.
    pub fn check(&self) -> Vec<FieldError> {
        match self.form.request() {
            Ok(request) => self.def.check_rules(&request),
            Err(errors) => errors,
        }
    }

    /// Validate and compute. On field or rule errors nothing is computed
    /// and the previous result stays.
    pub fn submit(&mut self, rng: &mut dyn RngCore) -> Result<&ComputationResult, Vec<FieldError>> {
        let _span = info_span!("page", id = %self.id, slug = self.def.slug).entered();

        let request = self.form.request().map_err(|errors| {
            debug!(count = errors.len(), "field validation failed");
            errors
        })?;
        let broken = self.def.check_rules(&request);
        if !broken.is_empty() {
            debug!(count = broken.len(), "cross-field rules failed");
            return Err(broken);
        }

        let result = self.def.evaluate(&request, rng);
        if let Some(reason) = result.reason() {
            debug!(%reason, "computation failed");
        }
        Ok(self.form.store(result))
    }

    pub fn reset(&mut self) {
        debug!(page = %self.id, "page reset");
        self.form.reset();
    }

    pub fn last_result(&self) -> Option<&ComputationResult> {
        self.form.last_result()
    }

    pub fn phase(&self) -> Phase {
        self.form.phase()
    }

    /// Display lines for the last result; empty before the first compute.
    pub fn display(&self, settings: &PresentationSettings) -> Vec<String> {
        self.last_result()
            .map(|r| display_lines(r, settings))
            .unwrap_or_default()
    }

    /// What a copy action puts on the clipboard, if anything.
    pub fn copy_text(&self) -> Option<String> {
        self.last_result().and_then(clipboard_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    #[test]
    fn test_open_unknown() {
        let err = Page::open("no-such-calculator").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CALCULATOR");
    }

    #[test]
    fn test_pages_are_independent() {
        let mut a = Page::open("tip").unwrap();
        let b = Page::open("tip").unwrap();
        assert_ne!(a.id(), b.id());
        a.set("bill", "80").unwrap();
        assert_ne!(a.form().raw_value("bill"), b.form().raw_value("bill"));
    }

    #[test]
    fn test_submit_and_copy() {
        let mut page = Page::open("lcm").unwrap();
        page.set("values", "4, 6").unwrap();
        let result = page.submit(&mut rng()).unwrap();
        assert_eq!(result.number("lcm"), Some(12.0));
        assert_eq!(page.phase(), Phase::Computed);
        assert_eq!(page.copy_text().as_deref(), Some("12"));
    }

    #[test]
    fn test_field_errors_keep_previous_result() {
        let mut page = Page::open("lcm").unwrap();
        page.set("values", "4, 6").unwrap();
        page.submit(&mut rng()).unwrap();

        page.set("values", "four").unwrap();
        let errors = page.submit(&mut rng()).unwrap_err();
        assert_eq!(errors[0].field, "values");
        assert_eq!(page.last_result().and_then(|r| r.number("lcm")), Some(12.0));
    }

    #[test]
    fn test_rule_errors() {
        let mut page = Page::open("random-number").unwrap();
        page.set("min", "50").unwrap();
        page.set("max", "5").unwrap();
        assert_eq!(page.check().len(), 1);
        assert!(page.submit(&mut rng()).is_err());
        assert_eq!(page.phase(), Phase::Idle);
    }

    #[test]
    fn test_domain_failure_is_stored() {
        let mut page = Page::open("logarithm").unwrap();
        page.set("x", "-8").unwrap();
        let result = page.submit(&mut rng()).unwrap();
        assert!(!result.is_success());
        assert_eq!(page.phase(), Phase::Computed);
        assert!(page.copy_text().is_none());
        assert!(page.display(&PresentationSettings::default())[0].starts_with("Error:"));
    }

    #[test]
    fn test_reset() {
        let mut page = Page::open("discount").unwrap();
        page.set("price", "999").unwrap();
        page.submit(&mut rng()).unwrap();
        page.reset();
        assert!(page.last_result().is_none());
        assert!(page.display(&PresentationSettings::default()).is_empty());
        assert_ne!(page.form().raw_value("price"), Some("999"));
    }
}
