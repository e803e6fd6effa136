//! # calc_core - Calcdeck Calculator Engine
//!
//! `calc_core` is the engine behind Calcdeck, a catalog of single-purpose
//! calculators and text utilities. Every calculator follows the same
//! pattern: collect form inputs, validate them, run a pure formula, present
//! the result. That pattern is implemented once (the [`form`] harness) and
//! instantiated per calculator from a declarative registry
//! ([`calculators`]).
//!
//! ## Design Philosophy
//!
//! - **Page-scoped**: each [`Page`] owns its inputs and result; nothing is shared
//! - **Failures are data**: field errors and domain impossibilities are values, not panics
//! - **JSON-ready**: results and errors implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::page::Page;
//! use calc_core::presenter::PresentationSettings;
//!
//! let mut page = Page::open("median").unwrap();
//! page.set("values", "1, 2, 3, 4").unwrap();
//! page.submit(&mut rand::rng()).unwrap();
//!
//! assert_eq!(page.copy_text().as_deref(), Some("2.5"));
//! assert_eq!(page.display(&PresentationSettings::default()), vec!["Median: 2.5"]);
//! ```
//!
//! ## Modules
//!
//! - [`form`] - Form state, field validation, computation requests
//! - [`result`] - Typed outputs and success/failure results
//! - [`presenter`] - Display and clipboard formatting
//! - [`formulas`] - Pure formula functions
//! - [`calculators`] - The calculator registry
//! - [`page`] - One open calculator
//! - [`basic`] - Key-driven general-purpose calculator
//! - [`history`] - Bounded calculation history
//! - [`units`] - Unit tables and type-safe unit wrappers
//! - [`settings`] - User preferences in TOML
//! - [`errors`] - Structured error types

pub mod basic;
pub mod calculators;
pub mod errors;
pub mod form;
pub mod formulas;
pub mod history;
pub mod page;
pub mod presenter;
pub mod result;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use basic::{BasicCalculator, Key, Operator};
pub use calculators::{catalog, find, CalculatorDef, Category};
pub use errors::{CalcError, CalcResult, FieldError};
pub use form::{ComputationRequest, FieldSpec, FormState};
pub use history::{History, HistoryEntry};
pub use page::Page;
pub use result::{ComputationResult, Output, Value};
pub use settings::Settings;
