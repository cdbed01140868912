//! # clinote-validator
//!
//! Rule-based validation engine for clinical note forms.
//!
//! A [`Validator`] walks an ordered set of declarative [`Rule`]s against
//! a `serde_json::Value` form snapshot, skips rules whose dependency
//! fields are unset, and buckets every failure by severity into a
//! [`ValidationReport`]. Only `error`-severity failures affect validity;
//! warnings and infos are advisory.
//!
//! ## Quick Start
//!
//! ```
//! use clinote_validator::prelude::*;
//! use serde_json::json;
//!
//! let validator = Validator::with_clinical_rules();
//! let form = json!({ "title": "Hi" });
//!
//! let report = validator.validate_field("title", &form["title"], &form);
//! assert!(!report.is_valid());
//! assert_eq!(report.errors[0].id.as_str(), "title_required");
//! ```
//!
//! ## Custom rule sets
//!
//! Rules are plain values; a validator is fully parameterized by the set
//! it is constructed with:
//!
//! ```
//! use clinote_validator::prelude::*;
//! use serde_json::{Value, json};
//!
//! let validator = Validator::builder()
//!     .rule(Rule::new(
//!         "dose_required",
//!         "dose",
//!         "A dose is required",
//!         |value: &Value, _form: &Value| !value.is_null(),
//!     ))
//!     .build()?;
//!
//! assert!(validator.validate_form(&json!({ "dose": 5 })).is_valid());
//! assert!(!validator.validate_form(&json!({})).is_valid());
//! # Ok::<(), clinote_validator::rules::RuleSetError>(())
//! ```
//!
//! ## Evaluation model
//!
//! Synchronous and stateless between calls: the validator holds only its
//! immutable rule list, every result is a fresh value, and a shared
//! instance is safe across threads by construction. Interactive callers
//! are expected to debounce re-validation themselves; the engine is
//! cheap enough to run on every change for realistic rule-set sizes.

pub mod catalog;
pub mod json;
pub mod prelude;
pub mod rules;

pub use rules::{Rule, RuleId, Severity, ValidationMessage, ValidationReport, Validator};
