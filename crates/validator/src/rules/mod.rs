//! Rule-based validation: declarative rules, the evaluation engine, and
//! categorized results.
//!
//! The split mirrors the lifecycle: [`rule`] defines the immutable units,
//! [`engine`] walks them, [`result`] carries what a walk produced.

pub mod engine;
pub mod result;
pub mod rule;

pub use engine::{RuleSetError, Validator, ValidatorBuilder};
pub use result::{ValidationMessage, ValidationReport};
pub use rule::{FixFn, Predicate, Rule, RuleId, Severity};
