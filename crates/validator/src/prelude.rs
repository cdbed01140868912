//! Prelude module for convenient imports.
//!
//! A single `use clinote_validator::prelude::*;` brings in the engine,
//! rule types, results, and the built-in catalog.

// ============================================================================
// RULES: engine, rule types, results
// ============================================================================

pub use crate::rules::{
    FixFn, Predicate, Rule, RuleId, RuleSetError, Severity, ValidationMessage, ValidationReport,
    Validator, ValidatorBuilder,
};

// ============================================================================
// CATALOG: built-in clinical note rule set
// ============================================================================

pub use crate::catalog::clinical_note_rules;
