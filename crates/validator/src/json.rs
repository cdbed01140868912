//! Dotted-path access into `serde_json` form data.
//!
//! Form snapshots are generic nested JSON objects; rules address fields
//! with `.`-delimited paths such as `"content.subjective"`. This module
//! provides the lookup the engine uses for dependency resolution and
//! whole-form walks, plus the truthiness predicate shared by the
//! built-in rules.

use serde_json::Value;

/// Resolves a dotted path against a JSON value.
///
/// Splits on `.` and descends through objects; a missing segment or a
/// non-object intermediate short-circuits to `None`. Array indexing is
/// not supported, paths address named fields only.
///
/// # Examples
///
/// ```
/// use clinote_validator::json::lookup;
/// use serde_json::json;
///
/// let form = json!({ "content": { "subjective": "stable" } });
/// assert_eq!(lookup(&form, "content.subjective"), Some(&json!("stable")));
/// assert_eq!(lookup(&form, "content.objective"), None);
/// assert_eq!(lookup(&form, "vitalSigns.heartRate"), None);
/// ```
#[must_use]
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Returns true when `path` resolves to a present, non-null value.
///
/// This is the dependency gate: a rule whose dependency is absent or
/// `null` is skipped entirely rather than counted as passing or failing.
#[must_use]
pub fn is_set(root: &Value, path: &str) -> bool {
    lookup(root, path).is_some_and(|value| !value.is_null())
}

/// Truthiness as the surrounding form layer understands it.
///
/// `null`, `false`, numeric zero, and the empty string are falsy; every
/// other value, including empty arrays and objects, is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
