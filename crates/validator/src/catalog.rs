//! Built-in rule catalog for clinical note forms.
//!
//! Severity is the policy lever here: only missing or structurally
//! invalid required data is an `error`. Length advisories, unusual but
//! clinically possible readings, and oversized attachments stay
//! `warning`/`info` so the form is never hard-blocked by data that might
//! be correct.
//!
//! The catalog is an explicit value passed to the validator (see
//! [`Validator::with_clinical_rules`](crate::rules::Validator::with_clinical_rules)),
//! never consulted as global state.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde_json::Value;

use crate::json::{self, is_truthy};
use crate::rules::{Rule, Severity};

/// Minimum title length in chars, shared by the required check and the
/// advisory bound.
pub const TITLE_MIN_CHARS: usize = 3;
/// Advisory upper bound on title length.
pub const TITLE_MAX_CHARS: usize = 100;
/// Advisory cap on the subjective section.
pub const SUBJECTIVE_MAX_CHARS: usize = 1000;
/// Plausible systolic blood pressure range, mmHg.
pub const SYSTOLIC_RANGE: (f64, f64) = (70.0, 200.0);
/// Plausible diastolic blood pressure range, mmHg.
pub const DIASTOLIC_RANGE: (f64, f64) = (40.0, 120.0);
/// Plausible heart rate range, bpm.
pub const HEART_RATE_RANGE: (f64, f64) = (40.0, 150.0);
/// Plausible body temperature range, degrees Celsius.
pub const TEMPERATURE_RANGE: (f64, f64) = (35.0, 42.0);
/// Attachments above this size are flagged as informational.
pub const ATTACHMENT_MAX_BYTES: u64 = 10 * 1024 * 1024;

static PATIENT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.-]*$").unwrap());

/// The shipped clinical note rule set, in evaluation order.
#[must_use]
pub fn clinical_note_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "patient_required",
            "patientId",
            "A patient must be selected",
            |value, _| is_truthy(value),
        ),
        Rule::new(
            "patient_id_format",
            "patientId",
            "Patient identifier has an unexpected format",
            |value, _| match value.as_str() {
                Some(id) if !id.is_empty() => PATIENT_ID_PATTERN.is_match(id),
                _ => true,
            },
        )
        .with_severity(Severity::Warning),
        Rule::new(
            "title_required",
            "title",
            format!("Title must be at least {TITLE_MIN_CHARS} characters"),
            |value, _| {
                value
                    .as_str()
                    .is_some_and(|title| title.trim().chars().count() >= TITLE_MIN_CHARS)
            },
        ),
        Rule::new(
            "title_length",
            "title",
            format!("Title should be between {TITLE_MIN_CHARS} and {TITLE_MAX_CHARS} characters"),
            |value, _| chars_within(value, TITLE_MIN_CHARS, TITLE_MAX_CHARS),
        )
        .with_severity(Severity::Warning)
        .with_auto_fix(|value| match value.as_str() {
            Some(title) => Value::String(title.trim().to_string()),
            None => value.clone(),
        }),
        Rule::new(
            "type_required",
            "noteType",
            "A note type must be selected",
            |value, _| is_truthy(value),
        ),
        Rule::new(
            "content_required",
            "content",
            "At least one content section is required",
            |value, _| {
                value
                    .as_object()
                    .is_some_and(|sections| sections.values().any(is_truthy))
            },
        ),
        Rule::new(
            "subjective_length",
            "content.subjective",
            format!("Subjective section should stay under {SUBJECTIVE_MAX_CHARS} characters"),
            |value, _| {
                value
                    .as_str()
                    .is_none_or(|text| text.chars().count() <= SUBJECTIVE_MAX_CHARS)
            },
        )
        .with_severity(Severity::Warning),
        Rule::new(
            "followup_date_required",
            "followUpDate",
            "A follow-up date is required when follow-up is requested",
            |value, form| {
                if json::lookup(form, "followUpRequired").is_some_and(is_truthy) {
                    value.as_str().is_some_and(|date| !date.is_empty())
                } else {
                    true
                }
            },
        )
        .with_dependency("followUpRequired"),
        Rule::new(
            "followup_date_future",
            "followUpDate",
            "Follow-up date should be in the future",
            |value, _| value.as_str().is_none_or(follow_up_in_future),
        )
        .with_severity(Severity::Warning),
        Rule::new(
            "medication_entries",
            "medications",
            "Each medication entry must be a name or carry an identifier",
            |value, _| match value {
                Value::Null => true,
                Value::Array(entries) => entries.iter().all(medication_entry_ok),
                _ => false,
            },
        ),
        vital_rule(
            "systolic_range",
            "systolic",
            "Systolic pressure",
            "mmHg",
            SYSTOLIC_RANGE,
        ),
        vital_rule(
            "diastolic_range",
            "diastolic",
            "Diastolic pressure",
            "mmHg",
            DIASTOLIC_RANGE,
        ),
        vital_rule(
            "heart_rate_range",
            "heartRate",
            "Heart rate",
            "bpm",
            HEART_RATE_RANGE,
        ),
        vital_rule(
            "temperature_range",
            "temperature",
            "Temperature",
            "\u{b0}C",
            TEMPERATURE_RANGE,
        ),
        Rule::new(
            "attachment_size",
            "attachments",
            format!(
                "Attachments over {} MB may be slow to sync",
                ATTACHMENT_MAX_BYTES / (1024 * 1024)
            ),
            |value, _| {
                value.as_array().is_none_or(|files| {
                    files.iter().all(|file| {
                        json::lookup(file, "size")
                            .and_then(Value::as_u64)
                            .is_none_or(|size| size <= ATTACHMENT_MAX_BYTES)
                    })
                })
            },
        )
        .with_severity(Severity::Info),
    ]
}

/// Builds one plausibility check over a reading inside the `vitalSigns`
/// object. Missing or non-numeric readings pass; the range check only
/// applies to what is actually recorded.
fn vital_rule(
    id: &'static str,
    key: &'static str,
    label: &'static str,
    unit: &'static str,
    (min, max): (f64, f64),
) -> Rule {
    Rule::new(
        id,
        "vitalSigns",
        format!("{label} outside the expected {min}-{max} {unit} range"),
        move |value, _| {
            json::lookup(value, key)
                .and_then(Value::as_f64)
                .is_none_or(|reading| reading >= min && reading <= max)
        },
    )
    .with_severity(Severity::Warning)
}

fn medication_entry_ok(entry: &Value) -> bool {
    match entry {
        Value::String(name) => !name.is_empty(),
        Value::Object(fields) => fields.get("id").is_some_and(is_truthy),
        _ => false,
    }
}

fn chars_within(value: &Value, min: usize, max: usize) -> bool {
    value.as_str().is_none_or(|text| {
        let len = text.chars().count();
        len >= min && len <= max
    })
}

/// Accepts `YYYY-MM-DD` or RFC 3339. Unparseable values pass: a
/// malformed-but-present date is not this rule's concern.
fn follow_up_in_future(raw: &str) -> bool {
    if raw.is_empty() {
        return true;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date > Utc::now().date_naive();
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => instant.with_timezone(&Utc) > Utc::now(),
        Err(_) => true,
    }
}
