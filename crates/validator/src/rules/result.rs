//! Validation outcomes.
//!
//! Both types here are transient: recomputed on every validation call,
//! never persisted. All state lives in the caller-held report.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::rule::{Rule, RuleId, Severity};

/// A failed rule instance for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    /// ID of the rule that raised this message.
    pub id: RuleId,
    /// Dotted path of the field the rule targets.
    pub field: String,
    /// Human-readable text.
    pub message: String,
    /// Blocking classification, copied from the rule.
    pub severity: Severity,
    /// True iff the originating rule defines an auto-fix.
    pub can_auto_fix: bool,
}

impl ValidationMessage {
    pub(crate) fn from_rule(rule: &Rule) -> Self {
        Self {
            id: rule.id().clone(),
            field: rule.field().to_string(),
            message: rule.message().to_string(),
            severity: rule.severity(),
            can_auto_fix: rule.can_auto_fix(),
        }
    }
}

impl Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.field, self.id, self.message)
    }
}

/// Categorized outcome of one evaluation pass.
///
/// Buckets preserve rule evaluation order. Validity is derived: a report
/// is valid exactly when the `errors` bucket is empty. Warnings and
/// infos never affect validity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Blocking messages.
    pub errors: Vec<ValidationMessage>,
    /// Advisory messages for unusual-but-possible data.
    pub warnings: Vec<ValidationMessage>,
    /// Informational notices.
    pub infos: Vec<ValidationMessage>,
}

impl ValidationReport {
    /// Partitions messages by severity, preserving relative order within
    /// each bucket.
    #[must_use]
    pub fn from_messages(messages: Vec<ValidationMessage>) -> Self {
        let mut report = Self::default();
        for message in messages {
            match message.severity {
                Severity::Error => report.errors.push(message),
                Severity::Warning => report.warnings.push(message),
                Severity::Info => report.infos.push(message),
            }
        }
        report
    }

    /// True when no blocking message was raised.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of raised messages across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.infos.len()
    }

    /// True when no rule failed at any severity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All messages: errors first, then warnings, then infos.
    pub fn messages(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.errors.iter().chain(&self.warnings).chain(&self.infos)
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation raised {} message(s):", self.len())?;
        for (i, message) in self.messages().enumerate() {
            writeln!(f, "  {}. {}", i + 1, message)?;
        }
        Ok(())
    }
}
