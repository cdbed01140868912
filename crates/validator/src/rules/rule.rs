//! Rule definitions.
//!
//! A [`Rule`] is the declarative unit of validation: a target field path,
//! a severity, a pass/fail predicate, and optional auto-fix and
//! dependency metadata. Rules are plain values, built once and stored
//! verbatim in a [`Validator`](super::Validator) for its lifetime.

use std::borrow::Cow;
use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use crate::json;

/// Unique identifier for a rule.
///
/// IDs must be unique across an active rule set; message categorization
/// and auto-fix lookup rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(Cow<'static, str>);

impl RuleId {
    /// Creates a new rule ID.
    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    /// Gets the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&'static str> for RuleId {
    fn from(id: &'static str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Blocking classification of a validation outcome.
///
/// Severity is the policy lever: only [`Severity::Error`] affects
/// validity. Warnings and infos are advisory so a form is never
/// hard-blocked by data that might be correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Invalid or missing required data; blocks submission (default).
    #[default]
    Error,
    /// Unusual but possibly correct data; never blocks.
    Warning,
    /// Advisory notice; never blocks.
    Info,
}

impl Severity {
    /// True only for `Error`, the one severity that affects validity.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        };
        write!(f, "{name}")
    }
}

/// Pass/fail predicate: `(field value, whole form) -> valid?`.
///
/// Returning `true` means the value is valid. A panicking predicate is a
/// defect in the rule definition and propagates to the caller; the
/// engine does not catch it.
pub type Predicate = Box<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// Pure corrective transformation, applied on demand via
/// [`Validator::auto_fix`](super::Validator::auto_fix).
pub type FixFn = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// A declarative validation rule.
///
/// # Examples
///
/// ```
/// use clinote_validator::rules::{Rule, Severity};
/// use serde_json::Value;
///
/// let rule = Rule::new(
///     "dose_required",
///     "dose",
///     "A dose is required when a medication is selected",
///     |value: &Value, _form: &Value| !value.is_null(),
/// )
/// .with_dependency("medicationId");
///
/// assert_eq!(rule.field(), "dose");
/// assert_eq!(rule.severity(), Severity::Error);
/// ```
pub struct Rule {
    id: RuleId,
    field: Cow<'static, str>,
    severity: Severity,
    message: Cow<'static, str>,
    predicate: Predicate,
    auto_fix: Option<FixFn>,
    dependencies: SmallVec<[Cow<'static, str>; 2]>,
}

impl Rule {
    /// Creates a rule with the default `error` severity and no auto-fix
    /// or dependencies.
    pub fn new(
        id: impl Into<RuleId>,
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        predicate: impl Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            field: field.into(),
            severity: Severity::default(),
            message: message.into(),
            predicate: Box::new(predicate),
            auto_fix: None,
            dependencies: SmallVec::new(),
        }
    }

    /// Sets the severity.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Attaches a corrective transformation.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_auto_fix(mut self, fix: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        self.auto_fix = Some(Box::new(fix));
        self
    }

    /// Adds a dependency field path. When any dependency is absent or
    /// null in the form data, the rule is skipped entirely.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_dependency(mut self, path: impl Into<Cow<'static, str>>) -> Self {
        self.dependencies.push(path.into());
        self
    }

    /// Adds several dependency field paths.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_dependencies<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.dependencies.extend(paths.into_iter().map(Into::into));
        self
    }

    /// The rule's unique ID.
    #[must_use]
    pub fn id(&self) -> &RuleId {
        &self.id
    }

    /// Dotted path of the field this rule targets.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Blocking classification applied to failures of this rule.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Text shown when the rule fails.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the rule carries a corrective transformation.
    #[must_use]
    pub fn can_auto_fix(&self) -> bool {
        self.auto_fix.is_some()
    }

    /// Dependency field paths, in declaration order.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(|path| &**path)
    }

    /// True when every dependency resolves to a present, non-null value.
    pub(crate) fn dependencies_met(&self, form: &Value) -> bool {
        self.dependencies.iter().all(|path| json::is_set(form, path))
    }

    /// Runs the predicate against the field value and form snapshot.
    pub(crate) fn evaluate(&self, value: &Value, form: &Value) -> bool {
        (self.predicate)(value, form)
    }

    /// Applies the auto-fix, if any.
    pub(crate) fn apply_fix(&self, value: &Value) -> Option<Value> {
        self.auto_fix.as_ref().map(|fix| fix(value))
    }
}

// Manual because the closure fields are not Debug.
impl Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("field", &self.field)
            .field("severity", &self.severity)
            .field("message", &self.message)
            .field("predicate", &"<predicate>")
            .field("auto_fix", &self.auto_fix.is_some())
            .field("dependencies", &self.dependencies)
            .finish()
    }
}
