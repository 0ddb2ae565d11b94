//! Declarative model validation.
//!
//! Each model implements [`Validate`] by declaring its rules on a [`Rules`]
//! collector. Running the rules never fails and never stops early; only
//! [`validate`] turns a non-empty result into a [`ValidationFailure`].

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Dotted path of the offending field, e.g. `BillingAddress.City`.
    pub field: String,
    pub message: String,
    pub attempted_value: Value,
    /// Optional rule-specific detail (limits, patterns, ...).
    pub state: Option<Value>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Raised before any network call when a model has at least one violation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    violations: Vec<Violation>,
}

impl ValidationFailure {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.violations.len())?;
        for (idx, violation) in self.violations.iter().enumerate() {
            f.write_str(if idx == 0 { ": " } else { "; " })?;
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// A model with declared validation rules.
pub trait Validate {
    /// Declare every rule for this model on `rules`.
    fn rules(&self, rules: &mut Rules);

    /// Run all rules and collect every violation.
    fn violations(&self) -> Vec<Violation> {
        let mut rules = Rules::new();
        self.rules(&mut rules);
        rules.into_violations()
    }
}

/// Run a model's rules; `Err` carries every violation when any rule failed.
pub fn validate<M: Validate + ?Sized>(model: &M) -> Result<(), ValidationFailure> {
    let violations = model.violations();
    if violations.is_empty() {
        return Ok(());
    }
    tracing::debug!(count = violations.len(), "model failed validation");
    Err(ValidationFailure { violations })
}

/// Collector for rule outcomes.
#[derive(Debug, Default)]
pub struct Rules {
    violations: Vec<Violation>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field` unless `passed`.
    pub fn check<V: Serialize + ?Sized>(
        &mut self,
        field: &str,
        passed: bool,
        message: impl Into<String>,
        attempted: &V,
    ) -> &mut Self {
        if !passed {
            self.push(field, message.into(), attempted, None);
        }
        self
    }

    /// Like [`Rules::check`], attaching rule-specific `state` to the violation.
    pub fn check_with_state<V: Serialize + ?Sized>(
        &mut self,
        field: &str,
        passed: bool,
        message: impl Into<String>,
        attempted: &V,
        state: Value,
    ) -> &mut Self {
        if !passed {
            self.push(field, message.into(), attempted, Some(state));
        }
        self
    }

    /// `{field} is required` unless `id` is a positive identifier.
    pub fn require_id(&mut self, field: &str, id: i64) -> &mut Self {
        self.check(field, rules::is_positive_id(id), required(field), &id)
    }

    /// `{field} is required` unless `value` is present.
    pub fn require_present<T: Serialize>(&mut self, field: &str, value: &Option<T>) -> &mut Self {
        self.check(field, rules::is_present(value), required(field), value)
    }

    /// `{field} is required` unless `value` has non-whitespace content.
    pub fn require_text(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        let passed = value.is_some_and(rules::is_not_blank);
        self.check(field, passed, required(field), &value)
    }

    /// Length limit on an optional text field; absent text passes.
    pub fn max_length(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        let passed = value.is_none_or(|text| rules::fits_length(text, max));
        self.check_with_state(
            field,
            passed,
            format!("{field} must be {max} characters or fewer"),
            &value,
            serde_json::json!({ "max_length": max }),
        )
    }

    /// Run `declare` only when `guard` holds.
    pub fn when(&mut self, guard: bool, declare: impl FnOnce(&mut Self)) -> &mut Self {
        if guard {
            declare(self);
        }
        self
    }

    /// Validate a composed sub-model, prefixing its field paths with `field`.
    ///
    /// An absent sub-model contributes nothing.
    pub fn nested<M: Validate + ?Sized>(&mut self, field: &str, model: Option<&M>) -> &mut Self {
        let Some(model) = model else {
            return self;
        };
        for mut violation in model.violations() {
            violation.field = format!("{field}.{}", violation.field);
            self.violations.push(violation);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    fn push<V: Serialize + ?Sized>(
        &mut self,
        field: &str,
        message: String,
        attempted: &V,
        state: Option<Value>,
    ) {
        self.violations.push(Violation {
            field: field.to_owned(),
            message,
            attempted_value: serde_json::to_value(attempted).unwrap_or(Value::Null),
            state,
        });
    }
}

fn required(field: &str) -> String {
    format!("{field} is required")
}

/// Reusable rule predicates shared by model validators.
pub mod rules {
    use chrono::{DateTime, Utc};

    pub fn is_positive_id(id: i64) -> bool {
        id > 0
    }

    pub fn is_present<T>(value: &Option<T>) -> bool {
        value.is_some()
    }

    pub fn is_not_blank(value: &str) -> bool {
        !value.trim().is_empty()
    }

    pub fn fits_length(value: &str, max: usize) -> bool {
        value.chars().count() <= max
    }

    /// Loose shape check: one `@`, non-empty local part, dotted domain.
    pub fn is_email(value: &str) -> bool {
        let Some((local, domain)) = value.trim().split_once('@') else {
            return false;
        };
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .split('.')
                .filter(|label| !label.is_empty())
                .count()
                >= 2
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    }

    /// Parses as a phone number, assuming US numbering when no country prefix is given.
    pub fn is_phone_number(value: &str) -> bool {
        let value = value.trim();
        !value.is_empty()
            && phonenumber::parse(Some(phonenumber::country::Id::US), value)
                .is_ok_and(|parsed| phonenumber::is_valid(&parsed))
    }

    /// Same calendar day as `now` (UTC) or later.
    pub fn is_not_before_today(value: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        value.date_naive() >= now.date_naive()
    }
}
