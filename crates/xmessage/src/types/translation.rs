use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::interpreter::{Context, RuleError, RuleResolver, category_matches};
use crate::parser::Target;

/// One locale-specific alternative template for a logical message.
///
/// Unconditioned translations are the default for their locale. When
/// `conditions` is present, the translation only applies if every condition
/// matches the runtime context at selection time.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct Translation {
    /// The template string in the target locale.
    pub label: String,

    /// Locale code this translation belongs to (e.g. "ru").
    pub locale: String,

    /// Applicability conditions, matched against the runtime context.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Translation {
    /// Create an unconditioned translation for a locale.
    pub fn new(label: impl Into<String>, locale: impl Into<String>) -> Self {
        Translation {
            label: label.into(),
            locale: locale.into(),
            conditions: Vec::new(),
        }
    }

    /// Whether this translation is the unconditioned default for its locale.
    pub fn is_default(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check all conditions against the runtime context.
    ///
    /// An unconditioned translation always matches. Rule resolver failures
    /// propagate; they indicate a rule-table gap, not a template defect.
    pub fn matches(&self, ctx: &Context, rules: &dyn RuleResolver) -> Result<bool, RuleError> {
        for condition in &self.conditions {
            if !condition.matches(ctx, rules)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// A single applicability condition on a [`Translation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// The named token's plural or gender category must match.
    Category { token: String, category: String },

    /// The named token's stringified value must match exactly.
    Equals { token: String, value: String },
}

impl Condition {
    /// Evaluate this condition against the runtime context.
    ///
    /// An unresolvable token never matches; category conditions resolve the
    /// token's category the same way choice branches do (plural category for
    /// numeric values, gender category otherwise).
    pub fn matches(&self, ctx: &Context, rules: &dyn RuleResolver) -> Result<bool, RuleError> {
        match self {
            Condition::Category { token, category } => {
                let Some(value) = ctx.resolve(&Target::Name(token.clone())) else {
                    return Ok(false);
                };
                let resolved = if let Some(n) = value.as_number() {
                    Some(rules.pluralize(n)?)
                } else {
                    rules.gender_of(value)
                };
                Ok(resolved.is_some_and(|cat| category_matches(category, &cat)))
            }
            Condition::Equals { token, value } => {
                let Some(actual) = ctx.resolve(&Target::Name(token.clone())) else {
                    return Ok(false);
                };
                Ok(actual.to_string() == *value)
            }
        }
    }
}
