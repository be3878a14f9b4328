//! The per-language grammar rule contract consumed by the evaluator.

use crate::interpreter::RuleError;
use crate::types::Value;

/// Language-specific grammar rules: pluralization, grammatical gender, and
/// case inflection.
///
/// Categories are opaque strings matched against branch keys. The core
/// never interprets them beyond equality (with the `singular`/`one` and
/// `plural`/`other` vocabulary aliases handled at branch selection).
///
/// Implementations are supplied externally per language; [`CldrRules`] is
/// the bundled ICU-backed adapter.
///
/// [`CldrRules`]: crate::CldrRules
pub trait RuleResolver: Send + Sync {
    /// The language code this resolver answers for (e.g. "en", "ru").
    fn language(&self) -> &str;

    /// Pluralization category for a number.
    fn pluralize(&self, n: i64) -> Result<String, RuleError>;

    /// Inflect text into the named grammatical case.
    ///
    /// An unregistered case name is a rule-table gap and must error rather
    /// than silently pass the text through.
    fn apply_case(&self, text: &str, case: &str) -> Result<String, RuleError>;

    /// Plural categories in declaration order, used to index positional
    /// shorthand forms (e.g. en: `one, other`; ru: `one, few, many, other`).
    fn plural_categories(&self) -> &[String];

    /// Gender categories in declaration order, used to index gendered
    /// word-form lists (e.g. `male, female, other`).
    fn gender_categories(&self) -> &[String];

    /// Gender category of a value, if it exposes or maps to one.
    ///
    /// The default reads a `gender` field from token objects and accepts
    /// strings that already name a declared category.
    fn gender_of(&self, value: &Value) -> Option<String> {
        match value {
            Value::Map(_) => value
                .field("gender")
                .and_then(Value::as_string)
                .map(ToString::to_string),
            Value::String(s) if self.gender_categories().iter().any(|c| c == s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Derive the plural form of a word, for single-form shorthands like
    /// `{count || message}`. Languages without a mechanical pluralizer
    /// return `None` and the shorthand reuses its only form.
    fn plural_form(&self, _word: &str) -> Option<String> {
        None
    }
}
