//! CLDR-backed rule resolver.
//!
//! This is the bundled adapter behind the [`RuleResolver`] contract:
//! plural categories come from `icu_plurals`, the built-in `upper`/`lower`
//! cases from `icu_casemap`, and language-specific case inflections are
//! registered as closures (the concrete per-language inflection data stays
//! external to the core).
//!
//! Different languages have different plural rules - English has "one" and
//! "other", while Russian has "one", "few", "many", and "other", and Arabic
//! uses all six categories.
//!
//! `PluralRules` instances are cached per thread per language: the icu data
//! yokes are not `Send`/`Sync`, so they cannot live in the resolver struct
//! itself, which must cross threads.

use std::cell::RefCell;
use std::collections::HashMap;

use icu_casemap::CaseMapper;
use icu_locale_core::{Locale, LanguageIdentifier, locale};
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};
use unicode_segmentation::UnicodeSegmentation;

use crate::interpreter::error::compute_suggestions;
use crate::interpreter::{RuleError, RuleResolver};

/// Supported language codes for plural rule resolution.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "bn", "de", "el", "en", "es", "fa", "fr", "he", "hi", "id", "it", "ja", "ko", "nl", "pl",
    "pt", "ro", "ru", "th", "tr", "uk", "vi", "zh",
];

/// Built-in case names available for every language.
const BUILTIN_CASES: &[&str] = &["cap", "lower", "upper"];

type CaseFn = Box<dyn Fn(&str) -> String + Send + Sync>;

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by language code.
    static PLURAL_RULES_CACHE: RefCell<Vec<(&'static str, PluralRules)>> = const { RefCell::new(Vec::new()) };
}

/// ICU-backed [`RuleResolver`] for a single language.
///
/// # Example
///
/// ```
/// use xmessage::{CldrRules, RuleResolver};
///
/// // English: 1 = "one", everything else = "other"
/// let en = CldrRules::new("en");
/// assert_eq!(en.pluralize(1).unwrap(), "one");
/// assert_eq!(en.pluralize(5).unwrap(), "other");
///
/// // Russian: complex rules for "one", "few", "many", "other"
/// let ru = CldrRules::new("ru");
/// assert_eq!(ru.pluralize(1).unwrap(), "one");
/// assert_eq!(ru.pluralize(2).unwrap(), "few");
/// assert_eq!(ru.pluralize(5).unwrap(), "many");
/// ```
pub struct CldrRules {
    /// Language code as given at construction (matched against translation
    /// locales).
    language: String,
    /// Normalized primary subtag used for the ICU tables.
    normalized: &'static str,
    langid: LanguageIdentifier,
    plural_categories: Vec<String>,
    gender_categories: Vec<String>,
    cases: HashMap<String, CaseFn>,
}

impl CldrRules {
    /// Build a resolver for a language code.
    ///
    /// Unrecognized codes fall back to English rules, matching the
    /// tolerant posture of the rest of the pipeline; the code itself is
    /// kept verbatim for translation locale matching.
    pub fn new(language: impl Into<String>) -> Self {
        let language = language.into();
        let primary = language
            .split(['-', '_'])
            .next()
            .unwrap_or(language.as_str());
        let normalized = normalize_lang(primary);
        let loc = icu_locale(normalized);

        CldrRules {
            language,
            normalized,
            langid: loc.id,
            plural_categories: plural_order(normalized)
                .iter()
                .map(ToString::to_string)
                .collect(),
            gender_categories: vec![
                "male".to_string(),
                "female".to_string(),
                "other".to_string(),
            ],
            cases: HashMap::new(),
        }
    }

    /// Register a case inflection under `name`.
    ///
    /// Registered cases take precedence over the built-ins, so a language
    /// can override `cap` and friends.
    ///
    /// # Example
    ///
    /// ```
    /// use xmessage::{CldrRules, RuleResolver};
    ///
    /// let mut ru = CldrRules::new("ru");
    /// ru.register_case("gen", |name: &str| match name {
    ///     "Михаил" => "Михаила".to_string(),
    ///     other => other.to_string(),
    /// });
    /// assert_eq!(ru.apply_case("Михаил", "gen").unwrap(), "Михаила");
    /// ```
    pub fn register_case(
        &mut self,
        name: impl Into<String>,
        case: impl Fn(&str) -> String + Send + Sync + 'static,
    ) {
        self.cases.insert(name.into(), Box::new(case));
    }

    /// All case names this resolver answers for, sorted.
    pub fn case_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.cases.keys().cloned().collect();
        for builtin in BUILTIN_CASES {
            if !self.cases.contains_key(*builtin) {
                names.push((*builtin).to_string());
            }
        }
        names.sort();
        names
    }
}

impl RuleResolver for CldrRules {
    fn language(&self) -> &str {
        &self.language
    }

    fn pluralize(&self, n: i64) -> Result<String, RuleError> {
        Ok(plural_category(self.normalized, n).to_string())
    }

    fn apply_case(&self, text: &str, case: &str) -> Result<String, RuleError> {
        if let Some(inflect) = self.cases.get(case) {
            return Ok(inflect(text));
        }
        match case {
            "upper" => Ok(CaseMapper::new()
                .uppercase_to_string(text, &self.langid)
                .into_owned()),
            "lower" => Ok(CaseMapper::new()
                .lowercase_to_string(text, &self.langid)
                .into_owned()),
            "cap" => Ok(capitalize(text)),
            _ => {
                let available = self.case_names();
                Err(RuleError::UnknownCase {
                    language: self.language.clone(),
                    case: case.to_string(),
                    suggestions: compute_suggestions(case, &available),
                    available,
                })
            }
        }
    }

    fn plural_categories(&self) -> &[String] {
        &self.plural_categories
    }

    fn gender_categories(&self) -> &[String] {
        &self.gender_categories
    }

    fn plural_form(&self, word: &str) -> Option<String> {
        if self.normalized == "en" {
            Some(english_plural(word))
        } else {
            None
        }
    }
}

/// Plural category for a number under a normalized language's CLDR rules.
///
/// Rules are built on first use within each thread and reused afterwards.
fn plural_category(lang: &'static str, n: i64) -> &'static str {
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some(entry) = cache.iter().find(|(code, _)| *code == lang) {
            return category_str(entry.1.category_for(n));
        }
        let rules = build_rules(lang);
        let category = category_str(rules.category_for(n));
        cache.push((lang, rules));
        category
    })
}

/// Build `PluralRules` for a normalized language code.
fn build_rules(lang: &'static str) -> PluralRules {
    let loc = icu_locale(lang);
    PluralRules::try_new(loc.into(), PluralRuleType::Cardinal.into())
        .expect("locale should be supported")
}

/// Normalize a language code to a supported static string reference.
///
/// Returns the canonical `&'static str` for the language, or `"en"` for
/// unrecognized codes.
fn normalize_lang(lang: &str) -> &'static str {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|&&code| code == lang)
        .copied()
        .unwrap_or("en")
}

/// ICU locale for a normalized language code.
fn icu_locale(lang: &'static str) -> Locale {
    match lang {
        "ru" => locale!("ru"),
        "ar" => locale!("ar"),
        "de" => locale!("de"),
        "es" => locale!("es"),
        "fr" => locale!("fr"),
        "it" => locale!("it"),
        "pt" => locale!("pt"),
        "ja" => locale!("ja"),
        "zh" => locale!("zh"),
        "ko" => locale!("ko"),
        "nl" => locale!("nl"),
        "pl" => locale!("pl"),
        "tr" => locale!("tr"),
        "uk" => locale!("uk"),
        "vi" => locale!("vi"),
        "th" => locale!("th"),
        "id" => locale!("id"),
        "el" => locale!("el"),
        "ro" => locale!("ro"),
        "fa" => locale!("fa"),
        "bn" => locale!("bn"),
        "hi" => locale!("hi"),
        "he" => locale!("he"),
        _ => locale!("en"),
    }
}

/// Plural categories in CLDR declaration order, used for positional
/// shorthand indexing.
fn plural_order(lang: &'static str) -> &'static [&'static str] {
    match lang {
        "ru" | "uk" | "pl" => &["one", "few", "many", "other"],
        "ar" => &["zero", "one", "two", "few", "many", "other"],
        "ro" => &["one", "few", "other"],
        "he" => &["one", "two", "other"],
        "ja" | "zh" | "ko" | "th" | "vi" | "id" => &["other"],
        _ => &["one", "other"],
    }
}

/// Translate a `PluralCategory` enum to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Uppercase the first grapheme, leaving the rest untouched.
fn capitalize(text: &str) -> String {
    let mut graphemes = text.graphemes(true);
    match graphemes.next() {
        Some(first) => first.to_uppercase() + graphemes.as_str(),
        None => String::new(),
    }
}

/// Mechanical English pluralization for single-form shorthands.
fn english_plural(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{word}es");
    }
    if lower.ends_with('y') {
        let stem = &word[..word.len() - 1];
        let penultimate = lower.chars().rev().nth(1);
        if !penultimate.is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')) {
            return format!("{stem}ies");
        }
    }
    format!("{word}s")
}
