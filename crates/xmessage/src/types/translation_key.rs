use std::sync::RwLock;

use bon::Builder;
use const_fnv1a_hash::fnv1a_hash_str_64;

use crate::interpreter::{Context, RuleError, RuleResolver, render};
use crate::parser::{TemplateCache, global_templates};

/// A logical message: one source label plus its per-locale translation
/// variants.
///
/// The source label and description never change after construction; the
/// translation list is the only mutable state and is guarded so concurrent
/// `translate` calls observe a consistent snapshot.
///
/// # Example
///
/// ```
/// use xmessage::{CldrRules, Context, Translation, TranslationKey};
///
/// let key = TranslationKey::new("Hello World");
/// let rules = CldrRules::new("ru");
///
/// // No Russian translation yet: the source label renders.
/// assert_eq!(key.translate(&rules, &Context::new()).unwrap(), "Hello World");
///
/// key.add_translation(Translation::new("Привет Мир", "ru"));
/// assert_eq!(key.translate(&rules, &Context::new()).unwrap(), "Привет Мир");
/// ```
#[derive(Debug, Builder)]
#[builder(on(String, into))]
pub struct TranslationKey {
    /// The source template string, always renderable as a fallback.
    label: String,

    /// Optional description disambiguating identical labels.
    #[builder(default)]
    description: String,

    /// Per-locale translation variants, in declaration order.
    #[builder(skip)]
    translations: RwLock<Vec<super::Translation>>,
}

impl TranslationKey {
    /// Create a key for a source label with no description.
    pub fn new(label: impl Into<String>) -> Self {
        TranslationKey::builder().label(label).build()
    }

    /// The source label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The description, or an empty string.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Stable 64-bit identifier for this key.
    ///
    /// Hashes `label;;;description` so the same message in two different
    /// contexts gets two distinct keys.
    pub fn id(&self) -> u64 {
        fnv1a_hash_str_64(&format!("{};;;{}", self.label, self.description))
    }

    /// Append a translation variant.
    ///
    /// Takes effect for all subsequent `translate` calls; in-flight renders
    /// keep the snapshot they already selected.
    pub fn add_translation(&self, translation: super::Translation) {
        self.translations
            .write()
            .expect("translation list lock poisoned")
            .push(translation);
    }

    /// Remove all translation variants, reverting to source-label fallback.
    pub fn reset_translations(&self) {
        self.translations
            .write()
            .expect("translation list lock poisoned")
            .clear();
    }

    /// Number of registered translation variants.
    pub fn translation_count(&self) -> usize {
        self.translations
            .read()
            .expect("translation list lock poisoned")
            .len()
    }

    /// Render this message for the resolver's language, using the
    /// process-wide template cache.
    pub fn translate(&self, rules: &dyn RuleResolver, ctx: &Context) -> Result<String, RuleError> {
        self.translate_with_cache(global_templates(), rules, ctx)
    }

    /// Render this message with an injected template cache.
    ///
    /// Picks the template per the selection chain (first matching
    /// conditioned translation, else the locale default, else the source
    /// label), parses it through `cache`, and evaluates it against `ctx`.
    pub fn translate_with_cache(
        &self,
        cache: &TemplateCache,
        rules: &dyn RuleResolver,
        ctx: &Context,
    ) -> Result<String, RuleError> {
        let label = self.select_label(rules, ctx)?;
        let tree = cache.get_or_parse(&label);
        render(&tree, ctx, rules)
    }

    /// Pick the template string to render for the resolver's language.
    ///
    /// Translations for the language are tried in declaration order; an
    /// unconditioned translation always matches, so it doubles as the locale
    /// default when no conditioned variant applies first. Holds the read
    /// lock for the duration of selection so a concurrent
    /// `add_translation`/`reset_translations` never exposes a partially
    /// updated list.
    fn select_label(&self, rules: &dyn RuleResolver, ctx: &Context) -> Result<String, RuleError> {
        let translations = self
            .translations
            .read()
            .expect("translation list lock poisoned");

        let mut locale_default = None;
        for translation in translations.iter() {
            if translation.locale != rules.language() {
                continue;
            }
            if translation.is_default() {
                if locale_default.is_none() {
                    locale_default = Some(translation.label.clone());
                }
            } else if translation.matches(ctx, rules)? {
                return Ok(translation.label.clone());
            }
        }

        Ok(locale_default.unwrap_or_else(|| self.label.clone()))
    }
}
