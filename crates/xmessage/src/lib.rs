//! Locale-aware message template rendering.
//!
//! A template embeds argument references, numeric formatting,
//! pluralization, exact-value branching, hyperlink wrapping,
//! grammatical-case transforms, gendered word forms, and inline
//! decorations. Given a template, a runtime [`Context`], and a language's
//! [`RuleResolver`], rendering deterministically produces one output
//! string:
//!
//! ```
//! use xmessage::{CldrRules, Context, parse_template, render};
//!
//! let tree = parse_template("{0} {0,choice,singular#member|plural#members}");
//! let rules = CldrRules::new("en");
//! let out = render(&tree, &Context::positional([5]), &rules).unwrap();
//! assert_eq!(out, "5 members");
//! ```
//!
//! [`TranslationKey`] sits above the pipeline and selects which per-locale
//! template variant to render for a logical message.

pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    CldrRules, Context, RuleError, RuleResolver, category_matches, compute_suggestions, render,
};
pub use parser::{TemplateCache, TokenTree, global_templates, parse_template};
pub use types::{Condition, Translation, TranslationKey, Value};

/// Creates a [`Context`] of named arguments from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats, strings,
/// and token objects can be passed directly.
///
/// # Example
///
/// ```
/// use xmessage::{tokens, Value};
///
/// let ctx = tokens! { "count" => 3, "user" => Value::entity("Michael", "male") };
/// assert!(ctx.get("count").is_some());
/// ```
#[macro_export]
macro_rules! tokens {
    {} => {
        $crate::Context::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut ctx = $crate::Context::new();
            $(
                ctx.insert($key, ::std::convert::Into::<$crate::Value>::into($value));
            )+
            ctx
        }
    };
}
