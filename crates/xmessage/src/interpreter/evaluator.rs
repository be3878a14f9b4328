//! Substitution evaluator for parsed message templates.
//!
//! This is the tree-walking interpreter: it walks a [`TokenTree`]
//! depth-first against a [`Context`] and a [`RuleResolver`], concatenating
//! textual output. It never mutates its inputs, and it never aborts for a
//! template or context defect - unresolved references render as empty
//! strings and force fallback branches. Only rule resolver failures
//! propagate.

use std::fmt::Write as _;

use crate::interpreter::{Context, RuleError, RuleResolver};
use crate::parser::{Branch, PluralForm, Reference, Token, TokenTree};
use crate::types::Value;

/// Render a token tree to its final output string.
///
/// # Example
///
/// ```
/// use xmessage::{CldrRules, Context, parse_template, render};
///
/// let tree = parse_template("{0 || message}");
/// let rules = CldrRules::new("en");
///
/// let one = render(&tree, &Context::positional([1]), &rules).unwrap();
/// assert_eq!(one, "1 message");
///
/// let five = render(&tree, &Context::positional([5]), &rules).unwrap();
/// assert_eq!(five, "5 messages");
/// ```
pub fn render(
    tree: &TokenTree,
    ctx: &Context,
    rules: &dyn RuleResolver,
) -> Result<String, RuleError> {
    let mut output = String::new();
    render_tokens(&tree.tokens, ctx, rules, &mut output)?;
    Ok(output)
}

/// Whether a branch key names a category, accounting for the two plural
/// vocabularies in circulation: `singular`/`plural` branch keys match the
/// CLDR `one`/`other` categories and vice versa.
pub fn category_matches(key: &str, category: &str) -> bool {
    key == category
        || matches!(
            (key, category),
            ("singular", "one") | ("one", "singular") | ("plural", "other") | ("other", "plural")
        )
}

fn render_tokens(
    tokens: &[Token],
    ctx: &Context,
    rules: &dyn RuleResolver,
    out: &mut String,
) -> Result<(), RuleError> {
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Param { reference } => {
                out.push_str(&render_param(reference, ctx, rules)?);
            }
            Token::Number { reference, style } => {
                out.push_str(&render_number(reference, style.as_deref(), ctx));
            }
            Token::Choice {
                reference,
                branches,
            } => {
                if let Some(branch) = choice_branch(reference, branches, ctx, rules)? {
                    render_tokens(&branch.body, ctx, rules, out)?;
                }
            }
            Token::Map {
                reference,
                branches,
            } => {
                if let Some(branch) = map_branch(reference, branches, ctx) {
                    render_tokens(&branch.body, ctx, rules, out)?;
                }
            }
            Token::Anchor {
                reference,
                branches,
            } => {
                let href = resolve_href(reference, ctx);
                let branch = branches
                    .iter()
                    .find(|b| b.key == "text")
                    .or_else(|| branches.first());
                let mut inner = String::new();
                if let Some(branch) = branch {
                    render_tokens(&branch.body, ctx, rules, &mut inner)?;
                }
                let _ = write!(out, "<a href='{href}'>{inner}</a>");
            }
            Token::PluralShorthand { reference, forms } => {
                out.push_str(&render_shorthand(reference, forms, ctx, rules)?);
            }
            Token::Decoration { label, body } => {
                out.push_str(&render_decoration(label, body, ctx, rules)?);
            }
        }
    }
    Ok(())
}

/// Render a simple parameter, applying gendered word forms and the
/// grammatical-case modifier.
fn render_param(
    reference: &Reference,
    ctx: &Context,
    rules: &dyn RuleResolver,
) -> Result<String, RuleError> {
    let Some(value) = ctx.resolve(&reference.target) else {
        return Ok(String::new());
    };

    let mut text = if reference.gender_forms.is_empty() {
        value.to_string()
    } else {
        // Word-form list order follows the resolver's declared gender
        // category order; the first form is the fallback.
        let index = rules
            .gender_of(value)
            .and_then(|cat| {
                rules
                    .gender_categories()
                    .iter()
                    .position(|c| category_matches(c, &cat))
            })
            .unwrap_or(0);
        reference
            .gender_forms
            .get(index)
            .or_else(|| reference.gender_forms.first())
            .cloned()
            .unwrap_or_default()
    };

    if let Some(case) = &reference.case {
        text = rules.apply_case(&text, case)?;
    }
    Ok(text)
}

/// Render a value as a plain decimal number; non-numeric values render as
/// empty strings.
fn render_number(reference: &Reference, style: Option<&str>, ctx: &Context) -> String {
    let Some(value) = ctx.resolve(&reference.target) else {
        return String::new();
    };
    if style == Some("integer") {
        return value.as_number().map(|n| n.to_string()).unwrap_or_default();
    }
    match value {
        Value::Number(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        Value::String(s) if s.trim().parse::<f64>().is_ok() => s.trim().to_string(),
        other => other.as_number().map(|n| n.to_string()).unwrap_or_default(),
    }
}

/// Pick a choice branch by the value's plural or gender category.
fn choice_branch<'a>(
    reference: &Reference,
    branches: &'a [Branch],
    ctx: &Context,
    rules: &dyn RuleResolver,
) -> Result<Option<&'a Branch>, RuleError> {
    let category = match ctx.resolve(&reference.target) {
        Some(value) => match value.as_number() {
            Some(n) => Some(rules.pluralize(n)?),
            None => rules.gender_of(value),
        },
        None => None,
    };

    if let Some(cat) = &category {
        if let Some(branch) = branches.iter().find(|b| category_matches(&b.key, cat)) {
            return Ok(Some(branch));
        }
    }
    Ok(branches
        .iter()
        .find(|b| b.key == "other")
        .or_else(|| branches.last()))
}

/// Pick a map branch by exact string equality, falling back to a branch
/// keyed `other` if present, else nothing.
fn map_branch<'a>(reference: &Reference, branches: &'a [Branch], ctx: &Context) -> Option<&'a Branch> {
    let matched = ctx.resolve(&reference.target).and_then(|value| {
        let key = value.to_string();
        branches.iter().find(|b| b.key == key)
    });
    matched.or_else(|| branches.iter().find(|b| b.key == "other"))
}

/// Resolve the href for an anchor: a string value, or a token object's
/// `href` field. Unresolvable hrefs render empty.
fn resolve_href(reference: &Reference, ctx: &Context) -> String {
    match ctx.resolve(&reference.target) {
        Some(Value::String(s)) => s.clone(),
        Some(value @ Value::Map(_)) => value
            .field("href")
            .map(ToString::to_string)
            .unwrap_or_default(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Render a plural shorthand: the number, a space, and the selected form.
fn render_shorthand(
    reference: &Reference,
    forms: &[PluralForm],
    ctx: &Context,
    rules: &dyn RuleResolver,
) -> Result<String, RuleError> {
    let Some(value) = ctx.resolve(&reference.target) else {
        return Ok(String::new());
    };
    let Some(n) = value.as_number() else {
        return Ok(value.to_string());
    };
    let number_text = value.to_string();
    let category = rules.pluralize(n)?;

    let labeled = forms.iter().any(|f| f.category.is_some());
    if labeled {
        let form = forms
            .iter()
            .find(|f| {
                f.category
                    .as_deref()
                    .is_some_and(|c| category_matches(c, &category))
            })
            .or_else(|| forms.iter().find(|f| f.category.as_deref() == Some("other")))
            .or_else(|| forms.last());
        return Ok(match form {
            Some(form) => format!("{number_text} {}", form.text),
            None => number_text,
        });
    }

    // Positional forms index into the language's declared category order.
    let order = rules.plural_categories();
    let position = order
        .iter()
        .position(|c| category_matches(c, &category))
        .unwrap_or(order.len().saturating_sub(1));

    if let [only] = forms {
        // Two-way shorthand with a single written form: derive the plural
        // form mechanically where the language supports it.
        let text = if position == 0 {
            only.text.clone()
        } else {
            rules.plural_form(&only.text).unwrap_or_else(|| only.text.clone())
        };
        return Ok(format!("{number_text} {text}"));
    }

    Ok(match forms.get(position.min(forms.len().saturating_sub(1))) {
        Some(form) => format!("{number_text} {}", form.text),
        None => number_text,
    })
}

/// Render a decoration: evaluate the body, then pass it through the
/// decorator registered under the label, if any.
fn render_decoration(
    label: &str,
    body: &[Token],
    ctx: &Context,
    rules: &dyn RuleResolver,
) -> Result<String, RuleError> {
    let mut inner = String::new();
    render_tokens(body, ctx, rules, &mut inner)?;

    if let Some(template) = ctx.decorator(label) {
        return Ok(apply_decorator(template, &inner));
    }

    // A context value under the same label can also decorate: a format
    // string with a $0 placeholder, or a link object with an href.
    match ctx.get(label) {
        Some(Value::String(template)) if template.contains("$0") => {
            Ok(apply_decorator(template, &inner))
        }
        Some(value @ Value::Map(_)) => match value.field("href") {
            Some(href) => Ok(format!("<a href='{href}'>{inner}</a>")),
            None => Ok(inner),
        },
        _ => Ok(inner),
    }
}

fn apply_decorator(template: &str, inner: &str) -> String {
    if template.contains("{$0}") {
        template.replace("{$0}", inner)
    } else {
        template.replace("$0", inner)
    }
}
