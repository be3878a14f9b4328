//! Runtime argument context for substitution.

use std::collections::HashMap;

use crate::parser::Target;
use crate::types::Value;

/// The runtime context a template is rendered against.
///
/// Carries positional arguments (`{0}`), named arguments (`{user.name}`,
/// resolved by dot path through nested maps), and decorator definitions
/// for `[label: ...]` constructs. Rendering never mutates the context.
///
/// # Example
///
/// ```
/// use xmessage::Context;
///
/// let mut ctx = Context::positional(["google.com"]);
/// ctx.insert("count", 5);
/// ctx.set_decorator("bold", "<strong>{$0}</strong>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    positional: Vec<Value>,
    named: HashMap<String, Value>,
    decorators: HashMap<String, String>,
}

impl Context {
    /// An empty context.
    pub fn new() -> Self {
        Context::default()
    }

    /// Build a context from positional arguments.
    pub fn positional<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Context {
            positional: values.into_iter().map(Into::into).collect(),
            ..Context::default()
        }
    }

    /// Build a context from named arguments.
    pub fn named(values: HashMap<String, Value>) -> Self {
        Context {
            named: values,
            ..Context::default()
        }
    }

    /// Append a positional argument.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.positional.push(value.into());
    }

    /// Insert a named argument.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.named.insert(name.into(), value.into());
    }

    /// Define a decorator template for `[label: ...]` constructs.
    ///
    /// The template's `$0` (or `{$0}`) placeholder receives the decorated
    /// body.
    pub fn set_decorator(&mut self, label: impl Into<String>, template: impl Into<String>) {
        self.decorators.insert(label.into(), template.into());
    }

    /// Look up a decorator template.
    pub fn decorator(&self, label: &str) -> Option<&str> {
        self.decorators.get(label).map(String::as_str)
    }

    /// Look up a named argument without path traversal.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Resolve a reference target, descending dot paths through nested
    /// maps (`user.name`). Returns `None` for anything unresolvable.
    pub fn resolve(&self, target: &Target) -> Option<&Value> {
        match target {
            Target::Index(i) => self.positional.get(*i),
            Target::Name(path) => {
                let mut parts = path.split('.');
                let mut value = self.named.get(parts.next()?)?;
                for part in parts {
                    value = value.field(part)?;
                }
                Some(value)
            }
        }
    }
}
