use std::collections::HashMap;

/// A runtime value that can be bound to a template reference.
///
/// The `Value` enum provides a dynamic type system for substitution
/// arguments, allowing numbers, floats, strings, and structured token
/// objects to be passed interchangeably.
///
/// # Example
///
/// ```
/// use xmessage::Value;
///
/// // Numbers become Value::Number
/// let count: Value = 42.into();
///
/// // Strings become Value::String
/// let name: Value = "Alice".into();
///
/// // Structured token objects become Value::Map
/// let link = Value::link("google.com");
/// assert_eq!(link.field("href").and_then(|v| v.as_string()), Some("google.com"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer number (used for plural selection).
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value.
    String(String),

    /// A structured token object with named fields (supports dot-path
    /// lookup and the `href` / `gender` / `value` conventions).
    Map(HashMap<String, Value>),
}

impl Value {
    /// Build a link token object: a map exposing an `href` field.
    pub fn link(href: impl Into<String>) -> Value {
        Value::Map(HashMap::from([(
            "href".to_string(),
            Value::String(href.into()),
        )]))
    }

    /// Build an entity token object: a map exposing `value` and `gender`
    /// fields, as used for gender-aware substitution.
    pub fn entity(value: impl Into<String>, gender: impl Into<String>) -> Value {
        Value::Map(HashMap::from([
            ("value".to_string(), Value::String(value.into())),
            ("gender".to_string(), Value::String(gender.into())),
        ]))
    }

    /// Get this value as an integer, if it is numeric.
    ///
    /// Numeric strings and maps with a numeric `value` field also count,
    /// since templates routinely receive counts in any of those shapes.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Float(f) => Some(*f as i64),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            Value::Map(fields) => fields.get("value").and_then(Value::as_number),
        }
    }

    /// Get this value as a float, if it is one.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Number(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get a named field from this value, if it is a map.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Map(fields) => fields.get(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            // Token objects display their `value` field; a map with no
            // display value renders as nothing rather than debug noise.
            Value::Map(fields) => match fields.get("value") {
                Some(v) => write!(f, "{v}"),
                None => Ok(()),
            },
        }
    }
}

// From implementations for common types

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as i64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as i64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(fields: HashMap<String, Value>) -> Self {
        Value::Map(fields)
    }
}
