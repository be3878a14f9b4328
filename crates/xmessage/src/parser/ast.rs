//! Public AST types for parsed message templates.
//!
//! These types are public to enable external tooling (linters, extractors)
//! to inspect parsed templates.

/// A parsed template: an immutable, acyclic sequence of tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenTree {
    pub tokens: Vec<Token>,
}

/// A single node of the token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Verbatim output text.
    Literal(String),

    /// A simple substitution: `{0}`, `{user.name}`, `{user::gen}`,
    /// `{user | his, her}`.
    Param { reference: Reference },

    /// Plain number formatting: `{0,number}` or `{:n,number,integer}`.
    Number {
        reference: Reference,
        style: Option<String>,
    },

    /// Category-selected branching: `{0,choice,singular#...|plural#...}`.
    Choice {
        reference: Reference,
        branches: Vec<Branch>,
    },

    /// Exact-value branching: `{2,map,photo#photo|video#video}`.
    Map {
        reference: Reference,
        branches: Vec<Branch>,
    },

    /// Hyperlink wrapping: `{0,anchor,text#messages}` or the `link` keyword
    /// variant taking its href from a structured token object.
    Anchor {
        reference: Reference,
        branches: Vec<Branch>,
    },

    /// Inline decoration: `[bold: body]`.
    Decoration { label: String, body: Vec<Token> },

    /// Plural shorthand: `{count || message, messages}` or
    /// `{count || one: x, few: y, other: z}`.
    PluralShorthand {
        reference: Reference,
        forms: Vec<PluralForm>,
    },
}

/// One form of a plural shorthand.
///
/// Labeled forms (`one: сообщение`) carry their category; positional forms
/// are indexed by the rule resolver's declared plural category order.
#[derive(Debug, Clone, PartialEq)]
pub struct PluralForm {
    pub category: Option<String>,
    pub text: String,
}

/// A keyed sub-template selected by category or exact value.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub key: String,
    pub body: Vec<Token>,
}

/// What a construct points at, plus its grammatical annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub target: Target,
    /// Grammatical-case modifier from `::caseName`.
    pub case: Option<String>,
    /// Gendered word forms from `ref | form, form, ...`, in the rule
    /// resolver's declared gender category order.
    pub gender_forms: Vec<String>,
}

impl Reference {
    /// A bare reference with no case or gender annotations.
    pub fn plain(target: Target) -> Reference {
        Reference {
            target,
            case: None,
            gender_forms: Vec::new(),
        }
    }
}

/// Reference target: zero-based positional index or a (dot-path) name.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Index(usize),
    Name(String),
}
