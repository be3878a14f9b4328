//! Template tokenizer/parser.
//!
//! This module converts raw template strings into immutable token trees.
//! Parsing is total: malformed spans degrade to literal text. Trees for
//! repeated strings are memoized through [`TemplateCache`].

pub mod ast;
mod cache;
mod template;

pub use ast::{Branch, PluralForm, Reference, Target, Token, TokenTree};
pub use cache::{TemplateCache, global_templates};
pub use template::parse_template;
