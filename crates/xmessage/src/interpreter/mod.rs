//! Substitution evaluator and grammar rule contracts.
//!
//! This module walks parsed token trees against a runtime [`Context`] and
//! a per-language [`RuleResolver`], producing final output strings.

mod cldr;
mod context;
mod error;
mod evaluator;
mod rules;

pub use cldr::CldrRules;
pub use context::Context;
pub use error::{RuleError, compute_suggestions};
pub use evaluator::{category_matches, render};
pub use rules::RuleResolver;
