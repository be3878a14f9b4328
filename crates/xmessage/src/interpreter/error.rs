//! Error types for the substitution evaluator and rule resolvers.
//!
//! Malformed templates and unresolved references never error; they degrade
//! per the tolerant rendering policy. Only rule resolver contract failures
//! surface here, because they indicate a gap in the externally supplied
//! rule table rather than a template or context defect.

use thiserror::Error;

/// A rule resolver query failure.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The requested grammatical case is not registered for the language.
    #[error(
        "unknown grammatical case '{case}' for language '{language}', available: {}",
        available.join(", ")
    )]
    UnknownCase {
        language: String,
        case: String,
        available: Vec<String>,
        /// Closest registered case names, for the caller's diagnostics.
        suggestions: Vec<String>,
    },

    /// Plural rules could not be resolved for the language.
    #[error("plural rules unavailable for language '{language}': {message}")]
    Plural { language: String, message: String },
}

/// Compute typo suggestions for `name` from the available candidates.
///
/// Uses Levenshtein distance with a threshold scaled to the input length
/// and returns at most three candidates, closest first.
pub fn compute_suggestions(name: &str, available: &[String]) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = strsim::levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate.clone()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
