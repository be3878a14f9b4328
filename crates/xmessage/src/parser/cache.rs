//! Process-wide memoization of parsed templates.
//!
//! Trees are keyed by the exact source string. Templates are immutable
//! text, so the cache is append-only and never invalidated; concurrent
//! insertion of the same string is idempotent.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use super::ast::TokenTree;
use super::template::parse_template;

/// An append-only cache of parsed token trees, keyed by source string.
///
/// The cache is injectable so tests can use a fresh instance instead of
/// sharing the process-wide one from [`global_templates`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use xmessage::parser::TemplateCache;
///
/// let cache = TemplateCache::new();
/// let first = cache.get_or_parse("{0} members");
/// let second = cache.get_or_parse("{0} members");
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
#[derive(Debug, Default)]
pub struct TemplateCache {
    trees: RwLock<HashMap<String, Arc<TokenTree>>>,
}

impl TemplateCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        TemplateCache::default()
    }

    /// Look up or parse a template string.
    ///
    /// Repeated calls with the same string return the same shared tree.
    pub fn get_or_parse(&self, template: &str) -> Arc<TokenTree> {
        {
            let trees = self.trees.read().expect("template cache lock poisoned");
            if let Some(tree) = trees.get(template) {
                return Arc::clone(tree);
            }
        }
        // Parse outside the write lock; a racing insert of the same string
        // produces an equal tree and the first one in wins.
        let tree = Arc::new(parse_template(template));
        let mut trees = self.trees.write().expect("template cache lock poisoned");
        Arc::clone(trees.entry(template.to_string()).or_insert(tree))
    }

    /// Number of cached trees.
    pub fn len(&self) -> usize {
        self.trees.read().expect("template cache lock poisoned").len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static GLOBAL_TEMPLATES: LazyLock<TemplateCache> = LazyLock::new(TemplateCache::new);

/// The process-wide template cache used by `TranslationKey::translate`.
pub fn global_templates() -> &'static TemplateCache {
    &GLOBAL_TEMPLATES
}
