mod translation;
mod translation_key;
mod value;

pub use translation::{Condition, Translation};
pub use translation_key::TranslationKey;
pub use value::Value;
