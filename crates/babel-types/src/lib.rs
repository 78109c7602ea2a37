pub mod error;
pub mod language;
pub mod types;

pub use error::{ErrorKind, TagError};
pub use language::LanguageTag;
pub use types::{TranslationRequest, TranslationResult};
