use babel_types::{ErrorKind, LanguageTag};

pub mod memory;

pub use memory::MemoryCache;

/// Translation store keyed by (source phrase, target language).
///
/// Implementations synchronize internally; callers share one instance
/// across tasks behind an `Arc` and never assume exclusive access.
pub trait Cache: Send + Sync {
    /// Make a translation available to later `get`/`has` calls, replacing
    /// any previous entry for the same key
    fn put(
        &self,
        source_phrase: &str,
        target: &LanguageTag,
        translated_phrase: &str,
    ) -> Result<(), CacheError>;

    /// Existence check without cloning the stored value
    fn has(&self, source_phrase: &str, target: &LanguageTag) -> bool;

    /// Stored translation, or `CacheError::NotFound`
    fn get(&self, source_phrase: &str, target: &LanguageTag) -> Result<String, CacheError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("phrase not found in cache")]
    NotFound,

    #[error("cache backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot format error: {0}")]
    Format(#[from] serde_json::Error),
}

impl From<CacheError> for ErrorKind {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::NotFound => ErrorKind::NotFound,
            other => ErrorKind::Cache(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_error_kind() {
        assert_eq!(ErrorKind::from(CacheError::NotFound), ErrorKind::NotFound);
        assert_eq!(
            ErrorKind::from(CacheError::Backend("disk full".to_string())),
            ErrorKind::Cache("cache backend error: disk full".to_string())
        );
    }
}
