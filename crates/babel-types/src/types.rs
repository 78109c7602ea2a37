use uuid::Uuid;

use crate::error::ErrorKind;
use crate::language::LanguageTag;

/// Validated inbound translation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Correlates log lines for one call; never part of a cache key
    pub id: Uuid,
    pub phrase: String,
    pub source: LanguageTag,
    pub target: LanguageTag,
}

impl TranslationRequest {
    pub fn new(phrase: impl Into<String>, source: LanguageTag, target: LanguageTag) -> Self {
        Self {
            id: Uuid::new_v4(),
            phrase: phrase.into(),
            source,
            target,
        }
    }
}

/// Outcome of a translation attempt.
///
/// The request fields are always copied over for traceability. On success
/// `translated_phrase` holds the answer and `error` is `None`; on failure
/// `error` is set and `translated_phrase` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub request_id: Uuid,
    pub phrase: String,
    pub source: LanguageTag,
    pub target: LanguageTag,
    pub translated_phrase: String,
    pub error: Option<ErrorKind>,
}

impl TranslationResult {
    pub fn success(request: &TranslationRequest, translated_phrase: impl Into<String>) -> Self {
        Self {
            request_id: request.id,
            phrase: request.phrase.clone(),
            source: request.source.clone(),
            target: request.target.clone(),
            translated_phrase: translated_phrase.into(),
            error: None,
        }
    }

    pub fn failure(request: &TranslationRequest, kind: ErrorKind) -> Self {
        Self {
            request_id: request.id,
            phrase: request.phrase.clone(),
            source: request.source.clone(),
            target: request.target.clone(),
            translated_phrase: String::new(),
            error: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&ErrorKind> {
        self.error.as_ref()
    }

    pub fn into_result(self) -> Result<String, ErrorKind> {
        match self.error {
            None => Ok(self.translated_phrase),
            Some(kind) => Err(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TranslationRequest {
        TranslationRequest::new(
            "Guten Morgen.",
            LanguageTag::parse("de").unwrap(),
            LanguageTag::parse("en").unwrap(),
        )
    }

    #[test]
    fn test_success_carries_request_fields() {
        let req = request();
        let result = TranslationResult::success(&req, "Good morning.");

        assert!(result.is_success());
        assert_eq!(result.request_id, req.id);
        assert_eq!(result.phrase, "Guten Morgen.");
        assert_eq!(result.target.as_str(), "en");
        assert_eq!(result.into_result(), Ok("Good morning.".to_string()));
    }

    #[test]
    fn test_failure_has_no_translation() {
        let req = request();
        let result = TranslationResult::failure(&req, ErrorKind::CircuitOpen);

        assert!(!result.is_success());
        assert!(result.translated_phrase.is_empty());
        assert_eq!(result.error(), Some(&ErrorKind::CircuitOpen));
        assert_eq!(result.source, req.source);
    }

    #[test]
    fn test_all_failed_message() {
        assert_eq!(
            ErrorKind::AllProvidersFailed.to_string(),
            "all upstream services failed to translate"
        );
    }
}
