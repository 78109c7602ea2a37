use babel_types::{TranslationRequest, TranslationResult};

pub mod breaker;
pub mod deepl;
pub mod error;
pub mod mock;

pub use breaker::CircuitBreaker;
pub use deepl::DeepLProvider;
pub use error::TranslateError;
pub use mock::MockProvider;

/// Upstream translation backend
///
/// A call may take arbitrarily long or fail; callers enforce their own
/// deadline. Failures are reported inside the returned result, never by
/// panicking.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Translate `request.phrase` from `request.source` to `request.target`
    async fn translate(&self, request: &TranslationRequest) -> TranslationResult;

    /// Short name used in logs and priority listings
    fn name(&self) -> &str;
}
