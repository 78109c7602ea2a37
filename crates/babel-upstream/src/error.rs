use babel_types::ErrorKind;

/// Failures of a concrete HTTP backend before they are folded into a result
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

impl From<TranslateError> for ErrorKind {
    fn from(err: TranslateError) -> Self {
        ErrorKind::Provider(err.to_string())
    }
}
