use std::time::Duration;

/// Failure kinds flowing between providers, breakers, caches and the gateway
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("provider error: {0}")]
    Provider(String),

    #[error("provider timed out after {0:?}")]
    ProviderTimeout(Duration),

    #[error("circuit breaker is open")]
    CircuitOpen,

    #[error("circuit breaker has no wrapped provider")]
    MisconfiguredBreaker,

    #[error("cache error: {0}")]
    Cache(String),

    #[error("phrase not found in cache")]
    NotFound,

    #[error("all upstream services failed to translate")]
    AllProvidersFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("empty language tag")]
    Empty,

    #[error("malformed language tag {tag:?}: {reason}")]
    Malformed { tag: String, reason: String },
}
