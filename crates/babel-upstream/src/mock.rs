use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use babel_types::{ErrorKind, TranslationRequest, TranslationResult};

use crate::Provider;

/// Provider used to exercise failover without a network.
///
/// Echoes the given phrase (or a fixed reply), optionally after a delay,
/// and can be told to fail every call.
pub struct MockProvider {
    name: String,
    failing: bool,
    delay: Duration,
    reply: Option<String>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failing: false,
            delay: Duration::ZERO,
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// How many times `translate` has been entered
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Acquire)
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        self.calls.fetch_add(1, Ordering::AcqRel);
        tracing::debug!(
            provider = %self.name,
            request_id = %request.id,
            "Mock got request: {:?} ({} -> {})",
            request.phrase,
            request.source,
            request.target
        );

        if !self.delay.is_zero() {
            tracing::debug!(provider = %self.name, "Simulating service delay of {:?}", self.delay);
            tokio::time::sleep(self.delay).await;
        }

        if self.failing {
            return TranslationResult::failure(
                request,
                ErrorKind::Provider("simulating service failure".to_string()),
            );
        }

        let translated = self.reply.as_deref().unwrap_or(request.phrase.as_str());
        TranslationResult::success(request, translated)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
