//! Circuit breaker decorator for a single provider.
//!
//! A tripped breaker answers `CircuitOpen` immediately and never touches the
//! wrapped provider. Tripping is manual by default; an optional failure
//! threshold makes the breaker trip itself once enough failures have been
//! recorded. The breaker never retries, failover is the gateway's job.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use babel_types::{ErrorKind, TranslationRequest, TranslationResult};
use tracing::{debug, info, warn};

use crate::Provider;

pub struct CircuitBreaker {
    name: String,
    inner: Option<Arc<dyn Provider>>,
    failure_count: AtomicU64,
    tripped: AtomicBool,
    /// Trip automatically once this many failures are recorded
    failure_threshold: Option<u64>,
}

impl CircuitBreaker {
    pub fn new(inner: Arc<dyn Provider>) -> Self {
        let name = format!("breaker({})", inner.name());
        Self::build(name, Some(inner))
    }

    /// A breaker with nothing behind it; every call is a misconfiguration
    pub fn unwired(name: impl Into<String>) -> Self {
        Self::build(name.into(), None)
    }

    fn build(name: String, inner: Option<Arc<dyn Provider>>) -> Self {
        info!(component = %name, wired = inner.is_some(), "Circuit breaker initialized");

        Self {
            name,
            inner,
            failure_count: AtomicU64::new(0),
            tripped: AtomicBool::new(false),
            failure_threshold: None,
        }
    }

    /// Enable automatic tripping. A threshold of zero is treated as one.
    pub fn with_failure_threshold(mut self, threshold: u64) -> Self {
        self.failure_threshold = Some(threshold.max(1));
        self
    }

    pub fn failure_threshold(&self) -> Option<u64> {
        self.failure_threshold
    }

    pub fn failures(&self) -> u64 {
        self.failure_count.load(Ordering::Acquire)
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    /// Force the breaker open
    pub fn trip(&self) {
        if !self.tripped.swap(true, Ordering::AcqRel) {
            warn!(component = %self.name, failures = self.failures(), "Circuit breaker tripped");
        }
    }

    /// Close the breaker and forget recorded failures
    pub fn reset(&self) {
        self.failure_count.store(0, Ordering::Release);
        if self.tripped.swap(false, Ordering::AcqRel) {
            info!(component = %self.name, "Circuit breaker reset");
        }
    }

    fn record_failure(&self) {
        let failures = self.failure_count.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(component = %self.name, failures, "Recorded upstream failure");

        if self.failure_threshold.is_some_and(|threshold| failures >= threshold) {
            self.trip();
        }
    }
}

#[async_trait]
impl Provider for CircuitBreaker {
    async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        if self.is_tripped() {
            debug!(component = %self.name, request_id = %request.id, "Rejecting call, breaker is open");
            return TranslationResult::failure(request, ErrorKind::CircuitOpen);
        }

        let Some(inner) = &self.inner else {
            warn!(component = %self.name, "Wrapped provider is missing");
            self.record_failure();
            return TranslationResult::failure(request, ErrorKind::MisconfiguredBreaker);
        };

        let result = inner.translate(request).await;
        if !result.is_success() {
            self.record_failure();
        }

        result
    }

    fn name(&self) -> &str {
        &self.name
    }
}
