//! Cache-first, failover translation orchestrator.
//!
//! Providers are tried one at a time in priority order. Each attempt runs in
//! its own task and is raced against a deadline; a late answer from an
//! abandoned attempt is dropped with its join handle and never observed.
//! A provider that fails or times out is moved to the back of the list, so
//! healthy providers drift to the front over successive requests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use babel_cache::Cache;
use babel_types::{ErrorKind, TranslationRequest, TranslationResult};
use babel_upstream::Provider;
use tokio::sync::RwLock;
use tokio::time::timeout;

pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Gateway {
    /// Priority order; only positions change, never membership
    providers: RwLock<Vec<Arc<dyn Provider>>>,
    cache: Option<Arc<dyn Cache>>,
    attempt_timeout: Duration,
}

impl Gateway {
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self {
            providers: RwLock::new(providers),
            cache: None,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    /// Provider names in current priority order
    pub async fn order(&self) -> Vec<String> {
        self.providers
            .read()
            .await
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Answer a validated request from cache or the first provider that succeeds.
    ///
    /// The only failure ever returned is `ErrorKind::AllProvidersFailed`.
    pub async fn handle(&self, request: &TranslationRequest) -> TranslationResult {
        if let Some(hit) = self.lookup_cache(request) {
            return hit;
        }

        // Priority snapshot for this request; concurrent reorders don't affect it
        let snapshot: Vec<Arc<dyn Provider>> = self.providers.read().await.clone();
        let shared = Arc::new(request.clone());

        for (attempt, provider) in snapshot.iter().enumerate() {
            let started = Instant::now();

            match self.attempt(provider, &shared).await {
                Ok(result) => {
                    tracing::info!(
                        request_id = %request.id,
                        provider = provider.name(),
                        attempt,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Translated {} -> {}",
                        request.source,
                        request.target
                    );
                    self.store_in_background(request, &result);
                    return result;
                }
                Err(kind) => {
                    tracing::warn!(
                        request_id = %request.id,
                        provider = provider.name(),
                        attempt,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Upstream failed: {kind}"
                    );
                    self.demote(provider).await;
                }
            }
        }

        tracing::error!(
            request_id = %request.id,
            providers = snapshot.len(),
            "All services failed to translate {:?} ({} -> {})",
            request.phrase,
            request.source,
            request.target
        );
        TranslationResult::failure(request, ErrorKind::AllProvidersFailed)
    }

    fn lookup_cache(&self, request: &TranslationRequest) -> Option<TranslationResult> {
        let cache = self.cache.as_ref()?;

        match cache
            .get(&request.phrase, &request.target)
            .map_err(ErrorKind::from)
        {
            Ok(cached) => {
                tracing::debug!(request_id = %request.id, "Cache hit");
                Some(TranslationResult::success(request, cached))
            }
            Err(ErrorKind::NotFound) => {
                tracing::debug!(request_id = %request.id, "Cache miss");
                None
            }
            Err(kind) => {
                tracing::warn!(request_id = %request.id, "Cache read failed, treating as miss: {kind}");
                None
            }
        }
    }

    /// One provider call in its own task, bounded by the attempt deadline
    async fn attempt(
        &self,
        provider: &Arc<dyn Provider>,
        request: &Arc<TranslationRequest>,
    ) -> Result<TranslationResult, ErrorKind> {
        let task = tokio::spawn({
            let provider = Arc::clone(provider);
            let request = Arc::clone(request);
            async move { provider.translate(&request).await }
        });

        // On timeout the join handle is dropped, detaching the task
        match timeout(self.attempt_timeout, task).await {
            Ok(Ok(result)) => match result.error {
                None => Ok(result),
                Some(kind) => Err(kind),
            },
            Ok(Err(join_err)) => Err(ErrorKind::Provider(format!(
                "provider task aborted: {join_err}"
            ))),
            Err(_) => Err(ErrorKind::ProviderTimeout(self.attempt_timeout)),
        }
    }

    /// Move `failed` to the tail, keeping everyone else's relative order
    async fn demote(&self, failed: &Arc<dyn Provider>) {
        let mut providers = self.providers.write().await;

        // Look it up again: other requests may have moved it since our snapshot
        if let Some(position) = providers.iter().position(|p| Arc::ptr_eq(p, failed)) {
            let provider = providers.remove(position);
            providers.push(provider);
        }
    }

    /// Fire-and-forget cache write keyed by the request; failures are only logged
    fn store_in_background(&self, request: &TranslationRequest, result: &TranslationResult) {
        let Some(cache) = self.cache.clone() else {
            return;
        };

        let request_id = request.id;
        let phrase = request.phrase.clone();
        let target = request.target.clone();
        let translated = result.translated_phrase.clone();

        tokio::task::spawn_blocking(move || {
            if let Err(e) = cache.put(&phrase, &target, &translated) {
                tracing::warn!(%request_id, "Failed to store translation in cache: {e}");
            }
        });
    }
}
