use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use babel_cache::{Cache, CacheError, MemoryCache};
use babel_types::{ErrorKind, LanguageTag, TranslationRequest, TranslationResult};
use babel_upstream::{MockProvider, Provider};

use super::{providers, request, tag, wait_for_entry};
use crate::Gateway;

/// Backend that is always down
struct BrokenCache;

impl Cache for BrokenCache {
    fn put(&self, _: &str, _: &LanguageTag, _: &str) -> Result<(), CacheError> {
        Err(CacheError::Backend("disk full".to_string()))
    }

    fn has(&self, _: &str, _: &LanguageTag) -> bool {
        false
    }

    fn get(&self, _: &str, _: &LanguageTag) -> Result<String, CacheError> {
        Err(CacheError::Backend("disk unreadable".to_string()))
    }
}

/// Provider that reports a normalized phrase and a regional target
struct RewritingProvider;

#[async_trait]
impl Provider for RewritingProvider {
    async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        let mut result = TranslationResult::success(request, "Good morning.");
        result.phrase = request.phrase.trim().to_lowercase();
        result.target = LanguageTag::parse("en-GB").unwrap();
        result
    }

    fn name(&self) -> &str {
        "rewriting"
    }
}

#[tokio::test]
async fn test_cache_hit_skips_providers() {
    let cache = Arc::new(MemoryCache::new());
    cache.put("Guten Morgen.", &tag("en"), "Good morning.").unwrap();
    let mock = Arc::new(MockProvider::new("a"));
    let gateway = Gateway::new(providers([mock.clone()])).with_cache(cache);

    let result = gateway.handle(&request("Guten Morgen.")).await;

    assert_eq!(result.into_result(), Ok("Good morning.".to_string()));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn test_cache_hit_uses_canonical_target() {
    let cache = Arc::new(MemoryCache::new());
    cache.put("Hallo", &tag("EN"), "Hello").unwrap();
    let gateway = Gateway::new(Vec::new()).with_cache(cache);

    let mut req = request("Hallo");
    req.target = tag("en");
    assert!(gateway.handle(&req).await.is_success());

    req.target = tag("en-GB");
    assert_eq!(
        gateway.handle(&req).await.error(),
        Some(&ErrorKind::AllProvidersFailed)
    );
}

#[tokio::test]
async fn test_success_is_written_to_cache() {
    let cache = Arc::new(MemoryCache::new());
    let gateway = Gateway::new(providers([Arc::new(
        MockProvider::new("a").with_reply("Good morning."),
    )]))
    .with_cache(cache.clone());

    assert!(gateway.handle(&request("Guten Morgen.")).await.is_success());
    assert!(wait_for_entry(&cache, "Guten Morgen.", &tag("en")).await);

    // No providers left: only the cache can answer now
    let cached_only = Gateway::new(Vec::new()).with_cache(cache);
    let result = cached_only.handle(&request("Guten Morgen.")).await;
    assert_eq!(result.into_result(), Ok("Good morning.".to_string()));
}

#[tokio::test]
async fn test_failures_never_touch_cache() {
    let cache = Arc::new(MemoryCache::new());
    let gateway = Gateway::new(providers([
        Arc::new(MockProvider::new("a").failing()),
        Arc::new(MockProvider::new("b").failing()),
    ]))
    .with_cache(cache.clone());

    let result = gateway.handle(&request("Whatever.")).await;
    assert_eq!(result.error(), Some(&ErrorKind::AllProvidersFailed));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_late_answer_is_discarded() {
    let cache = Arc::new(MemoryCache::new());
    let late = Arc::new(
        MockProvider::new("late")
            .with_delay(Duration::from_millis(150))
            .with_reply("too late"),
    );
    let gateway = Gateway::new(providers([late.clone()]))
        .with_cache(cache.clone())
        .with_attempt_timeout(Duration::from_millis(20));

    let result = gateway.handle(&request("Guten Morgen.")).await;
    assert_eq!(result.error(), Some(&ErrorKind::AllProvidersFailed));

    // Give the abandoned attempt time to finish; its answer must go nowhere
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(late.calls(), 1);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_broken_cache_is_not_fatal() {
    let mock = Arc::new(MockProvider::new("a").with_reply("Hello"));
    let gateway = Gateway::new(providers([mock.clone()])).with_cache(Arc::new(BrokenCache));

    let result = gateway.handle(&request("Hallo")).await;

    assert_eq!(result.into_result(), Ok("Hello".to_string()));
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn test_cache_key_comes_from_request() {
    let cache = Arc::new(MemoryCache::new());
    let gateway = Gateway::new(providers([Arc::new(RewritingProvider)])).with_cache(cache.clone());

    assert!(gateway.handle(&request("  Guten Morgen.")).await.is_success());
    assert!(wait_for_entry(&cache, "  Guten Morgen.", &tag("en")).await);
    assert!(!cache.has("guten morgen.", &tag("en-GB")));
    assert_eq!(cache.len(), 1);
}
