mod cache_tests;

use std::sync::Arc;
use std::time::Duration;

use babel_cache::{Cache, MemoryCache};
use babel_types::{LanguageTag, TranslationRequest};
use babel_upstream::Provider;

pub(crate) fn tag(raw: &str) -> LanguageTag {
    LanguageTag::parse(raw).unwrap()
}

pub(crate) fn request(phrase: &str) -> TranslationRequest {
    TranslationRequest::new(phrase, tag("de"), tag("en"))
}

pub(crate) fn providers<const N: usize>(list: [Arc<dyn Provider>; N]) -> Vec<Arc<dyn Provider>> {
    list.into_iter().collect()
}

/// Cache writes are asynchronous; poll until one lands or give up
pub(crate) async fn wait_for_entry(cache: &MemoryCache, phrase: &str, target: &LanguageTag) -> bool {
    for _ in 0..100 {
        if cache.has(phrase, target) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
