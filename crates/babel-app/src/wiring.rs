use std::sync::Arc;

use babel_config::Config;
use babel_upstream::{CircuitBreaker, DeepLProvider, MockProvider, Provider};

/// Providers enabled by `config`, in initial priority order
pub fn build_providers(config: &Config) -> Vec<Arc<dyn Provider>> {
    let mut providers: Vec<Arc<dyn Provider>> = Vec::new();

    let deepl = &config.providers.deepl;
    if deepl.is_enabled() {
        providers.push(Arc::new(DeepLProvider::new(
            deepl.api_key.clone(),
            deepl.api_url.clone(),
        )));
    }

    // Handy for testing failover by hand
    if config.providers.mock.enabled {
        let mut mock = MockProvider::new("mock");
        if config.providers.mock.failing {
            mock = mock.failing();
        }
        providers.push(Arc::new(mock));
    }

    if !config.breaker.enabled {
        return providers;
    }

    providers
        .into_iter()
        .map(|provider| {
            let mut breaker = CircuitBreaker::new(provider);
            if let Some(threshold) = config.breaker.failure_threshold {
                breaker = breaker.with_failure_threshold(threshold);
            }
            Arc::new(breaker) as Arc<dyn Provider>
        })
        .collect()
}
