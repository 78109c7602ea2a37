use serde::{Deserialize, Serialize};

use crate::parse_flag;

fn default_api_url() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct ProvidersConfig {
    pub deepl: DeepLConfig,
    pub mock: MockConfig,
}

impl ProvidersConfig {
    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            deepl: DeepLConfig {
                api_key: lookup("DEEPL_API_KEY").unwrap_or_default(),
                api_url: lookup("DEEPL_API_URL").unwrap_or_else(default_api_url),
            },
            mock: MockConfig {
                enabled: lookup("ENABLE_MOCK").is_some_and(|v| parse_flag(&v)),
                failing: lookup("MOCK_FAILING").is_some_and(|v| parse_flag(&v)),
            },
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DeepLConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for DeepLConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
        }
    }
}

impl DeepLConfig {
    /// DeepL is only used when a key is configured
    pub fn is_enabled(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Echoing test backend, useful for exercising failover by hand
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct MockConfig {
    pub enabled: bool,
    pub failing: bool,
}
