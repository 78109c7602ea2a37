use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use self::breaker::BreakerConfig;
use self::cache::CacheConfig;
use self::providers::ProvidersConfig;

pub mod breaker;
pub mod cache;
pub mod providers;

fn default_attempt_timeout_ms() -> u64 {
    5000
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    /// Deadline for a single provider attempt
    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,

    pub cache: CacheConfig,
    pub breaker: BreakerConfig,
    pub providers: ProvidersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attempt_timeout_ms: default_attempt_timeout_ms(),
            log_json: false,
            cache: CacheConfig::default(),
            breaker: BreakerConfig::default(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl Config {
    /// Configuration from process environment variables
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Configuration from an arbitrary key lookup, missing keys fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let attempt_timeout_ms = lookup("ATTEMPT_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_attempt_timeout_ms);

        let log_json = lookup("LOG_JSON").is_some_and(|v| parse_flag(&v));

        Config {
            attempt_timeout_ms,
            log_json,
            cache: CacheConfig::from_lookup(&lookup),
            breaker: BreakerConfig::from_lookup(&lookup),
            providers: ProvidersConfig::from_lookup(&lookup),
        }
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Self {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }
}

/// Accepts the usual spellings of "on"
pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}
