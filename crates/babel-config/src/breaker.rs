use serde::{Deserialize, Serialize};

use crate::parse_flag;

fn default_enabled() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BreakerConfig {
    /// Wrap every provider in a circuit breaker
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Failures before a breaker trips itself; `None` means manual trip only
    pub failure_threshold: Option<u64>,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            failure_threshold: None,
        }
    }
}

impl BreakerConfig {
    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            enabled: lookup("BREAKER_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or_else(default_enabled),
            failure_threshold: lookup("BREAKER_FAILURE_THRESHOLD").and_then(|v| v.parse().ok()),
        }
    }
}
