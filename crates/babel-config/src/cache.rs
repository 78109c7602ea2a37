use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::parse_flag;

fn default_enabled() -> bool {
    true
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("babel-cache.json")
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct CacheConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Where the in-memory cache is loaded from at startup and saved on exit
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl CacheConfig {
    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            enabled: lookup("CACHE_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or_else(default_enabled),
            snapshot_path: lookup("CACHE_SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_snapshot_path),
        }
    }
}
