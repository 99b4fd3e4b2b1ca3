use crate::definitions;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// When the cache file is read back from disk.
///
/// `EveryAccess` sees values written by sibling processes sharing the file,
/// `Once` reads the file a single time per cache instance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReloadPolicy {
    #[default]
    EveryAccess,
    Once,
}

impl Display for ReloadPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EveryAccess => write!(f, "every-access"),
            Self::Once => write!(f, "once"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "CacheConfig::default_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub reload: ReloadPolicy,
}

impl CacheConfig {
    fn default_path() -> PathBuf {
        PathBuf::from(definitions::CACHE_DEFAULT_FILE)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            reload: ReloadPolicy::default(),
        }
    }
}
