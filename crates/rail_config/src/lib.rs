mod cache;
pub mod definitions;
mod notifier;
mod path;
mod run;

pub use cache::*;
pub use notifier::*;
pub use run::*;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailConfig {
    pub testrail: RunConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

impl RailConfig {
    pub fn load() -> Result<Self> {
        let path = path![
            std::env::current_dir()?,
            definitions::TOOL_DEFAULT_CONFIG_FILE
        ];
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("loading config file from: {}", path.display());
        let content = read_to_string(path)
            .map_err(|e| anyhow!("unable to read config file {}: {e}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml_ng::from_str(content).map_err(|e| anyhow!(e))
    }

    pub fn debug_info(&self) {
        debug!("loaded configuration");
        self.testrail.debug_info();
        debug!("cache > path: {}", self.cache.path.display());
        debug!("cache > reload: {}", self.cache.reload);
    }
}
