use anyhow::Result;
use clap::Args;
use rail_config::RailConfig;
use rail_core::cache::Cache;
use rail_http::RunClient;
use rail_utils::sync::IntoArc;
use std::path::PathBuf;

#[derive(Args)]
pub struct CommonArgs {
    #[arg(short = 'v', long = "verbose", help = "Sets the level of verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'c',
        long = "config",
        help = "Path to the configuration file, defaults to rail.yaml in the current directory"
    )]
    pub config: Option<PathBuf>,
}

impl CommonArgs {
    pub fn load(&self) -> Result<RailConfig> {
        let config = match &self.config {
            Some(path) => RailConfig::load_from(path)?,
            None => RailConfig::load()?,
        };
        config.debug_info();
        Ok(config)
    }

    pub fn client(&self) -> Result<RunClient> {
        let config = self.load()?;
        let cache = Cache::from_config(&config.cache);
        Ok(RunClient::new(config.testrail.into_arc(), cache))
    }
}
