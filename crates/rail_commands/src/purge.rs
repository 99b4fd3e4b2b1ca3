use crate::command::RailCommand;
use crate::context::CommonArgs;
use anyhow::Result;
use clap::Args;
use rail_core::cache::Cache;

#[derive(Args)]
#[command(about = "Removes the cached run id and case ids")]
pub struct PurgeCommand {
    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

impl RailCommand for PurgeCommand {
    fn verbose(&self) -> bool {
        self.common.verbose
    }

    fn exec(self) -> Result<()> {
        let config = self.common.load()?;
        Cache::from_config(&config.cache).purge();
        Ok(())
    }
}
