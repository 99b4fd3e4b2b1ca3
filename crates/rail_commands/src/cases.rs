use crate::command::RailCommand;
use crate::context::CommonArgs;
use anyhow::{Result, anyhow};
use clap::Args;

#[derive(Args)]
#[command(about = "Lists the case ids of a suite")]
pub struct CasesCommand {
    #[command(flatten)]
    pub(crate) common: CommonArgs,

    #[arg(short = 's', long = "suite", help = "The suite id, defaults to suite-id of the config")]
    pub(crate) suite: Option<u64>,
}

impl RailCommand for CasesCommand {
    fn verbose(&self) -> bool {
        self.common.verbose
    }

    fn exec(self) -> Result<()> {
        let client = self.common.client()?;
        let suite_id = self
            .suite
            .or(client.config().suite_id)
            .ok_or_else(|| anyhow!("no suite id given and none found in config"))?;

        for id in client.list_cases(suite_id) {
            println!("{id}");
        }
        Ok(())
    }
}
