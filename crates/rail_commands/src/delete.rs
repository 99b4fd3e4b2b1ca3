use crate::command::RailCommand;
use crate::context::CommonArgs;
use anyhow::{Result, bail};
use clap::Args;

#[derive(Args)]
#[command(about = "Deletes the cached test run")]
pub struct DeleteCommand {
    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

impl RailCommand for DeleteCommand {
    fn verbose(&self) -> bool {
        self.common.verbose
    }

    fn exec(self) -> Result<()> {
        let mut client = self.common.client()?;
        if !client.delete_run() {
            bail!("unable to delete test run");
        }
        Ok(())
    }
}
