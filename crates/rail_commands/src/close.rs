use crate::command::RailCommand;
use crate::context::CommonArgs;
use anyhow::{Result, bail};
use clap::Args;

#[derive(Args)]
#[command(about = "Closes the cached test run")]
pub struct CloseCommand {
    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

impl RailCommand for CloseCommand {
    fn verbose(&self) -> bool {
        self.common.verbose
    }

    fn exec(self) -> Result<()> {
        let mut client = self.common.client()?;
        if !client.close_run() {
            bail!("unable to close test run");
        }
        Ok(())
    }
}
