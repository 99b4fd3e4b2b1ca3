use crate::command::RailCommand;
use crate::context::CommonArgs;
use anyhow::Result;
use clap::Args;
use rail_utils::term::print_info;

#[derive(Args)]
#[command(about = "Uploads the failure screenshots of a case to a result")]
pub struct ScreenshotsCommand {
    #[command(flatten)]
    pub(crate) common: CommonArgs,

    #[arg(long = "case", help = "The case id found in the screenshot names")]
    pub(crate) case: u64,

    #[arg(short = 'r', long = "result", help = "The id of the result")]
    pub(crate) result: u64,
}

impl RailCommand for ScreenshotsCommand {
    fn verbose(&self) -> bool {
        self.common.verbose
    }

    fn exec(self) -> Result<()> {
        let client = self.common.client()?;
        let uploaded = client.upload_screenshots(self.case, self.result);
        print_info(&format!("uploaded {uploaded} screenshots for C{}", self.case))
    }
}
