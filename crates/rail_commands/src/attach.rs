use crate::command::RailCommand;
use crate::context::CommonArgs;
use anyhow::{Result, bail};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
#[command(about = "Uploads a file as an attachment of a result")]
pub struct AttachCommand {
    #[command(flatten)]
    pub(crate) common: CommonArgs,

    #[arg(short = 'r', long = "result", help = "The id of the result")]
    pub(crate) result: u64,

    #[arg(short = 'f', long = "file", help = "Path to the file to upload")]
    pub(crate) file: PathBuf,
}

impl RailCommand for AttachCommand {
    fn verbose(&self) -> bool {
        self.common.verbose
    }

    fn exec(self) -> Result<()> {
        let client = self.common.client()?;
        if !client.upload_attachment(self.result, &self.file) {
            bail!("unable to upload {}", self.file.display());
        }
        Ok(())
    }
}
