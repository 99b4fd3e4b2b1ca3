use crate::command::RailCommand;
use anyhow::Result;
use clap::Args;
use rail_core::notifier::Notifier;

#[derive(Args)]
#[command(about = "Sends a message to the configured failure webhook")]
pub struct NotifyCommand {
    #[arg(short = 'v', long = "verbose", help = "Sets the level of verbosity")]
    pub(crate) verbose: bool,

    #[arg(short = 't', long = "text", help = "The message to send")]
    pub(crate) text: String,

    #[arg(long = "channel", help = "The channel to post the message to")]
    pub(crate) channel: Option<String>,
}

impl RailCommand for NotifyCommand {
    fn verbose(&self) -> bool {
        self.verbose
    }

    fn exec(self) -> Result<()> {
        Notifier::from_env().notify(&self.text, self.channel.as_deref());
        Ok(())
    }
}
