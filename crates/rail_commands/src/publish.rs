use crate::command::RailCommand;
use crate::context::CommonArgs;
use anyhow::{Result, anyhow, bail};
use clap::Args;
use rail_core::notifier::Notifier;
use rail_http::{FinishOptions, Reporter};
use rail_models::ResultRecord;
use rail_utils::term::print_info;
use std::fs::read_to_string;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args)]
#[command(about = "Publishes a batch of results to the current test run")]
pub struct PublishCommand {
    #[command(flatten)]
    pub(crate) common: CommonArgs,

    #[arg(
        short = 'r',
        long = "results",
        help = "Path to a json file with the results to publish"
    )]
    pub(crate) results: PathBuf,

    #[arg(long = "screenshots", help = "Attach failure screenshots to failed results")]
    pub(crate) screenshots: bool,

    #[arg(long = "close", help = "Closes the test run after publishing")]
    pub(crate) close: bool,

    #[arg(long = "channel", help = "The channel to notify for failed results")]
    pub(crate) channel: Option<String>,
}

impl PublishCommand {
    fn read_results(&self) -> Result<Vec<ResultRecord>> {
        let content = read_to_string(&self.results)
            .map_err(|e| anyhow!("unable to read {}: {e}", self.results.display()))?;
        let results: Vec<ResultRecord> = serde_json::from_str(&content)
            .map_err(|e| anyhow!("invalid results in {}: {e}", self.results.display()))?;
        debug!("read {} results from {}", results.len(), self.results.display());
        Ok(results)
    }
}

impl RailCommand for PublishCommand {
    fn verbose(&self) -> bool {
        self.common.verbose
    }

    fn exec(self) -> Result<()> {
        let results = self.read_results()?;
        let client = self.common.client()?;
        let mut reporter =
            Reporter::new(client, Notifier::from_env()).channel(self.channel.as_deref());

        for result in results {
            reporter.record(result);
        }

        let options = FinishOptions {
            upload_screenshots: self.screenshots,
            close: self.close,
        };
        let Some(published) = reporter.finish(options) else {
            bail!("no results were published");
        };
        print_info(&format!("published {} results", published.len()))
    }
}
