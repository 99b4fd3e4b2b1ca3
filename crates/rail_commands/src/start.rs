use crate::command::RailCommand;
use crate::context::CommonArgs;
use anyhow::{Result, bail};
use chrono::Local;
use clap::Args;
use rail_config::RunConfig;
use rail_config::definitions::DEFAULT_RUN_NAME;
use rail_utils::term::print_info;

#[derive(Debug, PartialEq, Eq)]
enum RunTarget {
    Existing(u64),
    Create(u64),
}

#[derive(Args)]
#[command(about = "Creates a test run and caches its id for the other commands")]
pub struct StartCommand {
    #[command(flatten)]
    pub(crate) common: CommonArgs,

    #[arg(short = 'n', long = "name", help = "The name of the test run")]
    pub(crate) name: Option<String>,

    #[arg(short = 'd', long = "description", help = "The description of the test run")]
    pub(crate) description: Option<String>,

    #[arg(short = 's', long = "suite", help = "The suite id, defaults to suite-id of the config")]
    pub(crate) suite: Option<u64>,
}

impl StartCommand {
    /// An explicit `--suite` always creates a run, otherwise a configured
    /// run id is reused before falling back to the configured suite.
    fn target(&self, config: &RunConfig) -> Result<RunTarget> {
        match (self.suite, config.run_id, config.suite_id) {
            (Some(suite_id), _, _) => Ok(RunTarget::Create(suite_id)),
            (None, Some(run_id), _) => Ok(RunTarget::Existing(run_id)),
            (None, None, Some(suite_id)) => Ok(RunTarget::Create(suite_id)),
            (None, None, None) => bail!("no suite id given and none found in config"),
        }
    }
}

impl RailCommand for StartCommand {
    fn verbose(&self) -> bool {
        self.common.verbose
    }

    fn exec(self) -> Result<()> {
        let mut client = self.common.client()?;
        let config = client.config().clone();
        let target = self.target(&config)?;

        let name = self.name.unwrap_or_else(|| {
            let prefix = config.run_name.as_deref().unwrap_or(DEFAULT_RUN_NAME);
            format!("{prefix} {}", Local::now().format("%Y-%m-%d %H:%M:%S"))
        });
        let description = self
            .description
            .or(config.run_description)
            .unwrap_or_default();

        let run_id = match target {
            RunTarget::Existing(run_id) => Some(run_id),
            RunTarget::Create(suite_id) => client.create_run(&name, &description, suite_id),
        };

        let Some(run_id) = run_id else {
            bail!("unable to create test run {name}");
        };
        print_info(&format!("test run {run_id} is ready"))
    }
}
