use crate::attach::AttachCommand;
use crate::cases::CasesCommand;
use crate::close::CloseCommand;
use crate::command::RailCommand;
use crate::delete::DeleteCommand;
use crate::notify::NotifyCommand;
use crate::publish::PublishCommand;
use crate::purge::PurgeCommand;
use crate::screenshots::ScreenshotsCommand;
use crate::start::StartCommand;
use anyhow::Result;
use clap::{Parser, Subcommand};
use rail_config::definitions::VERSION;

#[derive(Subcommand)]
enum Commands {
    Cases(CasesCommand),
    Start(StartCommand),
    Publish(PublishCommand),
    Attach(AttachCommand),
    Screenshots(ScreenshotsCommand),
    Close(CloseCommand),
    Delete(DeleteCommand),
    Purge(PurgeCommand),
    Notify(NotifyCommand),
}

#[derive(Parser)]
#[command(name = "rail", version = VERSION, about = "Reports test results to TestRail")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn invoke(self) -> Result<()> {
        match self.command {
            Commands::Cases(cases) => cases.invoke(),
            Commands::Start(start) => start.invoke(),
            Commands::Publish(publish) => publish.invoke(),
            Commands::Attach(attach) => attach.invoke(),
            Commands::Screenshots(screenshots) => screenshots.invoke(),
            Commands::Close(close) => close.invoke(),
            Commands::Delete(delete) => delete.invoke(),
            Commands::Purge(purge) => purge.invoke(),
            Commands::Notify(notify) => notify.invoke(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_publish_accepts_results_and_flags() {
        let cli = Cli::try_parse_from([
            "rail",
            "publish",
            "-r",
            "results.json",
            "--screenshots",
            "--close",
            "--channel",
            "#qa",
            "-c",
            "ci/rail.yaml",
        ])
        .unwrap();

        let Commands::Publish(publish) = cli.command else {
            panic!("expected publish command");
        };
        assert_eq!(publish.results, PathBuf::from("results.json"));
        assert!(publish.screenshots);
        assert!(publish.close);
        assert_eq!(publish.channel.as_deref(), Some("#qa"));
        assert_eq!(publish.common.config, Some(PathBuf::from("ci/rail.yaml")));
    }

    #[test]
    fn cli_publish_requires_results() {
        assert!(Cli::try_parse_from(["rail", "publish"]).is_err());
    }

    #[test]
    fn cli_start_suite_arg_accepts_value() {
        let cli = Cli::try_parse_from(["rail", "start", "-s", "4", "-n", "nightly", "-v"]).unwrap();

        let Commands::Start(start) = cli.command else {
            panic!("expected start command");
        };
        assert_eq!(start.suite, Some(4));
        assert_eq!(start.name.as_deref(), Some("nightly"));
        assert!(start.verbose());
    }

    #[test]
    fn cli_screenshots_requires_numeric_ids() {
        assert!(Cli::try_parse_from(["rail", "screenshots", "--case", "C4", "-r", "1"]).is_err());
        assert!(Cli::try_parse_from(["rail", "screenshots", "--case", "4", "-r", "1"]).is_ok());
    }
}
