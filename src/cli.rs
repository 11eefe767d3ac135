use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "window-events",
    about = "Resize a window through its asynchronous event listener"
)]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Open the window, submit the configured resizes and print the final size
    Run(RunArgs),
    /// Print the effective configuration as TOML
    ShowConfig,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Close the window without waiting for submitted resizes to be handled
    #[arg(long)]
    pub no_wait: bool,

    /// Make the handler reject the N-th resize (1-based)
    #[arg(long, value_name = "N")]
    pub fail_at: Option<u64>,

    /// Give up waiting for completion after this many milliseconds
    #[arg(long, value_name = "MS", conflicts_with = "no_wait")]
    pub wait_timeout_ms: Option<u64>,
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Run(RunArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn defaults_to_run_when_command_is_missing() {
        let cli = Cli::parse_from(["window-events"]);

        match cli.command_or_default() {
            Command::Run(args) => {
                assert!(!args.no_wait);
                assert_eq!(args.fail_at, None);
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn parses_run_flags_and_global_config() {
        let cli = Cli::parse_from([
            "window-events",
            "run",
            "--fail-at",
            "3",
            "--wait-timeout-ms",
            "500",
            "--config",
            "custom.toml",
        ]);

        match cli.command_or_default() {
            Command::Run(args) => {
                assert_eq!(args.fail_at, Some(3));
                assert_eq!(args.wait_timeout_ms, Some(500));
            }
            other => panic!("expected run, got {other:?}"),
        }
        assert_eq!(
            cli.config
                .as_deref()
                .map(|p| p.to_string_lossy().to_string()),
            Some("custom.toml".to_owned())
        );
    }

    #[test]
    fn rejects_timeout_together_with_no_wait() {
        let result = Cli::try_parse_from([
            "window-events",
            "run",
            "--no-wait",
            "--wait-timeout-ms",
            "10",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn parses_show_config() {
        let cli = Cli::parse_from(["window-events", "show-config"]);

        assert!(matches!(cli.command_or_default(), Command::ShowConfig));
    }
}
