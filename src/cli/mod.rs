//! Command-line interface for `issue_tracker`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::CliOverrides;

/// issue-tracker - minimal issue-tracking REST service.
#[derive(Parser, Debug)]
#[command(name = "issue-tracker")]
#[command(
    author,
    version,
    about = "Minimal issue-tracking REST service (in-memory)",
    long_about = None,
    after_help = "Serves GET/POST/PUT/DELETE on /api/issues/{project}. Data is not persisted."
)]
pub struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Show version information
    Version(VersionArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ServeArgs {
    /// YAML config file
    #[arg(short, long, env = "ISSUE_TRACKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interface to listen on
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl ServeArgs {
    /// Flags that override file and environment settings.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            host: self.host.clone(),
            port: self.port,
            log_json: self.log_json.then_some(true),
        }
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionArgs {
    /// Print only the version number
    #[arg(long)]
    pub short: bool,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version(args)) => commands::version::execute(&args)?,
        Some(Commands::Serve(args)) => commands::serve::execute(&args, cli.verbose, cli.quiet)?,
        None => commands::serve::execute(&ServeArgs::default(), cli.verbose, cli.quiet)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "issue-tracker",
            "-vv",
            "serve",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "--log-json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Some(Commands::Serve(args)) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(
            args.overrides(),
            CliOverrides {
                host: Some("127.0.0.1".to_string()),
                port: Some(8080),
                log_json: Some(true),
            }
        );
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["issue-tracker", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_unset_flags_do_not_override() {
        assert_eq!(ServeArgs::default().overrides(), CliOverrides::default());
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["issue-tracker", "serve", "--port", "99999"]).is_err());
    }
}
