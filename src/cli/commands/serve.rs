//! Serve command implementation.

use anyhow::Context;
use issue_lib::IssueTracker;
use tracing::info;

use crate::cli::ServeArgs;
use crate::config::{self, ServerConfig};
use crate::logging;
use crate::server;

/// Resolve configuration for `args` from every layer.
///
/// # Errors
///
/// Returns an error if the config file or environment is invalid.
pub fn resolve_config(args: &ServeArgs) -> crate::Result<ServerConfig> {
    config::load(args.config.as_deref(), &args.overrides())
}

/// Execute the serve command.
///
/// # Errors
///
/// Returns an error if configuration, logging setup, or the server fails.
pub fn execute(args: &ServeArgs, verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let config = resolve_config(args).context("failed to load configuration")?;
    logging::init_logging(verbose, quiet, config.log_json)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    info!(version = env!("CARGO_PKG_VERSION"), ?config, "starting issue tracker");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(server::serve(&config, IssueTracker::new()))?;
    Ok(())
}
