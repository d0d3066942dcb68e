//! `issue_tracker` - minimal issue-tracking REST service
//!
//! This crate provides the HTTP front end for the `issue-tracker`
//! binary over the in-memory store in `issue-lib`.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Configuration layering (YAML, env, flags)
//! - [`api`] - axum router and handlers for `/api/issues/{project}`
//! - [`format`] - JSON response payloads
//! - [`server`] - Listener and graceful shutdown
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod server;

pub use error::{Result, TrackerError};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
