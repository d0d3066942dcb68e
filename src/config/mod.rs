//! Configuration management for `issue_tracker`.
//!
//! Values are layered, later sources winning:
//! - Built-in defaults
//! - Optional YAML file (`--config`)
//! - Environment variables (`ISSUE_TRACKER_*`, `PORT`)
//! - Command-line overrides

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TrackerError};

pub const ENV_HOST: &str = "ISSUE_TRACKER_HOST";
pub const ENV_PORT: &str = "ISSUE_TRACKER_PORT";
pub const ENV_PORT_FALLBACK: &str = "PORT";
pub const ENV_LOG_JSON: &str = "ISSUE_TRACKER_LOG_JSON";

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to listen on.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
    /// Emit logs as JSON lines.
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_json: false,
        }
    }
}

/// Values supplied on the command line; `None` leaves the lower layer alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_json: Option<bool>,
}

impl ServerConfig {
    /// Parse a YAML document. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Yaml` on malformed input or unknown keys.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file does not exist, `Io` if it
    /// cannot be read, or `Yaml` if it cannot be parsed.
    pub fn load_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TrackerError::ConfigNotFound(path.to_path_buf())
            } else {
                TrackerError::Io(e)
            }
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_yaml_str(&source)
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `Config` if a port or boolean value does not parse.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST).filter(|h| !h.trim().is_empty()) {
            self.host = host;
        }

        let port = lookup(ENV_PORT)
            .map(|v| (ENV_PORT, v))
            .or_else(|| lookup(ENV_PORT_FALLBACK).map(|v| (ENV_PORT_FALLBACK, v)));
        if let Some((name, value)) = port {
            self.port = value
                .trim()
                .parse()
                .map_err(|_| TrackerError::config(format!("{name}: invalid port '{value}'")))?;
        }

        if let Some(value) = lookup(ENV_LOG_JSON) {
            self.log_json = parse_flag(&value).ok_or_else(|| {
                TrackerError::config(format!("{ENV_LOG_JSON}: expected a boolean, got '{value}'"))
            })?;
        }

        Ok(())
    }

    /// Apply command-line overrides.
    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(ref host) = overrides.host {
            self.host.clone_from(host);
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(log_json) = overrides.log_json {
            self.log_json = log_json;
        }
    }

    /// `host:port` for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Resolve the full configuration from every layer.
///
/// # Errors
///
/// Returns an error if the config file or an environment value is invalid.
pub fn load(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<ServerConfig> {
    let mut config = match config_path {
        Some(path) => ServerConfig::load_file(path)?,
        None => ServerConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok())?;
    config.apply_overrides(overrides);
    Ok(config)
}
