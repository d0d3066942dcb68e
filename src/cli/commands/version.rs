//! Version command implementation.

use crate::cli::VersionArgs;
use crate::error::Result;
use crate::format::VersionOutput;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

const fn build() -> &'static str {
    if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    }
}

/// Render the version line or JSON document.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(args: &VersionArgs) -> Result<String> {
    if args.short {
        return Ok(VERSION.to_string());
    }

    if args.json {
        let output = VersionOutput {
            name: NAME,
            version: VERSION,
            build: build(),
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    Ok(format!("{NAME} version {VERSION} ({})", build()))
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &VersionArgs) -> Result<()> {
    println!("{}", render(args)?);
    Ok(())
}
