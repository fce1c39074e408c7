//! Logging setup for the command-line front end.
//!
//! Logs go to stderr so stdout only carries the translated arguments.

use anyhow::{anyhow, Result};
use std::env;
use std::io;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding a tracing filter, e.g. `autodt=debug`
pub const LOG_ENV_VAR: &str = "AUTODT_LOG";

/// Filter directive to use: the environment wins, then `--verbose`
pub fn filter_directive(verbose: bool) -> String {
    match env::var(LOG_ENV_VAR) {
        Ok(directive) if !directive.trim().is_empty() => directive,
        _ if verbose => "debug".to_string(),
        _ => "warn".to_string(),
    }
}

/// Install the global tracing subscriber
pub fn init_logging(verbose: bool) -> Result<()> {
    let directive = filter_directive(verbose);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| anyhow!("Invalid {LOG_ENV_VAR} filter '{directive}': {e}"))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to set subscriber: {e}"))
}
