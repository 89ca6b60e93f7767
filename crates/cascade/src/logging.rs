use std::io;

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};

/// Environment variable holding a `tracing` filter directive.
pub(crate) const LOG_ENV: &str = "CASCADE_LOG";

/// Installs the stderr subscriber.
///
/// `CASCADE_LOG` wins when set; otherwise the level is `warn`, or `debug`
/// with `--verbose`.
pub(crate) fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| CliError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}
