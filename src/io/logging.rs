//! Logger bootstrap for the command-line binary

use flexi_logger::{Logger, LoggerHandle};

use crate::io::configuration::{DEFAULT_LOG_LEVEL, QUIET_LOG_LEVEL};
use crate::io::error::Result;

/// Log specification for the given command-line choices
///
/// `--quiet` wins over an explicit level; no level falls back to the default.
pub const fn log_spec(level: Option<&str>, quiet: bool) -> &str {
    match (quiet, level) {
        (true, _) => QUIET_LOG_LEVEL,
        (false, Some(level)) => level,
        (false, None) => DEFAULT_LOG_LEVEL,
    }
}

/// Start logging to stderr
///
/// `RUST_LOG` takes precedence over `spec` when set. The returned handle
/// must be kept alive for the lifetime of the program.
///
/// # Errors
///
/// Returns an error if the specification cannot be parsed or a logger is
/// already installed
pub fn init_logging(spec: &str) -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(spec)?
        .log_to_stderr()
        .start()?;
    Ok(handle)
}
