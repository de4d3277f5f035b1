#![forbid(unsafe_code)]

//! Tracing subscriber setup.
//!
//! The terminal belongs to the canvas, so log output can only go to a file.
//! Without `--log-file` no subscriber is installed and every event is
//! discarded at the callsite.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives.
pub const FILTER_ENV: &str = "SKETCH_LOG";
const DEFAULT_FILTER: &str = "info";

/// Build the filter from `SKETCH_LOG`, falling back to `info` when unset or
/// unparsable.
pub fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global fmt subscriber appending to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a global subscriber is
/// already set.
pub fn init_file_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| io::Error::other(err.to_string()))?;
    tracing::info!(path = %path.display(), "logging initialised");
    Ok(())
}
