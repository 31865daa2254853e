//! File-based logging setup
//!
//! Log records go to a file under the data directory; stdout stays
//! reserved for the JSON update records.

use std::fs;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::data_dir;

/// Log file name under the data directory
const LOG_FILE: &str = "release-watch.log";

/// Initializes file logging.
///
/// Returns the guard that flushes buffered records on drop; keep it
/// alive for the lifetime of the process.
pub fn init() -> Result<WorkerGuard> {
    let dir = data_dir();
    fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
