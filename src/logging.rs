//! Tracing subscriber setup.
//!
//! The filter comes from `TRIPANE_LOG`, then the `log_level` setting, then
//! `info`. While the terminal UI owns the screen, events go to a daily
//! rolling file under the data directory; everything else logs to stderr.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TRIPANE_LOG";

const DEFAULT_LEVEL: &str = "info";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Rolling file, for the terminal UI.
    File,
    /// Standard error, for one-shot commands.
    Stderr,
}

/// Directory holding the rolling log files.
pub fn log_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("tripane").join("logs"))
}

fn env_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held
/// until the program exits.
pub fn init(target: LogTarget, configured: Option<&str>) -> Option<WorkerGuard> {
    let filter = env_filter(configured);

    match target {
        LogTarget::Stderr => {
            let _ = fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
            None
        }
        LogTarget::File => {
            let dir = log_dir()?;
            if let Err(e) = std::fs::create_dir_all(&dir) {
                eprintln!("tripane: logging disabled, cannot create {}: {e}", dir.display());
                return None;
            }

            let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&dir, "tripane.log"));
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter);

            tracing_subscriber::registry().with(layer).try_init().ok()?;
            Some(guard)
        }
    }
}
