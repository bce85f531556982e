//! File logging. The terminal belongs to the UI, so events go to
//! `dessert-clicker.log` under the configured directory.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

pub const LOG_FILE_NAME: &str = "dessert-clicker.log";

/// Installs the global subscriber. Keep the guard alive until exit or
/// buffered lines are lost. Fails when the log directory cannot be created.
pub fn init(config: &Config) -> Result<WorkerGuard, InitError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(&config.log_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // RUST_LOG wins over the configured filter.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init();

    Ok(guard)
}
