//! Logging setup
//!
//! The terminal belongs to the UI, so log output goes to a daily-rolling
//! file under the config directory. `RUST_LOG` takes precedence over the
//! configured filter.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    pub default_filter: String,
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered lines when dropped and must be kept
/// alive until the application exits.
pub fn init(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "hourtracker-tui.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(file_layer).try_init()?;

    tracing::info!(log_dir = %config.log_dir.display(), "logging initialised");
    Ok(guard)
}
