//! Tracing setup: human-readable stdout plus a daily rolling JSON log file.

use std::fs;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::error::AppError;

const LOG_FILE_PREFIX: &str = "calmjournal.log";

/// Install the global subscriber. Keep the returned guard alive for the whole
/// process, dropping it flushes and stops the file writer.
pub fn init_tracing(config: &AppConfig) -> Result<WorkerGuard, AppError> {
    fs::create_dir_all(&config.log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let bunyan = BunyanFormattingLayer::new(format!("calmjournal-{}", config.environment), non_blocking);

    tracing_subscriber::registry()
        .with(filter)
        .with(JsonStorageLayer)
        .with(bunyan)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to install tracing subscriber: {}", e)))?;

    info!(
        environment = %config.environment,
        log_dir = %config.log_dir.display(),
        "CalmJournal startup"
    );

    Ok(guard)
}
