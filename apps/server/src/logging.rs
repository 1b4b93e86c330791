//! Logging initialization.
//!
//! Builds a `tracing` subscriber from [`LoggingConfig`]: env-filter based
//! level control, optional JSON output, optional daily-rotated file sink.

use crate::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keep this guard alive for the lifetime of the process; dropping it flushes
/// and stops the background file writer.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    // RUST_LOG wins over the configured level so operators can override
    // without touching config files.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let mut file_guard = None;
    // Build the optional file sink inside each branch: the two console formats
    // (JSON vs plain) produce different subscriber types, so the file layer's
    // subscriber type parameter cannot be shared across both branches.
    macro_rules! file_layer {
        () => {
            if config.file_enabled {
                let appender = tracing_appender::rolling::daily(
                    &config.file_directory,
                    &config.service_name,
                );
                let (writer, guard) = tracing_appender::non_blocking(appender);
                file_guard = Some(guard);
                Some(fmt::layer().with_writer(writer).with_ansi(false))
            } else {
                None
            }
        };
    }

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_current_span(false))
            .with(file_layer!())
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .with(file_layer!())
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
    }

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
