//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFileWriter;
use crate::infrastructure::{resolve_data_dir, LOG_FILE};
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither `RUST_LOG` nor the configuration sets one.
const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber writing to the rotating log file.
///
/// The filter comes from `RUST_LOG` when set, then `config.trace_level`, then
/// `"info"`. The log file is `giveaway.log` in the data directory.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently does nothing if the directory cannot be created
/// - Idempotent: only the first successful call installs a subscriber
///
/// # Example
///
/// ```no_run
/// use giveaway::observability::init_tracing;
/// use giveaway::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = resolve_data_dir(config.data_dir.as_deref());
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let writer = RotatingFileWriter::new(data_dir.join(LOG_FILE));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter(config.trace_level.as_deref()))
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        );

    let _ = subscriber.try_init();
}

fn env_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(configured.unwrap_or(DEFAULT_LEVEL)))
}
