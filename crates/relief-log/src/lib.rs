//! Structured logging for the relief terrain generator.
//!
//! Console output with uptime timestamps and module paths, plus an optional
//! JSON log file for post-mortem analysis. The level comes from `RUST_LOG`
//! when set, otherwise from the configuration.

use std::path::Path;

use relief_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Name of the JSON log file written into the log directory.
pub const LOG_FILE_NAME: &str = "relief.log";

const DEFAULT_FILTER: &str = "info";

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file
/// * `debug_build` - whether file logging is enabled at all
/// * `config` - source of the fallback log level
///
/// Must be called at most once per process.
///
/// ```no_run
/// use relief_config::Config;
/// use relief_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Filter directive derived from the configured log level.
fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.trim().to_string()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// An `EnvFilter` with the default directive.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
