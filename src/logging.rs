use color_eyre::Result;
use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry::Registry};

/// Environment variable overriding the configured log filter
pub const LOG_ENV: &str = "MENU_SELECTOR_LOG";

/// Sends tracing output to a daily rolling file.
///
/// The terminal belongs to the menu, so nothing is written to stdout. The
/// filter comes from `MENU_SELECTOR_LOG` when set, else `default_level`.
pub fn init_logging(log_dir: &Path, default_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    std::fs::create_dir_all(log_dir)?;
    let file_appender = rolling::daily(log_dir, "menu-selector.log");

    Registry::default()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Logging initialized");
    Ok(())
}
