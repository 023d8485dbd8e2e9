//! Logging setup for the server.
//!
//! Builds a fern dispatcher from the logging section of the configuration
//! and installs it as the global `log` backend.

use anyhow::Result;
use log::LevelFilter;

use crate::config::LoggingConfig;

fn level_filter(level: &str) -> LevelFilter {
    match level {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Install the global logger. Does nothing when logging is disabled.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level_filter(&config.level))
        // sqlx statement logging is too chatty at info
        .level_for("sqlx", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}
