// ABOUTME: tracing subscriber setup for the car-scraper binary.
// ABOUTME: Logs go to stderr as text or JSON, filtered by RUST_LOG.

//! Logging initialisation.
//!
//! Call [`init_logging`] once near process start. Later calls are no-ops,
//! so tests and binaries can both call it without coordinating.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Output encoding for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl From<&str> for LogFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Filter applied when `RUST_LOG` is unset.
    pub default_filter: &'static str,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            default_filter: "warn",
        }
    }
}

/// Install the global `tracing` subscriber writing to stderr.
pub fn init_logging(config: LogConfig) -> anyhow::Result<()> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_filter));

    match config.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?,
    }

    let _ = INITIALISED.set(());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!(LogFormat::from("json"), LogFormat::Json);
        assert_eq!(LogFormat::from("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from("text"), LogFormat::Text);
        assert_eq!(LogFormat::from("anything"), LogFormat::Text);
    }

    #[test]
    fn test_init_logging_twice_is_ok() {
        assert!(init_logging(LogConfig::default()).is_ok());
        assert!(init_logging(LogConfig::default()).is_ok());
    }
}
