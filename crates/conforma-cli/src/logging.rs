//! Structured logging setup for the CLI
//!
//! Logging goes to stderr through `tracing-subscriber` so machine-readable
//! output on stdout stays clean. A per-invocation session id ties log lines
//! from one run together.

use crate::error::{Error, Result};
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Session ID for the current invocation
static SESSION_ID: OnceLock<String> = OnceLock::new();

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Include event targets in output
    pub show_target: bool,
}

impl LoggingConfig {
    /// Derive a configuration from the `-v` count.
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        Self {
            level: level.to_string(),
            show_target: verbosity >= 2,
        }
    }

    /// Apply the `CONFORMA_LOG` environment override.
    pub fn merge_with_env(&mut self) {
        if let Ok(level) = std::env::var("CONFORMA_LOG") {
            self.level = level;
        }
    }
}

/// The session id for this invocation.
pub fn session_id() -> &'static str {
    SESSION_ID.get_or_init(|| Uuid::new_v4().to_string())
}

/// Initialize the logging system
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .map_err(|error| Error::config(format!("invalid log filter '{}': {error}", config.level)))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(config.show_target)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|error| Error::other(format!("failed to initialize logging: {error}")))?;

    tracing::debug!(session_id = %session_id(), "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LoggingConfig::from_verbosity(0).level, "warn");
        assert_eq!(LoggingConfig::from_verbosity(1).level, "info");
        assert_eq!(LoggingConfig::from_verbosity(2).level, "debug");
        assert_eq!(LoggingConfig::from_verbosity(9).level, "trace");
    }

    #[test]
    fn test_session_id_is_stable_within_a_run() {
        assert_eq!(session_id(), session_id());
    }
}
