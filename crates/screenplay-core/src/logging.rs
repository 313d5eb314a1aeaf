#![forbid(unsafe_code)]

//! Logging bootstrap.
//!
//! Library crates emit `tracing` events behind their own `tracing` feature.
//! Binaries call [`init`] once at startup to install a subscriber:
//!
//! - `SCREENPLAY_LOG` holds an `EnvFilter` directive (default `warn`).
//! - `SCREENPLAY_LOG_FORMAT=json` switches to one JSON object per line.
//!
//! Output goes to stderr so it never interleaves with terminal drawing on
//! stdout. Without the `tracing-json` feature, [`init`] does nothing.

use std::fmt;

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "SCREENPLAY_LOG";

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "SCREENPLAY_LOG_FORMAT";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// A global subscriber could not be installed (usually: one already is).
#[derive(Debug)]
pub struct LogInitError(String);

impl fmt::Display for LogInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "logging init: {}", self.0)
    }
}

impl std::error::Error for LogInitError {}

/// Output format for the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line events.
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse a format name; anything but `json` (any case) is text.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }

    /// Format selected by [`LOG_FORMAT_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or(Self::Text)
    }
}

/// Install the global subscriber described by the environment.
#[cfg(feature = "tracing-json")]
pub fn init() -> Result<(), LogInitError> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt as tfmt};

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let registry = tracing_subscriber::registry().with(filter);
    let result = match LogFormat::from_env() {
        LogFormat::Json => registry
            .with(tfmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(tfmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    result.map_err(|err| LogInitError(err.to_string()))?;
    tracing::debug!(format = ?LogFormat::from_env(), "logging initialized");
    Ok(())
}

/// Install the global subscriber described by the environment.
#[cfg(not(feature = "tracing-json"))]
pub fn init() -> Result<(), LogInitError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
    }

    #[test]
    fn init_error_display() {
        let err = LogInitError("already set".into());
        assert_eq!(err.to_string(), "logging init: already set");
    }
}
