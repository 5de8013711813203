//! # taskboard-telemetry
//!
//! Installs the global `tracing` subscriber: an [`EnvFilter`] built from the
//! configured levels (overridden by `RUST_LOG`) feeding either a JSON or a
//! human-readable `fmt` layer.

#![deny(unsafe_code)]

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Errors raised while setting up telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("unknown log level '{0}'")]
    InvalidLevel(String),

    #[error("subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Configuration for the telemetry subsystem.
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    /// Default log level. Overridden by `RUST_LOG`.
    pub log_level: Level,
    /// Per-module level overrides (e.g. `taskboard_store` => DEBUG).
    pub module_levels: Vec<(String, Level)>,
    /// JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            module_levels: Vec::new(),
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Build from textual levels, as they appear in settings files.
    pub fn from_parts<I, K, V>(level: &str, modules: I, json: bool) -> Result<Self, TelemetryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let log_level = parse_level(level)?;
        let module_levels = modules
            .into_iter()
            .map(|(module, lvl)| parse_level(lvl.as_ref()).map(|l| (module.into(), l)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            log_level,
            module_levels,
            json,
        })
    }

    /// `EnvFilter` directives, e.g. `info,taskboard_store=debug`.
    pub fn filter_directives(&self) -> String {
        let mut filter = self.log_level.to_string().to_lowercase();
        for (module, level) in &self.module_levels {
            filter.push_str(&format!(",{}={}", module, level.to_string().to_lowercase()));
        }
        filter
    }
}

fn parse_level(raw: &str) -> Result<Level, TelemetryError> {
    Level::from_str(raw.trim()).map_err(|_| TelemetryError::InvalidLevel(raw.to_string()))
}

/// Install the global subscriber. Call once at startup.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()));

    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_span_list(true)
            .with_filter(env_filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_info() {
        assert_eq!(TelemetryConfig::default().filter_directives(), "info");
    }

    #[test]
    fn module_levels_are_appended() {
        let config = TelemetryConfig::from_parts(
            "warn",
            [("taskboard_store", "debug"), ("tower_http", "trace")],
            false,
        )
        .unwrap();
        assert_eq!(
            config.filter_directives(),
            "warn,taskboard_store=debug,tower_http=trace"
        );
    }

    #[test]
    fn level_names_are_case_insensitive() {
        let config = TelemetryConfig::from_parts("DEBUG", Vec::<(String, String)>::new(), true).unwrap();
        assert_eq!(config.log_level, Level::DEBUG);
        assert!(config.json);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = TelemetryConfig::from_parts("loud", Vec::<(String, String)>::new(), false).unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidLevel(ref l) if l == "loud"));
    }

    #[test]
    fn second_init_fails_instead_of_panicking() {
        let config = TelemetryConfig::default();
        let first = init_telemetry(&config);
        let second = init_telemetry(&config);
        // Another test may have installed the subscriber first.
        assert!(first.is_ok() || second.is_err());
        assert!(second.is_err());
    }
}
