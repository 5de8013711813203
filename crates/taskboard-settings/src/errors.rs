//! Settings error types.

use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or did not match the settings schema.
    #[error("settings error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A value was well-formed but unusable.
    #[error("invalid setting {key}: {reason}")]
    Invalid {
        /// Dotted settings key.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<figment::Error> for SettingsError {
    fn from(e: figment::Error) -> Self {
        Self::Figment(Box::new(e))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SettingsError>;
