//! Errors raised while loading or validating callpulse settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the settings shape.
    ///
    /// Boxed because `figment::Error` carries its full provenance chain.
    #[error("Configuration error: {0}")]
    Figment(Box<figment::Error>),

    /// A setting parsed but is out of range.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Figment(Box::new(error))
    }
}
