//! Follow-up scoring settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default deal value before the sentiment multiplier.
const fn default_base_value() -> f64 {
    1000.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoringSettings {
    /// Base potential value of a lead, in account currency units.
    #[serde(default = "default_base_value")]
    pub base_value: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            base_value: default_base_value(),
        }
    }
}

impl ScoringSettings {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a negative or non-finite base value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_value.is_finite() || self.base_value < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.base_value".into(),
                reason: format!("must be a non-negative number, got {}", self.base_value),
            });
        }
        Ok(())
    }
}
