use thiserror::Error;

/// Rejected vessel or subsystem configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("sideways drag {sideways} must be at least 400x forward drag {forward}")]
    SidewaysDragTooLow { sideways: f32, forward: f32 },

    #[error("bow/stern torque split must sum to 1.0, got {bow} + {stern}")]
    PlaneSplit { bow: f32, stern: f32 },

    #[error("{field}: lower bound {low} is not below upper bound {high}")]
    InvertedRange { field: &'static str, low: f32, high: f32 },

    #[error("unknown vessel class `{0}`")]
    UnknownClass(String),
}

impl ConfigError {
    pub(crate) fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NonPositive { field, value })
        }
    }

    pub(crate) fn check_range(field: &'static str, low: f32, high: f32) -> Result<(), ConfigError> {
        if low < high {
            Ok(())
        } else {
            Err(ConfigError::InvertedRange { field, low, high })
        }
    }
}
