//! Error taxonomy for the simulation core and the ship store

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by the physics core.
///
/// Every operation is pure, so a failure recurs identically on retry. The
/// driver decides whether to halt or substitute a default.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Friction coefficient must be in (0, 1], got {value}")]
    FrictionOutOfRange { value: f64 },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid setting: {what}")]
    InvalidSetting { what: &'static str },

    #[error("Numeric domain error: {what}")]
    NumericDomain { what: &'static str },
}

impl SimError {
    /// Configuration errors are rejected before a tick runs; anything else
    /// surfaced mid-simulation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SimError::FrictionOutOfRange { .. }
                | SimError::NonFinite { .. }
                | SimError::InvalidSetting { .. }
        )
    }
}

/// Failures raised at the ship configuration boundary
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    #[error("Ship not found: {id}")]
    NotFound { id: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reject NaN and infinities instead of letting them propagate
pub fn ensure_finite(value: f64, what: &'static str) -> SimResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::NonFinite { what, value })
    }
}
