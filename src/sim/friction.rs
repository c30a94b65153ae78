//! Per-tick isotropic velocity damping
//!
//! The coefficient is a retention factor in (0, 1]: 1.0 leaves the velocity
//! untouched, anything lower bleeds speed every tick. It is validated once at
//! construction so the tick itself never has to re-check it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::FRICTION;
use crate::error::{SimError, SimResult};

/// Validated velocity retention factor in (0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FrictionCoefficient(f64);

impl FrictionCoefficient {
    /// No damping at all (vacuum)
    pub const VACUUM: Self = Self(1.0);

    pub fn new(value: f64) -> SimResult<Self> {
        // NaN fails both comparisons and lands here too
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(SimError::FrictionOutOfRange { value })
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Fraction of squared speed removed per tick, `1 - c`
    #[inline]
    pub fn loss_factor(self) -> f64 {
        1.0 - self.0
    }

    #[inline]
    pub fn is_vacuum(self) -> bool {
        self.0 == 1.0
    }
}

impl Default for FrictionCoefficient {
    fn default() -> Self {
        Self(FRICTION)
    }
}

impl TryFrom<f64> for FrictionCoefficient {
    type Error = SimError;

    fn try_from(value: f64) -> SimResult<Self> {
        Self::new(value)
    }
}

impl From<FrictionCoefficient> for f64 {
    fn from(c: FrictionCoefficient) -> f64 {
        c.0
    }
}

/// Scale both velocity components by the coefficient
#[inline]
pub fn apply_friction(velocity: DVec2, coefficient: FrictionCoefficient) -> DVec2 {
    let c = coefficient.value();
    DVec2::new(velocity.x * c, velocity.y * c)
}
