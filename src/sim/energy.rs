//! Per-tick energy accounting
//!
//! Two scalars are produced for every tick:
//! - symplectic: `0.5 * v²`, the kinetic term a frictionless, undamaged body conserves
//! - metric: what the tick dissipated, friction loss plus a flat damage entropy
//!
//! Squared speed is always summed x-term first so results are bit-reproducible.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::friction::FrictionCoefficient;
use crate::consts::DAMAGE_ENTROPY;

/// Energy bookkeeping for a single tick (never mutated after creation)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    pub symplectic: f64,
    pub metric: f64,
}

impl EnergyRecord {
    /// True when the tick dissipated nothing
    pub fn is_conservative(&self) -> bool {
        self.metric == 0.0
    }
}

/// Squared speed with a fixed summation order
#[inline]
pub fn speed_squared(velocity: DVec2) -> f64 {
    velocity.x * velocity.x + velocity.y * velocity.y
}

/// Energy removed by damping this tick; exactly zero in vacuum
#[inline]
pub fn friction_loss(velocity: DVec2, coefficient: FrictionCoefficient) -> f64 {
    coefficient.loss_factor() * speed_squared(velocity)
}

/// Compute the tick's energy record.
///
/// The damage contribution is a fixed magnitude independent of speed: a hit
/// while stationary costs the same as a hit at full burn.
pub fn compute_energy(
    velocity: DVec2,
    coefficient: FrictionCoefficient,
    hit_active: bool,
) -> EnergyRecord {
    let v_sq = speed_squared(velocity);
    let symplectic = 0.5 * v_sq;

    let loss = coefficient.loss_factor() * v_sq;
    let damage_entropy = if hit_active { DAMAGE_ENTROPY } else { 0.0 };

    EnergyRecord {
        symplectic,
        metric: loss + damage_entropy,
    }
}
