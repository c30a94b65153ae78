//! Fixed timestep simulation tick
//!
//! `step` is the pure per-body update: energy is measured on the state entering
//! the tick, then friction produces the next velocity. `advance` wraps it with
//! the ship controls a driver feeds in every frame.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::energy::{EnergyRecord, compute_energy};
use super::friction::{FrictionCoefficient, apply_friction};
use super::state::{BodyState, ShipBody};
use crate::error::{SimError, SimResult, ensure_finite};
use crate::settings::Settings;

/// Result of one pure tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickOutcome {
    pub next_velocity: DVec2,
    pub record: EnergyRecord,
}

/// Control input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrustCommand {
    pub forward: bool,
    pub reverse: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

fn ensure_finite_vec(v: DVec2, what: &'static str) -> SimResult<DVec2> {
    ensure_finite(v.x, what)?;
    ensure_finite(v.y, what)?;
    Ok(v)
}

/// Advance one body by one tick.
///
/// Nothing is mutated; the caller replaces its velocity with `next_velocity`.
pub fn step(state: &BodyState, coefficient: FrictionCoefficient) -> SimResult<TickOutcome> {
    let velocity = ensure_finite_vec(state.velocity, "velocity")?;

    let record = compute_energy(velocity, coefficient, state.hit.is_active());
    if !record.symplectic.is_finite() || !record.metric.is_finite() {
        return Err(SimError::NumericDomain {
            what: "energy overflow",
        });
    }

    let next_velocity = apply_friction(velocity, coefficient);

    log::trace!(
        "tick: v=({}, {}) symp={} metr={}",
        velocity.x,
        velocity.y,
        record.symplectic,
        record.metric
    );

    Ok(TickOutcome {
        next_velocity,
        record,
    })
}

/// Run a full ship tick: burn along the current heading, steer, move, damp,
/// count down the hit timer.
///
/// `thrust` is the ship's effective thrust (config thrust times calibration).
/// The ship is only updated when the whole tick succeeds.
pub fn advance(
    ship: &mut ShipBody,
    input: &ThrustCommand,
    thrust: f64,
    settings: &Settings,
) -> SimResult<EnergyRecord> {
    let physics = &settings.physics;
    let thrust = ensure_finite(thrust, "thrust")?;

    let heading = ship.heading();
    let mut velocity = ship.velocity;
    if input.forward {
        velocity += heading * thrust;
    }
    if input.reverse {
        velocity -= heading * (thrust * physics.reverse_thrust_ratio);
    }

    let turn = physics.turn_speed * settings.calibration.turn_sensitivity;
    let mut angle = ship.angle;
    if input.turn_left {
        angle += turn;
    }
    if input.turn_right {
        angle -= turn;
    }
    let angle = ensure_finite(angle, "angle")?;

    let position = ensure_finite_vec(ship.position + velocity, "position")?;
    let outcome = step(&BodyState::new(velocity, ship.hit), physics.friction)?;

    ship.angle = angle;
    ship.position = position;
    ship.velocity = outcome.next_velocity;
    ship.hit = ship.hit.ticked();
    ship.time_ticks += 1;

    Ok(outcome.record)
}
