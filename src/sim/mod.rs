//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One call per body per tick, no hidden state
//! - Friction passed in explicitly, never read from globals
//! - Fixed summation order for every reduction
//! - No rendering, storage or platform dependencies

pub mod energy;
pub mod friction;
pub mod golden;
pub mod state;
pub mod tick;

pub use energy::{EnergyRecord, compute_energy, friction_loss, speed_squared};
pub use friction::{FrictionCoefficient, apply_friction};
pub use golden::{PHI, golden_value, hub_position, hub_ring_scale};
pub use state::{BodyState, HitTimer, ShipBody};
pub use tick::{ThrustCommand, TickOutcome, advance, step};
