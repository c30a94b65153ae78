//! Quasar Pro - physics core of an open-world arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic per-tick physics, energy accounting and the golden operator
//! - `settings`: Physics constants and player calibration
//! - `ships`: Ship configuration schema and built-in catalog
//! - `persistence`: Hangar storage for ship configurations

pub mod error;
pub mod persistence;
pub mod settings;
pub mod ships;
pub mod sim;

pub use error::{SimError, SimResult, StoreError, StoreResult};
pub use persistence::ShipStore;
pub use settings::{Calibration, PhysicsSettings, Settings};
pub use ships::{ShipConfig, ShipIdGenerator, ShipModel};

/// Game configuration constants
pub mod consts {
    /// Per-tick velocity retention
    pub const FRICTION: f64 = 0.985;
    /// Side length of the square world
    pub const WORLD_SIZE: f64 = 12000.0;

    /// Ship handling
    pub const SHIP_TURN_SPEED: f64 = 0.08;
    pub const REVERSE_THRUST_RATIO: f64 = 0.5;
    /// Ships spawn nose up
    pub const SPAWN_ANGLE: f64 = std::f64::consts::FRAC_PI_2;

    /// Ticks a collision keeps the hit state active (one second at 60 Hz)
    pub const HIT_TIMER_TICKS: u32 = 60;
    /// Hull points before a ship's health bonus
    pub const BASE_HULL_POINTS: i32 = 100;
    /// Entropy charged to the metric term while a hit is active
    pub const DAMAGE_ENTROPY: f64 = 1.0;
}
