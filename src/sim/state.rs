//! Ship body and hit state
//!
//! Everything a driver must carry between ticks for a single ship lives here.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::SPAWN_ANGLE;

/// Damage countdown set by the collision system.
///
/// The physics core only reads it; counting down is the driver's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitTimer {
    pub ticks: u32,
}

impl HitTimer {
    pub const IDLE: Self = Self { ticks: 0 };

    pub fn new(ticks: u32) -> Self {
        Self { ticks }
    }

    /// A damage event is active this tick
    #[inline]
    pub fn is_active(&self) -> bool {
        self.ticks > 0
    }

    /// Restart the countdown (a fresh hit never shortens a running one)
    pub fn strike(&mut self, ticks: u32) {
        self.ticks = self.ticks.max(ticks);
    }

    /// Timer value for the next tick
    #[must_use]
    pub fn ticked(self) -> Self {
        Self {
            ticks: self.ticks.saturating_sub(1),
        }
    }
}

impl From<bool> for HitTimer {
    fn from(active: bool) -> Self {
        Self {
            ticks: u32::from(active),
        }
    }
}

/// Input to a pure tick: the motion entering the tick and its damage state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyState {
    pub velocity: DVec2,
    pub hit: HitTimer,
}

impl BodyState {
    pub fn new(velocity: DVec2, hit: impl Into<HitTimer>) -> Self {
        Self {
            velocity,
            hit: hit.into(),
        }
    }
}

/// The player's ship as the driver sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipBody {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Heading in radians; screen y grows downward so forward is (cos a, -sin a)
    pub angle: f64,
    pub hit: HitTimer,
    /// Ticks simulated so far
    #[serde(default)]
    pub time_ticks: u64,
}

impl ShipBody {
    /// Spawn at rest in the centre of the world, nose up
    pub fn spawn(world_size: f64) -> Self {
        Self {
            position: DVec2::splat(world_size / 2.0),
            velocity: DVec2::ZERO,
            angle: SPAWN_ANGLE,
            hit: HitTimer::IDLE,
            time_ticks: 0,
        }
    }

    /// Unit vector the nose points along
    #[inline]
    pub fn heading(&self) -> DVec2 {
        DVec2::new(self.angle.cos(), -self.angle.sin())
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_timer_countdown() {
        let mut hit = HitTimer::IDLE;
        assert!(!hit.is_active());

        hit.strike(2);
        assert!(hit.is_active());
        let hit = hit.ticked();
        assert!(hit.is_active());
        let hit = hit.ticked();
        assert!(!hit.is_active());
        assert_eq!(hit.ticked(), HitTimer::IDLE);
    }

    #[test]
    fn test_strike_keeps_longer_timer() {
        let mut hit = HitTimer::new(40);
        hit.strike(5);
        assert_eq!(hit.ticks, 40);
        hit.strike(60);
        assert_eq!(hit.ticks, 60);
    }

    #[test]
    fn test_bool_conversion() {
        assert!(HitTimer::from(true).is_active());
        assert!(!HitTimer::from(false).is_active());
    }

    #[test]
    fn test_spawn_centered_facing_up() {
        let ship = ShipBody::spawn(12000.0);
        assert_eq!(ship.position, DVec2::new(6000.0, 6000.0));
        assert_eq!(ship.speed(), 0.0);
        let heading = ship.heading();
        assert!(heading.x.abs() < 1e-12);
        assert!((heading.y + 1.0).abs() < 1e-12);
    }
}
