//! Simulation settings and player calibration
//!
//! Persisted as JSON next to the hangar file. Everything here is read-only once
//! a run starts; the friction coefficient is validated while loading so a bad
//! file is rejected before the first tick.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult, StoreError, StoreResult, ensure_finite};
use crate::sim::FrictionCoefficient;

/// Physics constants for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Per-tick velocity retention
    pub friction: FrictionCoefficient,
    /// Radians turned per tick at sensitivity 1.0
    pub turn_speed: f64,
    pub world_size: f64,
    /// Ticks a hit stays active
    pub hit_timer_ticks: u32,
    /// Reverse burn as a fraction of forward thrust
    pub reverse_thrust_ratio: f64,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            friction: FrictionCoefficient::default(),
            turn_speed: SHIP_TURN_SPEED,
            world_size: WORLD_SIZE,
            hit_timer_ticks: HIT_TIMER_TICKS,
            reverse_thrust_ratio: REVERSE_THRUST_RATIO,
        }
    }
}

impl PhysicsSettings {
    /// Vacuum preset: no damping (useful for conservation checks)
    pub fn vacuum() -> Self {
        Self {
            friction: FrictionCoefficient::VACUUM,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        ensure_finite(self.turn_speed, "turn_speed")?;
        ensure_finite(self.world_size, "world_size")?;
        let ratio = ensure_finite(self.reverse_thrust_ratio, "reverse_thrust_ratio")?;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(SimError::InvalidSetting {
                what: "reverse_thrust_ratio outside [0, 1]",
            });
        }
        Ok(())
    }
}

/// Player-tunable control multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Calibration {
    pub thrust_sensitivity: f64,
    pub turn_sensitivity: f64,
    pub gravitational_force: f64,
    pub speed_factor: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            thrust_sensitivity: 1.0,
            turn_sensitivity: 1.0,
            gravitational_force: 1.0,
            speed_factor: 1.0,
        }
    }
}

impl Calibration {
    pub fn validate(&self) -> SimResult<()> {
        for (what, value) in [
            ("thrustSensitivity", self.thrust_sensitivity),
            ("turnSensitivity", self.turn_sensitivity),
            ("gravitationalForce", self.gravitational_force),
            ("speedFactor", self.speed_factor),
        ] {
            if ensure_finite(value, what)? < 0.0 {
                return Err(SimError::InvalidSetting {
                    what: "calibration multipliers must be non-negative",
                });
            }
        }
        Ok(())
    }
}

/// Game settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsSettings,
    pub calibration: Calibration,
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings
            .physics
            .validate()
            .map_err(|e| StoreError::InvalidField {
                field: "physics",
                reason: e.to_string(),
            })?;
        settings
            .calibration
            .validate()
            .map_err(|e| StoreError::InvalidField {
                field: "calibration",
                reason: e.to_string(),
            })?;
        Ok(settings)
    }

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from disk
    pub fn load(path: &Path) -> StoreResult<Self> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults only if the file is absent.
    ///
    /// A present but invalid file is still an error.
    pub fn load_or_default(path: &Path) -> StoreResult<Self> {
        match Self::load(path) {
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn save(&self, path: &Path) -> StoreResult<()> {
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.physics.friction.value(), 0.985);
        assert_eq!(s.physics.world_size, 12000.0);
        assert_eq!(s.physics.hit_timer_ticks, 60);
        assert_eq!(s.calibration.thrust_sensitivity, 1.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"physics": {"friction": 1.0}}"#).unwrap();
        assert!(s.physics.friction.is_vacuum());
        assert_eq!(s.physics.turn_speed, SHIP_TURN_SPEED);
        assert_eq!(s.calibration, Calibration::default());
    }

    #[test]
    fn test_invalid_friction_rejected_at_load() {
        for bad in ["0.0", "-0.2", "1.2"] {
            let json = format!(r#"{{"physics": {{"friction": {bad}}}}}"#);
            assert!(matches!(
                Settings::from_json(&json),
                Err(StoreError::Json(_))
            ));
        }
    }

    #[test]
    fn test_invalid_reverse_ratio_rejected() {
        let err = Settings::from_json(r#"{"physics": {"reverse_thrust_ratio": 2.0}}"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidField { field: "physics", .. }));
    }

    #[test]
    fn test_invalid_calibration_rejected() {
        let err = Settings::from_json(r#"{"calibration": {"turnSensitivity": -1.0}}"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidField { field: "calibration", .. }));

        let nan = Calibration {
            turn_sensitivity: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(SimError::NonFinite { what: "turnSensitivity", .. })
        ));
        assert!(Calibration::default().validate().is_ok());
    }

    #[test]
    fn test_calibration_uses_camel_case() {
        let s = Settings::from_json(r#"{"calibration": {"thrustSensitivity": 1.5}}"#).unwrap();
        assert_eq!(s.calibration.thrust_sensitivity, 1.5);
        assert_eq!(s.calibration.turn_sensitivity, 1.0);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.calibration.turn_sensitivity = 0.5;
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Settings::load_or_default(&path).is_err());
    }
}
