//! Ship configuration schema
//!
//! Records are validated here, at the store boundary, so the physics core only
//! ever sees a finite thrust value.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::settings::Calibration;

/// Hull models
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipModel {
    Interceptor,
    Titan,
    Specter,
    Vortex,
    Explorer,
    Tank,
    Mothership,
}

impl ShipModel {
    pub const ALL: [ShipModel; 7] = [
        ShipModel::Interceptor,
        ShipModel::Titan,
        ShipModel::Specter,
        ShipModel::Vortex,
        ShipModel::Explorer,
        ShipModel::Tank,
        ShipModel::Mothership,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipModel::Interceptor => "INTERCEPTOR",
            ShipModel::Titan => "TITAN",
            ShipModel::Specter => "SPECTER",
            ShipModel::Vortex => "VORTEX",
            ShipModel::Explorer => "EXPLORER",
            ShipModel::Tank => "TANK",
            ShipModel::Mothership => "MOTHERSHIP",
        }
    }

    /// Human-facing name ("Interceptor")
    pub fn display_name(&self) -> String {
        let s = self.as_str();
        format!("{}{}", &s[..1], s[1..].to_lowercase())
    }

    /// Built-in stats for this hull
    pub fn base_config(&self) -> ShipConfig {
        let (id, color, thrust, health_bonus, defense, attack_power) = match self {
            ShipModel::Interceptor => ("interceptor", "#0ea5e9", 0.4, 0, 1.0, 1.0),
            ShipModel::Titan => ("titan", "#10b981", 0.25, 50, 2.0, 1.2),
            ShipModel::Specter => ("specter", "#a855f7", 0.55, -20, 0.5, 1.5),
            ShipModel::Vortex => ("vortex", "#f59e0b", 0.35, 0, 1.2, 1.1),
            ShipModel::Explorer => ("explorer", "#38bdf8", 0.65, -10, 0.3, 0.8),
            ShipModel::Tank => ("tank", "#f43f5e", 0.3, 40, 1.8, 1.3),
            ShipModel::Mothership => ("mothership", "#fff", 0.15, 200, 5.0, 0.5),
        };
        ShipConfig {
            id: id.to_string(),
            model: *self,
            name: None,
            color: color.to_string(),
            thrust,
            health_bonus,
            defense,
            attack_power,
            is_custom: None,
        }
    }
}

impl fmt::Display for ShipModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipModel {
    type Err = StoreError;

    fn from_str(s: &str) -> StoreResult<Self> {
        ShipModel::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| StoreError::InvalidField {
                field: "model",
                reason: format!("unknown ship model '{s}'"),
            })
    }
}

fn default_multiplier() -> f64 {
    1.0
}

/// A persisted ship configuration.
///
/// Required on the wire: `id`, `model`, `color`, `thrust`, `healthBonus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipConfig {
    pub id: String,
    pub model: ShipModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `#rgb` or `#rrggbb`
    pub color: String,
    /// Thrust per tick at calibration 1.0, in (0, 1]
    pub thrust: f64,
    pub health_bonus: i32,
    #[serde(default = "default_multiplier")]
    pub defense: f64,
    #[serde(default = "default_multiplier")]
    pub attack_power: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_custom: Option<bool>,
}

impl ShipConfig {
    pub fn is_custom(&self) -> bool {
        self.is_custom.unwrap_or(false)
    }

    /// Thrust fed into the simulation
    pub fn effective_thrust(&self, calibration: &Calibration) -> f64 {
        self.thrust * calibration.thrust_sensitivity
    }

    /// Hull points for a given base, never below one
    pub fn max_health(&self, base: i32) -> i32 {
        base.saturating_add(self.health_bonus).max(1)
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(StoreError::MissingField("id"));
        }
        if !is_hex_color(&self.color) {
            return Err(StoreError::InvalidField {
                field: "color",
                reason: format!("'{}' is not a #rgb or #rrggbb color", self.color),
            });
        }
        if !(self.thrust.is_finite() && self.thrust > 0.0 && self.thrust <= 1.0) {
            return Err(StoreError::InvalidField {
                field: "thrust",
                reason: format!("{} is outside (0, 1]", self.thrust),
            });
        }
        for (field, value) in [("defense", self.defense), ("attackPower", self.attack_power)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(StoreError::InvalidField {
                    field,
                    reason: format!("{value} must be a finite non-negative number"),
                });
            }
        }
        Ok(())
    }
}

fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Prefix for player-built ships
pub const CUSTOM_ID_PREFIX: &str = "custom_";

/// Generates unique ids for custom ships.
///
/// Ids are `custom_<millis>`; a second request in the same (or an earlier)
/// millisecond gets a `-<n>` suffix instead of reusing the timestamp.
#[derive(Debug, Clone, Default)]
pub struct ShipIdGenerator {
    last_millis: Option<u64>,
    seq: u32,
}

impl ShipIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for a ship created at `now_millis`
    pub fn next_id(&mut self, now_millis: u64) -> String {
        match self.last_millis {
            Some(last) if now_millis <= last => {
                self.seq += 1;
                format!("{CUSTOM_ID_PREFIX}{last}-{}", self.seq)
            }
            _ => {
                self.last_millis = Some(now_millis);
                self.seq = 0;
                format!("{CUSTOM_ID_PREFIX}{now_millis}")
            }
        }
    }

    /// Id stamped with the wall clock
    pub fn generate(&mut self) -> String {
        self.next_id(now_millis())
    }
}

/// Milliseconds since the Unix epoch (zero if the clock is before it)
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_ship() -> ShipConfig {
        ShipConfig {
            id: "custom_123".to_string(),
            model: ShipModel::Interceptor,
            name: Some("Ghost Rider".to_string()),
            color: "#ff0000".to_string(),
            thrust: 0.6,
            health_bonus: 20,
            defense: 1.0,
            attack_power: 1.0,
            is_custom: Some(true),
        }
    }

    #[test]
    fn test_schema_keys() {
        let json = serde_json::to_value(custom_ship()).unwrap();
        for key in ["id", "model", "color", "thrust", "healthBonus"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["model"], "INTERCEPTOR");
        assert_eq!(json["isCustom"], true);
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let json = r##"{"id": "x", "model": "TITAN", "color": "#fff", "thrust": 0.3}"##;
        let err = serde_json::from_str::<ShipConfig>(json).unwrap_err();
        assert!(err.to_string().contains("healthBonus"));
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r##"{"id": "x", "model": "TITAN", "color": "#fff", "thrust": 0.3, "healthBonus": 5}"##;
        let ship: ShipConfig = serde_json::from_str(json).unwrap();
        assert_eq!(ship.name, None);
        assert!(!ship.is_custom());
        assert_eq!(ship.defense, 1.0);
        assert!(ship.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(custom_ship().validate().is_ok());

        let mut bad = custom_ship();
        bad.thrust = 0.0;
        assert!(matches!(bad.validate(), Err(StoreError::InvalidField { field: "thrust", .. })));

        let mut bad = custom_ship();
        bad.color = "red".to_string();
        assert!(matches!(bad.validate(), Err(StoreError::InvalidField { field: "color", .. })));

        let mut bad = custom_ship();
        bad.id = "  ".to_string();
        assert!(matches!(bad.validate(), Err(StoreError::MissingField("id"))));
    }

    #[test]
    fn test_catalog_is_valid() {
        for model in ShipModel::ALL {
            let ship = model.base_config();
            assert_eq!(ship.model, model);
            assert!(ship.validate().is_ok(), "{model} base config invalid");
        }
        assert_eq!(ShipModel::Titan.base_config().health_bonus, 50);
    }

    #[test]
    fn test_model_names() {
        assert_eq!(ShipModel::Mothership.display_name(), "Mothership");
        assert_eq!("specter".parse::<ShipModel>().unwrap(), ShipModel::Specter);
        assert!("frigate".parse::<ShipModel>().is_err());
    }

    #[test]
    fn test_effective_thrust_and_health() {
        let ship = custom_ship();
        let calibration = Calibration {
            thrust_sensitivity: 0.5,
            ..Default::default()
        };
        assert_eq!(ship.effective_thrust(&calibration), 0.3);
        assert_eq!(ship.max_health(100), 120);
        assert_eq!(ShipModel::Specter.base_config().max_health(10), 1);
    }

    #[test]
    fn test_ids_differ_across_timestamps() {
        let mut ids = ShipIdGenerator::new();
        let id1 = ids.next_id(1_700_000_000);
        let id2 = ids.next_id(1_700_000_001);
        assert_eq!(id1, "custom_1700000000");
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_wall_clock_ids() {
        // 2020-09-13
        assert!(now_millis() > 1_600_000_000_000);
        let id = ShipIdGenerator::new().generate();
        let millis: u64 = id.strip_prefix(CUSTOM_ID_PREFIX).unwrap().parse().unwrap();
        assert!(millis > 1_600_000_000_000);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut ids = ShipIdGenerator::new();
        let seen: std::collections::HashSet<String> =
            (0..10).map(|_| ids.next_id(1_700_000_000)).collect();
        assert_eq!(seen.len(), 10);

        // A clock step backwards must not reissue an old id
        let back = ids.next_id(1_699_999_999);
        assert!(!seen.contains(&back));
    }
}
