//! Ship configuration store

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::ships::{ShipConfig, ShipIdGenerator, ShipModel};

/// Prefix for catalog ships seeded into an empty hangar
pub const DEFAULT_ID_PREFIX: &str = "default_";

/// On-disk layout
#[derive(Debug, Serialize, Deserialize)]
struct HangarFile {
    ships: Vec<ShipConfig>,
}

/// Ship configurations keyed by id (iteration is ordered by id)
#[derive(Debug, Clone, Default)]
pub struct ShipStore {
    ships: BTreeMap<String, ShipConfig>,
    ids: ShipIdGenerator,
}

impl ShipStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill an empty store with one record per built-in model.
    ///
    /// Returns the number of records added (zero if anything was stored).
    pub fn seed_defaults(&mut self) -> usize {
        if !self.ships.is_empty() {
            return 0;
        }
        for model in ShipModel::ALL {
            let ship = ShipConfig {
                id: format!("{DEFAULT_ID_PREFIX}{}", model.as_str()),
                name: Some(model.display_name()),
                is_custom: Some(false),
                ..model.base_config()
            };
            self.ships.insert(ship.id.clone(), ship);
        }
        log::info!("Seeded hangar with {} default ships", self.ships.len());
        self.ships.len()
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// All ships, ordered by id
    pub fn list(&self) -> impl Iterator<Item = &ShipConfig> {
        self.ships.values()
    }

    pub fn get(&self, id: &str) -> Option<&ShipConfig> {
        self.ships.get(id)
    }

    /// Insert or replace a ship after validating it
    pub fn save(&mut self, ship: ShipConfig) -> StoreResult<()> {
        if let Err(e) = ship.validate() {
            log::warn!("Rejected ship '{}': {e}", ship.id);
            return Err(e);
        }
        log::debug!("Saved ship '{}'", ship.id);
        self.ships.insert(ship.id.clone(), ship);
        Ok(())
    }

    /// Store a player-built ship under a freshly generated id
    pub fn create_custom(&mut self, ship: ShipConfig, now_millis: u64) -> StoreResult<String> {
        let mut id = self.ids.next_id(now_millis);
        // Records loaded from disk may already hold ids this generator hands out
        while self.ships.contains_key(&id) {
            id = self.ids.next_id(now_millis);
        }
        self.save(ShipConfig {
            id: id.clone(),
            is_custom: Some(true),
            ..ship
        })?;
        Ok(id)
    }

    pub fn delete(&mut self, id: &str) -> StoreResult<ShipConfig> {
        let ship = self
            .ships
            .remove(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        log::debug!("Deleted ship '{id}'");
        Ok(ship)
    }

    pub fn to_json(&self) -> StoreResult<String> {
        let file = HangarFile {
            ships: self.ships.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Parse a hangar, validating every record
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let file: HangarFile = serde_json::from_str(json)?;
        let mut store = Self::new();
        for ship in file.ships {
            store.save(ship)?;
        }
        Ok(store)
    }

    /// Load a hangar file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let store = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded {} ships from {}", store.len(), path.display());
        Ok(store)
    }

    /// Write the hangar, replacing the previous file only once the new one is complete
    pub fn persist(&self, path: &Path) -> StoreResult<()> {
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, self.to_json()?)?;
        fs::rename(&tmp, path)?;
        log::info!("Hangar saved ({} ships)", self.len());
        Ok(())
    }
}
