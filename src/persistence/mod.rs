//! Hangar persistence
//!
//! Features:
//! - Ship configurations keyed by unique id
//! - Built-in catalog seeded on first use
//! - Validation at the boundary, before anything is stored
//! - JSON file storage with atomic replace (tmp → hangar)

pub mod ship_store;

pub use ship_store::ShipStore;
