//! Civilizations and the manifest they are built from

pub mod civilization;
pub mod manifest;

pub use civilization::{CivCapabilities, Civilization};
pub use manifest::{CivDefinition, CivFactory, UniqueBuilding, UniqueUnit};
