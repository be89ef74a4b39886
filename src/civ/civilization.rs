//! Civilization - a faction's identity, resources, territory and roster

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::civ::manifest::UniqueUnit;
use crate::core::climate::Climate;
use crate::core::types::{TileCoord, UnitId};
use crate::world::tile::Building;

/// Data-driven abilities attached at construction.
///
/// Movement and combat consult these instead of the civilization's name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CivCapabilities {
    /// Fights harder from tundra and ice cap
    pub cold_adapted: bool,
    /// Climate → movement multiplier; absent climates move at 1.0
    pub traits: BTreeMap<Climate, f32>,
    pub unique_unit: Option<UniqueUnit>,
    pub unique_building: Option<Building>,
}

impl CivCapabilities {
    pub fn with_traits(traits: BTreeMap<Climate, f32>) -> Self {
        Self {
            traits,
            ..Self::default()
        }
    }

    pub fn move_multiplier(&self, climate: Climate) -> f32 {
        self.traits.get(&climate).copied().unwrap_or(1.0)
    }
}

/// A civilization taking part in the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Civilization {
    pub name: String,
    /// Short internal code ("GRL"); generic civs reuse their name
    pub code: String,
    pub is_human: bool,
    pub capabilities: CivCapabilities,

    // Resources
    pub population: u32,
    pub residences: u32,
    pub barracks: u32,

    /// Owned tiles. Mirrors every tile whose owner is this civ.
    pub territory: BTreeSet<TileCoord>,
    pub capital: Option<TileCoord>,
    pub units: Vec<UnitId>,

    pub alive: bool,
}

impl Civilization {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        capabilities: CivCapabilities,
        is_human: bool,
        population: u32,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            is_human,
            capabilities,
            population,
            residences: 0,
            barracks: 0,
            territory: BTreeSet::new(),
            capital: None,
            units: Vec::new(),
            alive: true,
        }
    }

    pub fn owns(&self, coord: TileCoord) -> bool {
        self.territory.contains(&coord)
    }

    /// Population in thousands, as shown in the info panel
    pub fn population_thousands(&self) -> u32 {
        self.population / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_trait_is_neutral() {
        let mut traits = BTreeMap::new();
        traits.insert(Climate::Tundra, 1.25);
        let caps = CivCapabilities::with_traits(traits);
        assert_eq!(caps.move_multiplier(Climate::Tundra), 1.25);
        assert_eq!(caps.move_multiplier(Climate::Oceanic), 1.0);
        assert!(!caps.cold_adapted);
    }

    #[test]
    fn test_new_civ_starts_alive_and_empty() {
        let civ = Civilization::new("Base_Civ 1", "Base_Civ 1", CivCapabilities::default(), false, 1000);
        assert!(civ.alive);
        assert!(civ.territory.is_empty());
        assert!(civ.capital.is_none());
        assert_eq!(civ.population_thousands(), 1);
    }
}
