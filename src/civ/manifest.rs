//! Civilization manifest and factory
//!
//! Special civilizations are described in a TOML manifest rather than
//! discovered at runtime. The built-in manifest is compiled into the binary;
//! a replacement can be loaded from disk.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::civ::civilization::{CivCapabilities, Civilization};
use crate::core::climate::Climate;
use crate::core::error::{GameError, Result};
use crate::units::unit_type::UnitStats;
use crate::world::tile::Building;

const BUILTIN_MANIFEST: &str = include_str!("../../data/civilizations.toml");

/// Signature unit of a civilization. Exposed as stat data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueUnit {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub hp: f32,
    pub attack: f32,
    #[serde(rename = "move")]
    pub base_move: u32,
}

impl UniqueUnit {
    pub fn stats(&self) -> UnitStats {
        UnitStats::new(self.hp, self.attack, self.base_move)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueBuilding {
    pub building: Building,
    #[serde(default)]
    pub description: String,
}

/// One `[[civilization]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CivDefinition {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub passive_name: String,
    #[serde(default)]
    pub passive_description: String,
    #[serde(default)]
    pub cold_adapted: bool,
    #[serde(default)]
    pub traits: BTreeMap<Climate, f32>,
    pub unique_unit: Option<UniqueUnit>,
    pub unique_building: Option<UniqueBuilding>,
}

impl CivDefinition {
    fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.name.eq_ignore_ascii_case(name) || self.code.eq_ignore_ascii_case(name)
    }

    pub fn capabilities(&self) -> CivCapabilities {
        CivCapabilities {
            cold_adapted: self.cold_adapted,
            traits: self.traits.clone(),
            unique_unit: self.unique_unit.clone(),
            unique_building: self.unique_building.as_ref().map(|b| b.building),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    civilization: Vec<CivDefinition>,
}

/// Builds civilizations, applying manifest definitions by name
#[derive(Debug, Clone)]
pub struct CivFactory {
    definitions: Vec<CivDefinition>,
    initial_population: u32,
}

impl CivFactory {
    /// Factory over the manifest compiled into the crate
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_MANIFEST)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        for def in &manifest.civilization {
            if def.traits.values().any(|m| *m <= 0.0) {
                return Err(GameError::Config(format!(
                    "{} has a non-positive movement trait",
                    def.code
                )));
            }
        }
        tracing::debug!("Loaded {} civilization definitions", manifest.civilization.len());
        Ok(Self {
            definitions: manifest.civilization,
            initial_population: 1000,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn with_initial_population(mut self, population: u32) -> Self {
        self.initial_population = population;
        self
    }

    pub fn definitions(&self) -> &[CivDefinition] {
        &self.definitions
    }

    /// Definition whose name or code matches, case-insensitively
    pub fn definition(&self, name: &str) -> Option<&CivDefinition> {
        self.definitions.iter().find(|d| d.matches(name))
    }

    /// Create a civilization.
    ///
    /// A name found in the manifest takes its code and traits from the
    /// definition and `traits` is ignored. Any other name yields a generic
    /// civilization whose code is the name itself.
    pub fn create(&self, name: &str, traits: BTreeMap<Climate, f32>, is_human: bool) -> Civilization {
        match self.definition(name) {
            Some(def) => Civilization::new(
                def.name.clone(),
                def.code.clone(),
                def.capabilities(),
                is_human,
                self.initial_population,
            ),
            None => Civilization::new(
                name,
                name,
                CivCapabilities::with_traits(traits),
                is_human,
                self.initial_population,
            ),
        }
    }
}
