//! Land tiles and the buildings that can stand on them

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::climate::Climate;
use crate::core::types::{CivId, TileCoord, UnitId};

/// Structure occupying a tile (at most one per tile)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Building {
    /// Placed at game start only
    Capital,
    /// Raises the owner's population
    Residence,
    /// Allows training units on this tile
    Barracks,
    /// Cold-climate dwelling; tundra or ice cap only
    Igluvijaq,
}

impl Building {
    pub const ALL: [Building; 4] = [
        Building::Capital,
        Building::Residence,
        Building::Barracks,
        Building::Igluvijaq,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Building::Capital => "Capital",
            Building::Residence => "Residence",
            Building::Barracks => "Barracks",
            Building::Igluvijaq => "Igluvijaq",
        }
    }

    /// Climates the building may be placed on. Empty means any.
    pub fn required_climates(&self) -> &'static [Climate] {
        match self {
            Building::Igluvijaq => &[Climate::Tundra, Climate::IceCap],
            _ => &[],
        }
    }

    pub fn allowed_on(&self, climate: Climate) -> bool {
        let required = self.required_climates();
        required.is_empty() || required.contains(&climate)
    }
}

impl std::fmt::Display for Building {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Building {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid building type: {}", s))
    }
}

/// A single land cell. Water cells have no `Tile` at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub coord: TileCoord,
    pub climate: Climate,
    pub owner: Option<CivId>,
    pub building: Option<Building>,
    /// Units standing here; several civs may share a tile between commits
    pub occupants: Vec<UnitId>,
}

impl Tile {
    pub fn new(coord: TileCoord, climate: Climate) -> Self {
        Self {
            coord,
            climate,
            owner: None,
            building: None,
            occupants: Vec::new(),
        }
    }

    pub fn is_owned_by(&self, civ: CivId) -> bool {
        self.owner == Some(civ)
    }

    pub fn add_occupant(&mut self, unit: UnitId) {
        if !self.occupants.contains(&unit) {
            self.occupants.push(unit);
        }
    }

    /// Returns true if the unit was present
    pub fn remove_occupant(&mut self, unit: UnitId) -> bool {
        let before = self.occupants.len();
        self.occupants.retain(|u| *u != unit);
        self.occupants.len() != before
    }
}
