//! Turn event log

use serde::{Deserialize, Serialize};

use crate::core::calendar::Season;
use crate::core::types::{CivId, TileCoord, Turn, UnitId};
use crate::units::unit_type::UnitType;
use crate::world::tile::Building;

/// Something that happened while the engine was mutating state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // Setup
    CapitalPlaced { civ: CivId, at: TileCoord, unit: UnitId },
    PlacementExhausted { civ: CivId, attempts: u32 },

    // Movement
    MoveCommitted { unit: UnitId, from: TileCoord, to: TileCoord, claimed: usize },
    AttackRepelled { unit: UnitId, at: TileCoord },
    AiStep { unit: UnitId, from: TileCoord, to: TileCoord },

    // Combat
    Combat {
        attacker: UnitId,
        defender: UnitId,
        damage_dealt: f32,
        damage_taken: f32,
        defender_hp: f32,
    },

    // Territory
    TileConquered { civ: CivId, previous: Option<CivId>, at: TileCoord },
    Annexed { civ: CivId, tiles: Vec<TileCoord> },
    CivEliminated { civ: CivId, conqueror: CivId, tiles: usize },

    // Construction
    BuildingConstructed { civ: CivId, building: Building, at: TileCoord },
    FlavorCapital { civ: CivId, at: TileCoord },
    UnitTrained { civ: CivId, unit: UnitId, unit_type: UnitType, at: TileCoord },

    SeasonChanged { from: Season, to: Season },
}

/// Everything that happened between two `end_turn` calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Turn number after the advance
    pub turn: Turn,
    pub season: Season,
    pub events: Vec<GameEvent>,
}

impl TurnReport {
    pub fn combats(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::Combat { .. }))
            .count()
    }

    pub fn eliminations(&self) -> impl Iterator<Item = CivId> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::CivEliminated { civ, .. } => Some(*civ),
            _ => None,
        })
    }
}
