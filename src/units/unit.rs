//! A single unit on the map

use serde::{Deserialize, Serialize};

use crate::core::types::{CivId, TileCoord, UnitId};
use crate::units::unit_type::{UnitStats, UnitType};

/// A unit owned by a civilization.
///
/// `hp` may go to zero or below; combat never removes a unit on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub civ: CivId,
    pub unit_type: UnitType,
    pub position: TileCoord,
    pub hp: f32,
    pub attack: f32,
    pub base_move: u32,
    /// Budget left this turn, reset at turn end
    pub remaining_move: u32,
    /// Destination queued for the next turn commit
    pub move_order: Option<TileCoord>,
}

impl Unit {
    pub fn new(
        id: UnitId,
        civ: CivId,
        unit_type: UnitType,
        position: TileCoord,
        stats: UnitStats,
        move_multiplier: u32,
    ) -> Self {
        Self {
            id,
            civ,
            unit_type,
            position,
            hp: stats.hp,
            attack: stats.attack,
            base_move: stats.base_move,
            remaining_move: stats.base_move * move_multiplier,
            move_order: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Refill the per-turn move budget
    pub fn refresh_move(&mut self, move_multiplier: u32) {
        self.remaining_move = self.base_move * move_multiplier;
    }

    pub fn spend_move(&mut self, cost: u32) {
        self.remaining_move = self.remaining_move.saturating_sub(cost);
    }
}
