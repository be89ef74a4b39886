//! Movement: effective move, order queuing and order commit
//!
//! Orders are proposed during the turn and only applied when the turn is
//! committed. Reachability is plain Manhattan distance; there is no
//! pathfinding.

use crate::core::error::ActionError;
use crate::core::types::{CivId, TileCoord, UnitId};
use crate::game::engine::{rejected, Game};
use crate::game::events::GameEvent;

/// `floor(base_move * move_multiplier * trait_multiplier)`
pub fn effective_move_for(base_move: u32, move_multiplier: u32, trait_multiplier: f32) -> u32 {
    ((base_move * move_multiplier) as f32 * trait_multiplier).floor() as u32
}

impl Game {
    /// Per-turn movement allowance of a unit on its current tile
    pub fn effective_move(&self, unit: UnitId) -> Result<u32, ActionError> {
        let u = self.unit_checked(unit)?;
        let trait_multiplier = match (self.civs.get(u.civ.index()), self.grid.tile(u.position)) {
            (Some(civ), Some(tile)) => civ.capabilities.move_multiplier(tile.climate),
            _ => 1.0,
        };
        Ok(effective_move_for(u.base_move, self.config.move_multiplier, trait_multiplier))
    }

    /// Queue a move order for `unit`. Nothing moves until the turn ends.
    ///
    /// Rejected when the target is water, off the map or farther than the
    /// unit's effective move. A rejection leaves the unit untouched.
    pub fn move_selected_unit(&mut self, unit: UnitId, target: TileCoord) -> Result<(), ActionError> {
        let allowance = self.effective_move(unit)?;
        if self.grid.tile(target).is_none() {
            return rejected("Move order", ActionError::invalid_tile(target, "not a land tile"));
        }

        let distance = self.unit_checked(unit)?.position.manhattan(&target);
        if distance > allowance as usize {
            return rejected("Move order", ActionError::InvalidTarget { distance, allowance });
        }

        if let Some(u) = self.units.get_mut(&unit) {
            u.move_order = Some(target);
            tracing::debug!("{} ordered to {} (distance {})", unit, target, distance);
        }
        Ok(())
    }

    /// Land tiles the unit could be ordered to this turn
    pub fn move_range(&self, unit: UnitId) -> Result<Vec<TileCoord>, ActionError> {
        let allowance = self.effective_move(unit)? as usize;
        let origin = self.unit_checked(unit)?.position;

        let mut tiles = Vec::new();
        let y_end = (origin.y + allowance).min(self.grid.height().saturating_sub(1));
        let x_end = (origin.x + allowance).min(self.grid.width().saturating_sub(1));
        for y in origin.y.saturating_sub(allowance)..=y_end {
            for x in origin.x.saturating_sub(allowance)..=x_end {
                let c = TileCoord::new(x, y);
                if origin.manhattan(&c) <= allowance && self.grid.is_land(c) {
                    tiles.push(c);
                }
            }
        }
        Ok(tiles)
    }

    /// Commit every pending order of one civ, in roster order
    pub fn commit_move_orders(&mut self, civ: CivId) {
        let Some(roster) = self.civs.get(civ.index()).map(|c| c.units.clone()) else {
            return;
        };
        for id in roster {
            if self.units.get(&id).is_some_and(|u| u.move_order.is_some()) {
                self.commit_order(id);
            }
        }
    }

    /// Apply one unit's pending order.
    ///
    /// An enemy on the destination is fought first. If it survives, the
    /// attacker stays put with its order cleared and no move left this turn.
    /// Otherwise unowned tiles along the path are claimed and the unit
    /// relocates. Tiles owned by another civ keep their owner; capture only
    /// happens through `conquer_tile`.
    fn commit_order(&mut self, id: UnitId) {
        let Some((civ, origin, dest)) = self
            .units
            .get(&id)
            .and_then(|u| u.move_order.map(|dest| (u.civ, u.position, dest)))
        else {
            return;
        };

        let defender = self.grid.tile(dest).and_then(|tile| {
            tile.occupants
                .iter()
                .copied()
                .find(|other| self.units.get(other).is_some_and(|o| o.civ != civ))
        });

        if let Some(defender) = defender {
            match self.combat(id, defender) {
                Ok(outcome) if !outcome.defender_died() => {
                    if let Some(u) = self.units.get_mut(&id) {
                        u.move_order = None;
                        u.remaining_move = 0;
                    }
                    tracing::debug!("{} was repelled at {}", id, dest);
                    self.events.push(GameEvent::AttackRepelled { unit: id, at: dest });
                    return;
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!("Combat for {} failed: {}", id, err);
                    return;
                }
            }
        }

        // A unit ordered onto its own tile claims nothing
        let mut claimed = 0;
        if origin != dest {
            for step in origin.manhattan_path(&dest) {
                if matches!(self.grid.tile(step), Some(t) if t.owner.is_none()) {
                    self.set_owner(step, civ);
                    claimed += 1;
                }
            }
        }

        self.relocate_unit(id, dest);
        let cost = origin.manhattan(&dest) as u32;
        if let Some(u) = self.units.get_mut(&id) {
            u.spend_move(cost);
            u.move_order = None;
        }

        tracing::debug!("{} moved {} -> {}, claimed {} tiles", id, origin, dest, claimed);
        self.events.push(GameEvent::MoveCommitted {
            unit: id,
            from: origin,
            to: dest,
            claimed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civ::civilization::{CivCapabilities, Civilization};
    use crate::civ::manifest::CivFactory;
    use crate::core::climate::Climate;
    use crate::core::config::GameConfig;
    use crate::units::unit_type::{standard_registry, UnitType};
    use crate::world::grid::WorldGrid;
    use crate::world::ingest::ClimateMap;
    use std::collections::BTreeMap;

    const A: CivId = CivId(0);
    const B: CivId = CivId(1);

    fn plain(name: &str) -> Civilization {
        Civilization::new(name, name, CivCapabilities::default(), false, 1000)
    }

    fn game_with(grid: WorldGrid, first: Civilization) -> Game {
        let mut game = Game::new(grid, GameConfig::default().with_seed(9), standard_registry());
        game.register_civs(vec![first, plain("B")]);
        game
    }

    fn greenland() -> Civilization {
        CivFactory::builtin().unwrap().create("Greenland", BTreeMap::new(), true)
    }

    #[test]
    fn test_effective_move_plain_and_cavalry() {
        let mut game = game_with(WorldGrid::uniform(5, 5, Climate::Oceanic), plain("A"));
        let sword = game.spawn_unit(A, UnitType::Swordsman, TileCoord::new(0, 0)).unwrap();
        let horse = game.spawn_unit(A, UnitType::Cavalry, TileCoord::new(0, 0)).unwrap();
        assert_eq!(game.effective_move(sword), Ok(3));
        assert_eq!(game.effective_move(horse), Ok(6));
    }

    #[test]
    fn test_effective_move_cold_adapted() {
        let mut game = game_with(WorldGrid::uniform(5, 5, Climate::IceCap), greenland());
        let sword = game.spawn_unit(A, UnitType::Swordsman, TileCoord::new(0, 0)).unwrap();
        let horse = game.spawn_unit(A, UnitType::Cavalry, TileCoord::new(0, 0)).unwrap();
        // floor(3 * 1.25), floor(6 * 1.25)
        assert_eq!(game.effective_move(sword), Ok(3));
        assert_eq!(game.effective_move(horse), Ok(7));
    }

    #[test]
    fn test_effective_move_hot_penalty() {
        let mut game = game_with(WorldGrid::uniform(5, 5, Climate::HotDesert), greenland());
        let sword = game.spawn_unit(A, UnitType::Swordsman, TileCoord::new(0, 0)).unwrap();
        let horse = game.spawn_unit(A, UnitType::Cavalry, TileCoord::new(0, 0)).unwrap();
        assert_eq!(game.effective_move(sword), Ok(2));
        assert_eq!(game.effective_move(horse), Ok(4));

        // Other civs are unaffected by the same desert
        let other = game.spawn_unit(B, UnitType::Swordsman, TileCoord::new(1, 1)).unwrap();
        assert_eq!(game.effective_move(other), Ok(3));
    }

    #[test]
    fn test_order_out_of_reach_is_rejected() {
        let mut game = game_with(WorldGrid::uniform(10, 10, Climate::Oceanic), plain("A"));
        let sword = game.spawn_unit(A, UnitType::Swordsman, TileCoord::new(0, 0)).unwrap();

        let result = game.move_selected_unit(sword, TileCoord::new(2, 2));
        assert_eq!(result, Err(ActionError::InvalidTarget { distance: 4, allowance: 3 }));
        assert_eq!(game.unit(sword).unwrap().move_order, None);
        assert_eq!(game.unit(sword).unwrap().position, TileCoord::new(0, 0));
    }

    #[test]
    fn test_order_onto_water_is_rejected() {
        let mut land = vec![vec![true; 3]; 3];
        land[0][1] = false;
        let climate = vec![vec![Some(Climate::Oceanic); 3]; 3];
        let grid = WorldGrid::init_map(ClimateMap::from_rows(climate, land).unwrap());
        let mut game = game_with(grid, plain("A"));
        let sword = game.spawn_unit(A, UnitType::Swordsman, TileCoord::new(0, 0)).unwrap();

        let result = game.move_selected_unit(sword, TileCoord::new(1, 0));
        assert!(matches!(result, Err(ActionError::InvalidTile { .. })));
        assert!(game.move_selected_unit(sword, TileCoord::new(7, 0)).is_err());
    }

    #[test]
    fn test_reissued_order_overwrites() {
        let mut game = game_with(WorldGrid::uniform(10, 10, Climate::Oceanic), plain("A"));
        let sword = game.spawn_unit(A, UnitType::Swordsman, TileCoord::new(0, 0)).unwrap();
        game.move_selected_unit(sword, TileCoord::new(1, 0)).unwrap();
        game.move_selected_unit(sword, TileCoord::new(0, 2)).unwrap();
        assert_eq!(game.unit(sword).unwrap().move_order, Some(TileCoord::new(0, 2)));
    }

    #[test]
    fn test_commit_claims_path_and_relocates() {
        let mut game = game_with(WorldGrid::uniform(10, 10, Climate::Oceanic), plain("A"));
        let sword = game.spawn_unit(A, UnitType::Swordsman, TileCoord::new(2, 2)).unwrap();
        game.move_selected_unit(sword, TileCoord::new(4, 3)).unwrap();
        game.commit_move_orders(A);

        let u = game.unit(sword).unwrap();
        assert_eq!(u.position, TileCoord::new(4, 3));
        assert_eq!(u.move_order, None);
        assert_eq!(u.remaining_move, 0);
        for (x, y) in [(2, 2), (3, 2), (4, 2), (4, 3)] {
            assert_eq!(game.tile(x, y).unwrap().owner, Some(A), "({}, {})", x, y);
        }
        // Not on the x-then-y path
        assert_eq!(game.tile(2, 3).unwrap().owner, None);
        assert!(game.tile(2, 2).unwrap().occupants.is_empty());
        assert_eq!(game.tile(4, 3).unwrap().occupants, vec![sword]);
    }

    #[test]
    fn test_order_onto_own_tile_claims_nothing() {
        let mut game = game_with(WorldGrid::uniform(5, 5, Climate::Oceanic), plain("A"));
        let sword = game.spawn_unit(A, UnitType::Swordsman, TileCoord::new(2, 2)).unwrap();
        game.move_selected_unit(sword, TileCoord::new(2, 2)).unwrap();
        game.commit_move_orders(A);

        let u = game.unit(sword).unwrap();
        assert_eq!(u.position, TileCoord::new(2, 2));
        assert_eq!(u.move_order, None);
        assert_eq!(u.remaining_move, 3);
        assert_eq!(game.tile(2, 2).unwrap().owner, None);
        assert!(game.civ(A).unwrap().territory.is_empty());
    }

    #[test]
    fn test_path_does_not_steal_owned_tiles() {
        let mut game = game_with(WorldGrid::uniform(10, 10, Climate::Oceanic), plain("A"));
        game.claim_tile(B, TileCoord::new(1, 0)).unwrap();
        let sword = game.spawn_unit(A, UnitType::Swordsman, TileCoord::new(0, 0)).unwrap();
        game.move_selected_unit(sword, TileCoord::new(2, 0)).unwrap();
        game.commit_move_orders(A);

        assert_eq!(game.tile(1, 0).unwrap().owner, Some(B));
        assert_eq!(game.tile(2, 0).unwrap().owner, Some(A));
    }

    #[test]
    fn test_surviving_defender_repels_attacker() {
        let mut game = game_with(WorldGrid::uniform(10, 10, Climate::Oceanic), plain("A"));
        let archer = game.spawn_unit(A, UnitType::Archer, TileCoord::new(0, 0)).unwrap();
        let horse = game.spawn_unit(B, UnitType::Cavalry, TileCoord::new(1, 0)).unwrap();
        game.move_selected_unit(archer, TileCoord::new(1, 0)).unwrap();
        game.commit_move_orders(A);

        let a = game.unit(archer).unwrap();
        assert_eq!(a.position, TileCoord::new(0, 0));
        assert_eq!(a.move_order, None);
        assert_eq!(a.remaining_move, 0);
        assert_eq!(a.hp, 80.0 - 18.0);
        assert_eq!(game.unit(horse).unwrap().hp, 110.0 - 25.0);
        assert_eq!(game.tile(1, 0).unwrap().owner, None);
        assert_eq!(game.tile(0, 0).unwrap().occupants, vec![archer]);
    }

    #[test]
    fn test_victory_moves_in_but_leaves_enemy_tile() {
        let mut game = game_with(WorldGrid::uniform(10, 10, Climate::Oceanic), plain("A"));
        let mage = game.spawn_unit(A, UnitType::Mage, TileCoord::new(0, 0)).unwrap();
        let spear = game.spawn_unit(B, UnitType::Spearman, TileCoord::new(1, 0)).unwrap();
        game.claim_tile(B, TileCoord::new(1, 0)).unwrap();
        // Weaken the defender so one strike kills it
        game.combat(mage, spear).unwrap();

        game.move_selected_unit(mage, TileCoord::new(1, 0)).unwrap();
        game.commit_move_orders(A);

        assert!(game.unit(spear).unwrap().hp <= 0.0);
        assert_eq!(game.unit(mage).unwrap().position, TileCoord::new(1, 0));
        assert_eq!(game.tile(1, 0).unwrap().owner, Some(B));
        assert!(game.civ(B).unwrap().owns(TileCoord::new(1, 0)));
        assert!(!game.civ(A).unwrap().owns(TileCoord::new(1, 0)));
        // The origin was unowned and lies on the path
        assert_eq!(game.tile(0, 0).unwrap().owner, Some(A));
        // The dead defender is still listed on the tile
        assert!(game.tile(1, 0).unwrap().occupants.contains(&spear));
    }

    #[test]
    fn test_move_range_respects_water_and_bounds() {
        let mut land = vec![vec![true; 5]; 5];
        land[0][1] = false;
        let climate = vec![vec![Some(Climate::Oceanic); 5]; 5];
        let grid = WorldGrid::init_map(ClimateMap::from_rows(climate, land).unwrap());
        let mut game = game_with(grid, plain("A"));
        let sword = game.spawn_unit(A, UnitType::Swordsman, TileCoord::new(0, 0)).unwrap();

        let range = game.move_range(sword).unwrap();
        assert!(range.contains(&TileCoord::new(0, 0)));
        assert!(range.contains(&TileCoord::new(3, 0)));
        assert!(range.contains(&TileCoord::new(1, 2)));
        assert!(!range.contains(&TileCoord::new(1, 0)));
        assert!(!range.contains(&TileCoord::new(2, 2)));
        // Diamond of radius 3 clipped to the corner, minus one water cell
        assert_eq!(range.len(), 9);
    }
}
