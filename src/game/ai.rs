//! Turn progression and AI behaviour
//!
//! AI civilizations wander: each unit with move left takes one random
//! cardinal step, and one random owned tile without a building gets a
//! flavour Capital marker.

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::core::types::{CivId, Direction};
use crate::game::engine::Game;
use crate::game::events::{GameEvent, TurnReport};
use crate::world::tile::Building;

impl Game {
    /// End the human turn: commit the player's orders, then run the AI turn
    pub fn end_turn(&mut self) -> TurnReport {
        if let Some(human) = self.human_civ() {
            self.commit_move_orders(human);
        }
        self.ai_turn()
    }

    /// Run the AI turn and advance the calendar.
    ///
    /// Order: AI moves and flavour building, any remaining orders, human
    /// enclosure annexation, turn counter, human move refresh, season.
    pub fn ai_turn(&mut self) -> TurnReport {
        let ai_civs: Vec<CivId> = self
            .civ_ids()
            .filter(|id| self.civs[id.index()].alive && !self.civs[id.index()].is_human)
            .collect();
        for civ in ai_civs {
            self.ai_wander(civ);
            self.ai_flavor_building(civ);
        }

        let living: Vec<CivId> = self.civ_ids().filter(|id| self.civs[id.index()].alive).collect();
        for civ in &living {
            if self.civs[civ.index()].alive {
                self.commit_move_orders(*civ);
            }
        }

        let humans: Vec<CivId> = self
            .civ_ids()
            .filter(|id| self.civs[id.index()].alive && self.civs[id.index()].is_human)
            .collect();
        for civ in humans {
            self.update_surrounded_territory_group(civ);
        }

        self.calendar.advance();
        self.refresh_moves();
        let season = self.refresh_season();

        let turn = self.calendar.current_turn();
        tracing::info!("Turn {} begins ({})", turn, season);
        TurnReport {
            turn,
            season,
            events: self.take_events(),
        }
    }

    fn ai_wander(&mut self, civ: CivId) {
        let roster = self.civs[civ.index()].units.clone();
        for id in roster {
            let Some((from, remaining)) = self.units.get(&id).map(|u| (u.position, u.remaining_move)) else {
                continue;
            };
            if remaining == 0 {
                continue;
            }
            let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
            let Some(to) = from.step(direction).filter(|c| self.grid.is_land(*c)) else {
                continue;
            };

            self.relocate_unit(id, to);
            if let Some(u) = self.units.get_mut(&id) {
                u.spend_move(1);
            }
            tracing::debug!("AI {} stepped {} -> {}", id, from, to);
            self.events.push(GameEvent::AiStep { unit: id, from, to });
        }
    }

    /// Mark a random owned tile as a Capital. The civ's real capital stays
    /// where it is.
    fn ai_flavor_building(&mut self, civ: CivId) {
        let Some(pick) = self.civs[civ.index()]
            .territory
            .iter()
            .copied()
            .filter(|c| self.grid.tile(*c).is_some_and(|t| t.building.is_none()))
            .choose(&mut self.rng)
        else {
            return;
        };
        if let Some(tile) = self.grid.tile_mut(pick) {
            tile.building = Some(Building::Capital);
            tracing::debug!("{} raised a flavour capital at {}", self.civs[civ.index()].name, pick);
            self.events.push(GameEvent::FlavorCapital { civ, at: pick });
        }
    }

    /// Refill the human civ's move budgets. AI units keep whatever budget
    /// they have left, so they stop wandering once it is spent.
    fn refresh_moves(&mut self) {
        let multiplier = self.config.move_multiplier;
        for civ in self.civs.iter().filter(|c| c.alive && c.is_human) {
            for id in &civ.units {
                if let Some(u) = self.units.get_mut(id) {
                    u.refresh_move(multiplier);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::civ::civilization::{CivCapabilities, Civilization};
    use crate::core::climate::Climate;
    use crate::core::config::GameConfig;
    use crate::core::types::{CivId, TileCoord};
    use crate::game::engine::Game;
    use crate::game::events::GameEvent;
    use crate::units::unit_type::{standard_registry, UnitType};
    use crate::world::grid::WorldGrid;
    use crate::world::tile::Building;

    const P: CivId = CivId(0);
    const AI: CivId = CivId(1);

    fn game() -> Game {
        let mut game = Game::new(
            WorldGrid::uniform(10, 10, Climate::Oceanic),
            GameConfig::default().with_seed(17),
            standard_registry(),
        );
        game.register_civs(vec![
            Civilization::new("P", "P", CivCapabilities::default(), false, 1000),
            Civilization::new("Base_Civ 1", "Base_Civ 1", CivCapabilities::default(), false, 1000),
        ]);
        game
    }

    #[test]
    fn test_turn_advances_and_refreshes_moves() {
        let mut game = game();
        let sword = game.spawn_unit(P, UnitType::Swordsman, TileCoord::new(0, 0)).unwrap();
        game.move_selected_unit(sword, TileCoord::new(2, 0)).unwrap();

        let report = game.end_turn();
        assert_eq!(report.turn, 1);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.unit(sword).unwrap().position, TileCoord::new(2, 0));
        assert_eq!(game.unit(sword).unwrap().remaining_move, 3);
    }

    #[test]
    fn test_ai_unit_steps_once_per_turn() {
        let mut game = game();
        let u = game.spawn_unit(AI, UnitType::Archer, TileCoord::new(5, 5)).unwrap();

        let report = game.end_turn();
        let pos = game.unit(u).unwrap().position;
        assert_eq!(TileCoord::new(5, 5).manhattan(&pos), 1);
        assert!(report.events.iter().any(|e| matches!(e, GameEvent::AiStep { unit, .. } if *unit == u)));
        assert_eq!(game.tile(pos.x, pos.y).unwrap().occupants, vec![u]);
        assert!(game.tile(5, 5).unwrap().occupants.is_empty());
    }

    #[test]
    fn test_ai_budget_is_not_refilled() {
        let mut game = Game::new(
            WorldGrid::uniform(20, 20, Climate::Oceanic),
            GameConfig::default().with_seed(23),
            standard_registry(),
        );
        game.register_civs(vec![
            Civilization::new("P", "P", CivCapabilities::default(), false, 1000),
            Civilization::new("AI", "AI", CivCapabilities::default(), false, 1000),
        ]);
        let sword = game.spawn_unit(AI, UnitType::Swordsman, TileCoord::new(10, 10)).unwrap();

        let mut steps = 0;
        for _ in 0..10 {
            let report = game.end_turn();
            steps += report
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::AiStep { unit, .. } if *unit == sword))
                .count();
        }
        assert_eq!(steps, 3);
        assert_eq!(game.unit(sword).unwrap().remaining_move, 0);
        assert_eq!(TileCoord::new(10, 10).manhattan(&game.unit(sword).unwrap().position) % 2, 1);
    }

    #[test]
    fn test_ai_step_into_edge_is_skipped() {
        let mut game = Game::new(
            WorldGrid::uniform(1, 1, Climate::Oceanic),
            GameConfig::default().with_seed(1),
            standard_registry(),
        );
        game.register_civs(vec![
            Civilization::new("P", "P", CivCapabilities::default(), false, 1000),
            Civilization::new("AI", "AI", CivCapabilities::default(), false, 1000),
        ]);
        let u = game.spawn_unit(AI, UnitType::Mage, TileCoord::new(0, 0)).unwrap();
        game.end_turn();
        assert_eq!(game.unit(u).unwrap().position, TileCoord::new(0, 0));
    }

    #[test]
    fn test_flavor_capital_leaves_real_capital() {
        let mut game = game();
        game.place_capital(AI, TileCoord::new(5, 5)).unwrap();
        game.end_turn();

        let ai = game.civ(AI).unwrap();
        assert_eq!(ai.capital, Some(TileCoord::new(5, 5)));
        let capitals = ai
            .territory
            .iter()
            .filter(|c| game.tile(c.x, c.y).unwrap().building == Some(Building::Capital))
            .count();
        assert!(capitals >= 1);
    }

    #[test]
    fn test_human_encirclement_is_annexed_at_turn_end() {
        let mut game = game();
        for c in WorldGrid::uniform(10, 10, Climate::Oceanic).block3x3(TileCoord::new(4, 4)) {
            if c != TileCoord::new(4, 4) {
                game.claim_tile(P, c).unwrap();
            }
        }
        let report = game.end_turn();
        assert_eq!(game.tile(4, 4).unwrap().owner, Some(P));
        assert!(report.events.iter().any(|e| matches!(e, GameEvent::Annexed { .. })));
    }

    #[test]
    fn test_dead_civ_does_not_act() {
        let mut game = game();
        let u = game.spawn_unit(AI, UnitType::Cavalry, TileCoord::new(5, 5)).unwrap();
        game.place_capital(AI, TileCoord::new(8, 8)).unwrap();
        game.eliminate_civ(AI, P).unwrap();
        assert!(game.unit(u).is_none());

        let report = game.end_turn();
        assert!(!report.events.iter().any(|e| matches!(e, GameEvent::AiStep { .. })));
    }
}
