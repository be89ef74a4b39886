//! Season tracking for the human player's capital

use crate::core::calendar::Season;
use crate::core::climate::Climate;
use crate::game::engine::Game;
use crate::game::events::GameEvent;

impl Game {
    /// Latitude and climate of the human capital, if there is one
    pub(crate) fn capital_context(&self) -> Option<(f64, Climate)> {
        let human = self.civ(self.human_civ()?)?;
        let capital = human.capital?;
        let tile = self.grid.tile(capital)?;
        Some((self.grid.latitude(capital.y), tile.climate))
    }

    /// Recompute the cached season, recording a change if there was one
    pub(crate) fn refresh_season(&mut self) -> Season {
        let capital = self.capital_context();
        let previous = self.calendar.update_season(capital);
        let current = self.calendar.season();
        if previous != current {
            tracing::info!("Season changed: {} -> {}", previous, current);
            self.events.push(GameEvent::SeasonChanged {
                from: previous,
                to: current,
            });
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use crate::civ::civilization::{CivCapabilities, Civilization};
    use crate::core::calendar::Season;
    use crate::core::climate::Climate;
    use crate::core::config::GameConfig;
    use crate::core::types::{CivId, TileCoord};
    use crate::game::engine::Game;
    use crate::units::unit_type::standard_registry;
    use crate::world::grid::WorldGrid;

    fn game(climate: Climate) -> Game {
        let mut game = Game::new(
            WorldGrid::uniform(10, 10, climate),
            GameConfig::default().with_seed(2),
            standard_registry(),
        );
        game.register_civs(vec![Civilization::new("P", "P", CivCapabilities::default(), true, 1000)]);
        game
    }

    #[test]
    fn test_no_capital_means_unknown_season() {
        let mut game = game(Climate::Oceanic);
        assert_eq!(game.refresh_season(), Season::Unknown);
        assert_eq!(game.season_label(), "Unknown");
    }

    #[test]
    fn test_northern_capital_starts_in_winter() {
        let mut game = game(Climate::Oceanic);
        game.place_capital(CivId(0), TileCoord::new(3, 2)).unwrap();
        assert_eq!(game.refresh_season(), Season::Winter);
    }

    #[test]
    fn test_southern_tropical_capital() {
        let mut game = game(Climate::TropicalMonsoon);
        // Row 8 of 10 is latitude -54
        game.place_capital(CivId(0), TileCoord::new(3, 8)).unwrap();
        assert_eq!(game.refresh_season(), Season::WetSeason);
    }
}
