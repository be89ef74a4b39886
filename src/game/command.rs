//! Text command layer
//!
//! Translates player input into engine calls. These are the only mutation
//! entry points a front end needs:
//!
//! ```text
//! select <unit id>
//! move <x> <y>
//! build <building>
//! train <x> <y>
//! end
//! status
//! ```

use std::str::FromStr;
use thiserror::Error;

use crate::core::error::ActionError;
use crate::core::types::{TileCoord, UnitId};
use crate::game::engine::Game;
use crate::game::events::TurnReport;
use crate::world::tile::Building;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(UnitId),
    Move(TileCoord),
    Build(Building),
    Train(TileCoord),
    EndTurn,
    Status,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Cannot parse command: {0}")]
    Parse(String),

    #[error(transparent)]
    Action(#[from] ActionError),
}

fn parse_coord(args: &[&str]) -> Result<TileCoord, CommandError> {
    match args {
        [x, y] => {
            let x = x.parse().map_err(|_| CommandError::Parse(format!("bad x '{}'", x)))?;
            let y = y.parse().map_err(|_| CommandError::Parse(format!("bad y '{}'", y)))?;
            Ok(TileCoord::new(x, y))
        }
        _ => Err(CommandError::Parse("expected <x> <y>".into())),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let Some((verb, args)) = words.split_first() else {
            return Err(CommandError::Parse("empty command".into()));
        };

        match verb.to_ascii_lowercase().as_str() {
            "select" => match args {
                [id] => id
                    .trim_start_matches('#')
                    .parse()
                    .map(|n| Command::Select(UnitId(n)))
                    .map_err(|_| CommandError::Parse(format!("bad unit id '{}'", id))),
                _ => Err(CommandError::Parse("expected select <unit id>".into())),
            },
            "move" => parse_coord(args).map(Command::Move),
            "train" => parse_coord(args).map(Command::Train),
            "build" => {
                let name = args.join(" ");
                name.parse().map(Command::Build).map_err(CommandError::Parse)
            }
            "end" => Ok(Command::EndTurn),
            "status" => Ok(Command::Status),
            other => Err(CommandError::Parse(format!("unknown command '{}'", other))),
        }
    }
}

/// Result of a successfully applied command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Selected(UnitId),
    OrderQueued { unit: UnitId, target: TileCoord },
    Built { building: Building, at: TileCoord },
    Trained(UnitId),
    TurnEnded(TurnReport),
    Status(String),
}

/// Input state of the human player: which unit is selected
#[derive(Debug, Default)]
pub struct CommandSession {
    selected: Option<UnitId>,
}

impl CommandSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    /// Parse and apply one line of input
    pub fn run_line(&mut self, game: &mut Game, line: &str) -> Result<CommandOutcome, CommandError> {
        let command: Command = line.parse()?;
        self.execute(game, command)
    }

    pub fn execute(&mut self, game: &mut Game, command: Command) -> Result<CommandOutcome, CommandError> {
        let human = game.human_civ().ok_or(ActionError::NoSelection)?;

        match command {
            Command::Select(id) => {
                let owned = game.unit(id).is_some_and(|u| u.civ == human);
                if !owned {
                    return Err(ActionError::UnknownUnit(id).into());
                }
                self.selected = Some(id);
                Ok(CommandOutcome::Selected(id))
            }
            Command::Move(target) => {
                let unit = self.selected.ok_or(ActionError::NoSelection)?;
                game.move_selected_unit(unit, target)?;
                Ok(CommandOutcome::OrderQueued { unit, target })
            }
            Command::Build(building) => {
                // Builds happen where the selected unit stands
                let unit = self.selected.ok_or(ActionError::NoSelection)?;
                let at = game.unit(unit).ok_or(ActionError::UnknownUnit(unit))?.position;
                game.build_building(building, at, human)?;
                Ok(CommandOutcome::Built { building, at })
            }
            Command::Train(at) => {
                let unit = game.train_unit_from_barracks(at, human)?;
                Ok(CommandOutcome::Trained(unit))
            }
            Command::EndTurn => {
                let report = game.end_turn();
                if self.selected.is_some_and(|id| game.unit(id).is_none()) {
                    self.selected = None;
                }
                Ok(CommandOutcome::TurnEnded(report))
            }
            Command::Status => Ok(CommandOutcome::Status(status_line(game))),
        }
    }
}

/// One-line summary of the human civ, as shown in the info panel
pub fn status_line(game: &Game) -> String {
    let Some(civ) = game.human_civ().and_then(|id| game.civ(id)) else {
        return format!("Turn {} | {}", game.turn(), game.season_label());
    };
    format!(
        "Turn {} | {} | {} ({}) | Pop {}k | Tiles {} | Units {} | Residences {} | Barracks {}",
        game.turn(),
        game.season_label(),
        civ.name,
        civ.code,
        civ.population_thousands(),
        civ.territory.len(),
        civ.units.len(),
        civ.residences,
        civ.barracks
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civ::civilization::{CivCapabilities, Civilization};
    use crate::core::climate::Climate;
    use crate::core::config::GameConfig;
    use crate::core::types::CivId;
    use crate::units::unit_type::{standard_registry, UnitType};
    use crate::world::grid::WorldGrid;

    fn game() -> Game {
        let mut game = Game::new(
            WorldGrid::uniform(8, 8, Climate::Oceanic),
            GameConfig::default().with_seed(4),
            standard_registry(),
        );
        game.register_civs(vec![
            Civilization::new("P", "P", CivCapabilities::default(), true, 1000),
            Civilization::new("Base_Civ 1", "Base_Civ 1", CivCapabilities::default(), false, 1000),
        ]);
        game
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("select 3".parse::<Command>(), Ok(Command::Select(UnitId(3))));
        assert_eq!("select #3".parse::<Command>(), Ok(Command::Select(UnitId(3))));
        assert_eq!("MOVE 1 2".parse::<Command>(), Ok(Command::Move(TileCoord::new(1, 2))));
        assert_eq!("train 0 4".parse::<Command>(), Ok(Command::Train(TileCoord::new(0, 4))));
        assert_eq!("build barracks".parse::<Command>(), Ok(Command::Build(Building::Barracks)));
        assert_eq!("end".parse::<Command>(), Ok(Command::EndTurn));
        assert_eq!("status".parse::<Command>(), Ok(Command::Status));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<Command>(), Err(CommandError::Parse(_))));
        assert!(matches!("move 1".parse::<Command>(), Err(CommandError::Parse(_))));
        assert!(matches!("move a b".parse::<Command>(), Err(CommandError::Parse(_))));
        assert!(matches!("build castle".parse::<Command>(), Err(CommandError::Parse(_))));
        assert!(matches!("dance".parse::<Command>(), Err(CommandError::Parse(_))));
    }

    #[test]
    fn test_select_move_end() {
        let mut game = game();
        let unit = game.place_capital(CivId(0), TileCoord::new(2, 2)).unwrap();
        let mut session = CommandSession::new();

        session.run_line(&mut game, &format!("select {}", unit.0)).unwrap();
        assert_eq!(session.selected(), Some(unit));

        let queued = session.run_line(&mut game, "move 2 3").unwrap();
        assert_eq!(queued, CommandOutcome::OrderQueued { unit, target: TileCoord::new(2, 3) });

        let ended = session.run_line(&mut game, "end").unwrap();
        assert!(matches!(ended, CommandOutcome::TurnEnded(ref r) if r.turn == 1));
        assert_eq!(game.unit(unit).unwrap().position, TileCoord::new(2, 3));
    }

    #[test]
    fn test_move_without_selection() {
        let mut game = game();
        let mut session = CommandSession::new();
        assert_eq!(
            session.run_line(&mut game, "move 1 1"),
            Err(CommandError::Action(ActionError::NoSelection))
        );
    }

    #[test]
    fn test_cannot_select_enemy_unit() {
        let mut game = game();
        let enemy = game.spawn_unit(CivId(1), UnitType::Mage, TileCoord::new(5, 5)).unwrap();
        let mut session = CommandSession::new();
        let result = session.execute(&mut game, Command::Select(enemy));
        assert_eq!(result, Err(CommandError::Action(ActionError::UnknownUnit(enemy))));
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_build_at_selected_unit_then_train() {
        let mut game = game();
        let unit = game.place_capital(CivId(0), TileCoord::new(2, 2)).unwrap();
        let mut session = CommandSession::new();
        session.execute(&mut game, Command::Select(unit)).unwrap();

        // The capital tile already has a building
        assert!(session.run_line(&mut game, "build residence").is_err());

        session.run_line(&mut game, "move 3 2").unwrap();
        session.run_line(&mut game, "end").unwrap();
        let built = session.run_line(&mut game, "build barracks").unwrap();
        assert_eq!(built, CommandOutcome::Built { building: Building::Barracks, at: TileCoord::new(3, 2) });

        let trained = session.run_line(&mut game, "train 3 2").unwrap();
        assert!(matches!(trained, CommandOutcome::Trained(_)));
        assert_eq!(game.civ(CivId(0)).unwrap().population, 500);
    }

    #[test]
    fn test_status_line_mentions_turn_and_population() {
        let mut game = game();
        game.place_capital(CivId(0), TileCoord::new(2, 2)).unwrap();
        let mut session = CommandSession::new();
        let CommandOutcome::Status(line) = session.run_line(&mut game, "status").unwrap() else {
            panic!("expected status");
        };
        assert!(line.starts_with("Turn 0"));
        assert!(line.contains("Pop 1k"));
        assert!(line.contains("Tiles 9"));
    }
}
