//! Game engine: turns, movement, combat, territory, construction and AI

pub mod ai;
pub mod combat;
pub mod command;
pub mod construction;
pub mod engine;
pub mod events;
pub mod movement;
pub mod season;
pub mod setup;
pub mod territory;

pub use combat::{strike_damage, CombatOutcome};
pub use command::{Command, CommandError, CommandOutcome, CommandSession};
pub use engine::Game;
pub use events::{GameEvent, TurnReport};
pub use movement::effective_move_for;
pub use setup::SetupReport;
