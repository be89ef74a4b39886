pub mod calendar;
pub mod climate;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::{Calendar, Season};
pub use climate::Climate;
pub use config::{CombatConfig, GameConfig};
pub use error::{ActionError, GameError};
