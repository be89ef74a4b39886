//! Unit archetypes, stats and instances

pub mod unit;
pub mod unit_type;

pub use unit::Unit;
pub use unit_type::{standard_registry, UnitRegistry, UnitStats, UnitType};
