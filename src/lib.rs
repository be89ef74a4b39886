//! Köppen Realms - turn-based territorial strategy on a climate map
//!
//! Civilizations found capitals on a Köppen climate grid, move and fight
//! with their units, build, and grow their territory tile by tile.

pub mod civ;
pub mod core;
pub mod game;
pub mod units;
pub mod world;
