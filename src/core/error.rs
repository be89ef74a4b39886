use thiserror::Error;

use crate::core::types::{CivId, TileCoord, UnitId};

/// Setup, configuration and I/O failures
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid grid: {0}")]
    Grid(String),

    #[error("Raster error: {0}")]
    Raster(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, GameError>;

/// Rejected player or AI action. State is unchanged whenever one is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Target tile is out of reach (distance {distance}, allowance {allowance})")]
    InvalidTarget { distance: usize, allowance: u32 },

    #[error("Invalid tile {coord}: {reason}")]
    InvalidTile { coord: TileCoord, reason: String },

    #[error("A building already exists at {0}")]
    OccupiedBuilding(TileCoord),

    #[error("Not enough population to train (cost {needed}, have {available})")]
    InsufficientResources { needed: u32, available: u32 },

    #[error("{civ} could not find a capital site after {attempts} attempts")]
    PlacementExhausted { civ: String, attempts: u32 },

    #[error("Capital already exists; capitals are placed at game start only")]
    CapitalNotBuildable,

    #[error("{building} can only be built in {required}")]
    ClimateRequired { building: String, required: String },

    #[error("Unknown unit {0}")]
    UnknownUnit(UnitId),

    #[error("Unknown civilization {0:?}")]
    UnknownCiv(CivId),

    #[error("No unit selected")]
    NoSelection,
}

impl ActionError {
    pub fn invalid_tile(coord: TileCoord, reason: impl Into<String>) -> Self {
        ActionError::InvalidTile {
            coord,
            reason: reason.into(),
        }
    }
}
