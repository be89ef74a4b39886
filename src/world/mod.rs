//! World map: tiles, the nullable-tile grid and climate ingestion

pub mod grid;
pub mod ingest;
pub mod tile;

pub use grid::WorldGrid;
pub use ingest::{ClimateMap, RasterDocument};
pub use tile::{Building, Tile};
