//! World grid - fixed-size array of nullable tiles
//!
//! Water cells hold `None`; land cells hold a `Tile`. The climate map the
//! grid was built from is kept alongside, read-only.

use serde::{Deserialize, Serialize};

use crate::core::climate::{latitude_of_row, Climate};
use crate::core::types::{Direction, TileCoord};
use crate::world::ingest::ClimateMap;
use crate::world::tile::Tile;

/// The map: `width * height` cells, row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldGrid {
    width: usize,
    height: usize,
    tiles: Vec<Option<Tile>>,
    climate: ClimateMap,
}

impl WorldGrid {
    /// Instantiate a tile for every land cell.
    ///
    /// A land cell without a climate gets the latitude fallback, the same
    /// rule ingestion uses.
    pub fn init_map(climate: ClimateMap) -> Self {
        let width = climate.width();
        let height = climate.height();
        let mut tiles = Vec::with_capacity(width * height);

        for y in 0..height {
            let latitude = latitude_of_row(y, height);
            for x in 0..width {
                if climate.is_land(x, y) {
                    let c = climate
                        .climate_at(x, y)
                        .unwrap_or_else(|| Climate::from_latitude(latitude));
                    tiles.push(Some(Tile::new(TileCoord::new(x, y), c)));
                } else {
                    tiles.push(None);
                }
            }
        }

        Self {
            width,
            height,
            tiles,
            climate,
        }
    }

    /// All-land grid with one climate (test and demo helper)
    pub fn uniform(width: usize, height: usize, climate: Climate) -> Self {
        Self::init_map(ClimateMap::uniform(width, height, climate))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn climate_map(&self) -> &ClimateMap {
        &self.climate
    }

    pub fn in_bounds(&self, coord: TileCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        self.in_bounds(coord).then(|| coord.y * self.width + coord.x)
    }

    /// Land tile at `coord`; None for water or out of bounds
    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.index(coord).and_then(|i| self.tiles[i].as_ref())
    }

    pub fn tile_mut(&mut self, coord: TileCoord) -> Option<&mut Tile> {
        self.index(coord).and_then(move |i| self.tiles[i].as_mut())
    }

    pub fn is_land(&self, coord: TileCoord) -> bool {
        self.tile(coord).is_some()
    }

    /// On the outermost ring of the grid
    pub fn is_border(&self, coord: TileCoord) -> bool {
        coord.x == 0 || coord.y == 0 || coord.x + 1 == self.width || coord.y + 1 == self.height
    }

    /// In-bounds cardinal neighbours (land or water)
    pub fn neighbors4(&self, coord: TileCoord) -> impl Iterator<Item = TileCoord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| coord.step(d))
            .filter(move |c| self.in_bounds(*c))
    }

    /// In-bounds cells of the 3x3 block centred on `coord`, centre included
    pub fn block3x3(&self, coord: TileCoord) -> Vec<TileCoord> {
        let mut cells = Vec::with_capacity(9);
        for y in coord.y.saturating_sub(1)..=coord.y + 1 {
            for x in coord.x.saturating_sub(1)..=coord.x + 1 {
                let c = TileCoord::new(x, y);
                if self.in_bounds(c) {
                    cells.push(c);
                }
            }
        }
        cells
    }

    /// Latitude of a row, +90 at the top
    pub fn latitude(&self, y: usize) -> f64 {
        latitude_of_row(y, self.height)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }

    pub fn land_count(&self) -> usize {
        self.tiles().count()
    }
}
