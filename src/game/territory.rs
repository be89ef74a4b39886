//! Territory: ownership transfer, enclosure annexation and elimination
//!
//! A tile's `owner` and its owner's `territory` set are two views of the
//! same fact. Every ownership change in the engine goes through `set_owner`
//! so that both stay consistent.

use std::collections::VecDeque;

use crate::core::error::ActionError;
use crate::core::types::{CivId, TileCoord};
use crate::game::engine::{rejected, Game};
use crate::game::events::GameEvent;

impl Game {
    /// Transfer one land tile to `civ`. Returns the previous owner.
    pub(crate) fn set_owner(&mut self, coord: TileCoord, civ: CivId) -> Option<CivId> {
        let tile = self.grid.tile_mut(coord)?;
        let previous = tile.owner.replace(civ);
        if let Some(prev) = previous.filter(|p| *p != civ) {
            if let Some(old) = self.civs.get_mut(prev.index()) {
                old.territory.remove(&coord);
            }
        }
        if let Some(new) = self.civs.get_mut(civ.index()) {
            new.territory.insert(coord);
        }
        previous
    }

    /// Give a land tile to `civ` without any capture side effects
    pub fn claim_tile(&mut self, civ: CivId, coord: TileCoord) -> Result<(), ActionError> {
        self.civ_checked(civ)?;
        if self.grid.tile(coord).is_none() {
            return rejected("Claim", ActionError::invalid_tile(coord, "water"));
        }
        self.set_owner(coord, civ);
        Ok(())
    }

    /// Annex every unowned pocket of land fully enclosed by `civ`.
    ///
    /// A pocket is a maximal 4-connected region of unowned land. It is
    /// enclosed unless one of its cells lies on the map edge or borders
    /// water or another civ's tile. Returns the annexed tiles.
    pub fn update_surrounded_territory_group(&mut self, civ: CivId) -> Vec<TileCoord> {
        let (w, h) = (self.grid.width(), self.grid.height());
        let mut visited = vec![false; w * h];
        let mut annexed = Vec::new();

        for y in 0..h {
            for x in 0..w {
                let start = TileCoord::new(x, y);
                if visited[y * w + x] || self.grid.is_border(start) {
                    continue;
                }
                if !matches!(self.grid.tile(start), Some(t) if t.owner.is_none()) {
                    continue;
                }

                let mut region = Vec::new();
                let mut enclosed = true;
                let mut queue = VecDeque::new();
                visited[y * w + x] = true;
                queue.push_back(start);

                while let Some(cell) = queue.pop_front() {
                    region.push(cell);
                    if self.grid.is_border(cell) {
                        enclosed = false;
                    }
                    for n in self.grid.neighbors4(cell) {
                        match self.grid.tile(n) {
                            None => enclosed = false,
                            Some(t) => match t.owner {
                                Some(owner) if owner != civ => enclosed = false,
                                Some(_) => {}
                                None => {
                                    if !visited[n.y * w + n.x] {
                                        visited[n.y * w + n.x] = true;
                                        queue.push_back(n);
                                    }
                                }
                            },
                        }
                    }
                }

                if enclosed {
                    annexed.extend(region);
                }
            }
        }

        if !annexed.is_empty() {
            for coord in &annexed {
                self.set_owner(*coord, civ);
            }
            tracing::info!(
                "{} annexed {} enclosed tiles",
                self.civs.get(civ.index()).map_or("?", |c| c.name.as_str()),
                annexed.len()
            );
            self.events.push(GameEvent::Annexed {
                civ,
                tiles: annexed.clone(),
            });
        }
        annexed
    }

    /// Capture a tile for `civ`.
    ///
    /// Capturing another civ's capital eliminates that civ. Returns the
    /// eliminated civ, if any.
    pub fn conquer_tile(&mut self, civ: CivId, coord: TileCoord) -> Result<Option<CivId>, ActionError> {
        self.civ_checked(civ)?;
        if self.grid.tile(coord).is_none() {
            return rejected("Conquest", ActionError::invalid_tile(coord, "water"));
        }

        let previous = self.set_owner(coord, civ);
        self.events.push(GameEvent::TileConquered { civ, previous, at: coord });

        let Some(loser) = previous.filter(|p| *p != civ) else {
            return Ok(None);
        };
        let lost_capital = self
            .civs
            .get(loser.index())
            .is_some_and(|c| c.alive && c.capital == Some(coord));
        if lost_capital {
            self.eliminate_civ(loser, civ)?;
            return Ok(Some(loser));
        }
        Ok(None)
    }

    /// Remove `civ` from play and hand all its land to `conqueror`.
    ///
    /// The civ's units leave their tiles, its roster and the game. Its
    /// `capital` field is left as it was.
    pub fn eliminate_civ(&mut self, civ: CivId, conqueror: CivId) -> Result<(), ActionError> {
        self.civ_checked(civ)?;
        self.civ_checked(conqueror)?;

        let loser = &mut self.civs[civ.index()];
        loser.alive = false;
        let territory = std::mem::take(&mut loser.territory);
        let units = std::mem::take(&mut loser.units);
        let name = loser.name.clone();

        for coord in &territory {
            self.set_owner(*coord, conqueror);
        }
        for id in units {
            if let Some(unit) = self.units.remove(&id) {
                if let Some(tile) = self.grid.tile_mut(unit.position) {
                    tile.remove_occupant(id);
                }
            }
        }

        tracing::info!(
            "{} was eliminated by {}; {} tiles transferred",
            name,
            self.civs[conqueror.index()].name,
            territory.len()
        );
        self.events.push(GameEvent::CivEliminated {
            civ,
            conqueror,
            tiles: territory.len(),
        });
        Ok(())
    }
}
