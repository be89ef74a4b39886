//! Game setup: registering civilizations and placing capitals

use rand::Rng;

use crate::civ::civilization::Civilization;
use crate::core::error::ActionError;
use crate::core::types::{CivId, TileCoord, UnitId};
use crate::game::engine::{rejected, Game};
use crate::game::events::GameEvent;
use crate::units::unit_type::UnitType;
use crate::world::tile::Building;

/// Outcome of `init_civs`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupReport {
    pub capitals: Vec<(CivId, TileCoord)>,
    /// Civs left without a capital; the game goes on without one
    pub exhausted: Vec<ActionError>,
}

impl SetupReport {
    pub fn is_complete(&self) -> bool {
        self.exhausted.is_empty()
    }
}

impl Game {
    /// Add civilizations to the game. The first civ ever registered is the
    /// human player; every other civ is AI-controlled.
    pub fn register_civs(&mut self, civs: Vec<Civilization>) -> Vec<CivId> {
        let mut ids = Vec::with_capacity(civs.len());
        for mut civ in civs {
            civ.is_human = self.civs.is_empty();
            let id = CivId(self.civs.len() as u32);
            tracing::debug!("Registered {} ({}) as {:?}", civ.name, civ.code, id);
            self.civs.push(civ);
            ids.push(id);
        }
        ids
    }

    /// Register civilizations and give each a capital on a random unowned
    /// land tile.
    ///
    /// A civ that finds no site within the attempt budget stays
    /// capital-less; this is reported, not an error.
    pub fn init_civs(&mut self, civs: Vec<Civilization>) -> SetupReport {
        let ids = self.register_civs(civs);
        let mut report = SetupReport::default();
        let attempts = self.config.capital_placement_attempts;

        for id in ids {
            match self.find_capital_site(attempts) {
                Some(site) => {
                    if self.place_capital(id, site).is_ok() {
                        report.capitals.push((id, site));
                    }
                }
                None => {
                    let err = ActionError::PlacementExhausted {
                        civ: self.civs[id.index()].name.clone(),
                        attempts,
                    };
                    tracing::warn!("{}", err);
                    self.events.push(GameEvent::PlacementExhausted { civ: id, attempts });
                    report.exhausted.push(err);
                }
            }
        }

        let capital = self.capital_context();
        self.calendar.update_season(capital);

        tracing::info!(
            "Placed {} capitals for {} civilizations",
            report.capitals.len(),
            self.civs.len()
        );
        report
    }

    fn find_capital_site(&mut self, attempts: u32) -> Option<TileCoord> {
        let (w, h) = (self.grid.width(), self.grid.height());
        if w == 0 || h == 0 {
            return None;
        }
        for _ in 0..attempts {
            let coord = TileCoord::new(self.rng.gen_range(0..w), self.rng.gen_range(0..h));
            if matches!(self.grid.tile(coord), Some(tile) if tile.owner.is_none()) {
                return Some(coord);
            }
        }
        None
    }

    /// Found a civ's capital at `site`.
    ///
    /// Claims the tile and its unowned land neighbours, marks the Capital
    /// building and spawns one unit of a random type there.
    pub fn place_capital(&mut self, civ: CivId, site: TileCoord) -> Result<UnitId, ActionError> {
        self.civ_checked(civ)?;
        match self.grid.tile(site) {
            None => return rejected("Capital placement", ActionError::invalid_tile(site, "water")),
            Some(tile) if tile.owner.is_some() => {
                return rejected("Capital placement", ActionError::invalid_tile(site, "already owned"))
            }
            Some(_) => {}
        }

        self.set_owner(site, civ);
        if let Some(tile) = self.grid.tile_mut(site) {
            tile.building = Some(Building::Capital);
        }
        self.civs[civ.index()].capital = Some(site);

        let unit_type = UnitType::random(&mut self.rng);
        let unit = self.spawn_unit(civ, unit_type, site)?;

        for neighbour in self.grid.block3x3(site) {
            if matches!(self.grid.tile(neighbour), Some(tile) if tile.owner.is_none()) {
                self.set_owner(neighbour, civ);
            }
        }

        tracing::info!(
            "{} founded its capital at {} with a {}",
            self.civs[civ.index()].name,
            site,
            unit_type
        );
        self.events.push(GameEvent::CapitalPlaced { civ, at: site, unit });
        Ok(unit)
    }
}
