//! Construction and unit training

use crate::core::error::ActionError;
use crate::core::types::{CivId, TileCoord, UnitId};
use crate::game::engine::{rejected, Game};
use crate::game::events::GameEvent;
use crate::units::unit_type::UnitType;
use crate::world::tile::Building;

impl Game {
    /// Build on one of `civ`'s tiles.
    ///
    /// Residences add population, Barracks enable training. Capitals cannot
    /// be built, and climate-bound buildings need a matching tile.
    pub fn build_building(&mut self, building: Building, at: TileCoord, civ: CivId) -> Result<(), ActionError> {
        self.civ_checked(civ)?;
        let Some(tile) = self.grid.tile(at) else {
            return rejected("Build", ActionError::invalid_tile(at, "cannot build on water"));
        };
        if !tile.is_owned_by(civ) {
            return rejected("Build", ActionError::invalid_tile(at, "tile is not in your territory"));
        }
        if tile.building.is_some() {
            return rejected("Build", ActionError::OccupiedBuilding(at));
        }
        if building == Building::Capital {
            return rejected("Build", ActionError::CapitalNotBuildable);
        }
        if !building.allowed_on(tile.climate) {
            let required = building
                .required_climates()
                .iter()
                .map(|c| c.code())
                .collect::<Vec<_>>()
                .join(" or ");
            return rejected(
                "Build",
                ActionError::ClimateRequired {
                    building: building.name().to_string(),
                    required,
                },
            );
        }

        let increase = self.config.residence_population_increase;
        let owner = &mut self.civs[civ.index()];
        match building {
            Building::Residence => {
                owner.population += increase;
                owner.residences += 1;
            }
            Building::Barracks => owner.barracks += 1,
            Building::Igluvijaq | Building::Capital => {}
        }
        if let Some(tile) = self.grid.tile_mut(at) {
            tile.building = Some(building);
        }

        tracing::info!("{} built a {} at {}", self.civs[civ.index()].name, building, at);
        self.events.push(GameEvent::BuildingConstructed { civ, building, at });
        Ok(())
    }

    /// Train a random unit at a Barracks, paying for it in population.
    ///
    /// The civ must hold strictly more population than the training cost.
    /// A plain `population >= cost` rule would let a fresh civ (1000
    /// population, cost 500) train twice and end at zero; the stricter rule
    /// stops it at one unit with 500 left, which is the economy the
    /// integration scenarios expect. The two rules differ only when
    /// population equals the cost exactly.
    pub fn train_unit_from_barracks(&mut self, at: TileCoord, civ: CivId) -> Result<UnitId, ActionError> {
        let available = self.civ_checked(civ)?.population;
        match self.grid.tile(at) {
            None => return rejected("Training", ActionError::invalid_tile(at, "water")),
            Some(tile) if tile.building != Some(Building::Barracks) => {
                return rejected("Training", ActionError::invalid_tile(at, "no Barracks here"))
            }
            Some(_) => {}
        }

        // Training may not spend a civ's last population
        let needed = self.config.barracks_train_cost;
        if available <= needed {
            return rejected("Training", ActionError::InsufficientResources { needed, available });
        }

        self.civs[civ.index()].population -= needed;
        let unit_type = UnitType::random(&mut self.rng);
        let unit = self.spawn_unit(civ, unit_type, at)?;

        tracing::info!("{} trained a {} at {}", self.civs[civ.index()].name, unit_type, at);
        self.events.push(GameEvent::UnitTrained { civ, unit, unit_type, at });
        Ok(unit)
    }
}
