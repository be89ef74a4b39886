//! Game engine state and read-only views
//!
//! `Game` is the single owner of the world grid, the civilization list and
//! the unit arena. Operations are split across the sibling modules as
//! separate `impl Game` blocks; this module holds the state, construction
//! and the accessors the rendering collaborator reads.

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

use crate::civ::civilization::Civilization;
use crate::core::calendar::{Calendar, Season};
use crate::core::config::GameConfig;
use crate::core::error::ActionError;
use crate::core::types::{CivId, TileCoord, Turn, UnitId};
use crate::game::events::GameEvent;
use crate::units::unit::Unit;
use crate::units::unit_type::{UnitRegistry, UnitType};
use crate::world::grid::WorldGrid;
use crate::world::tile::Tile;

/// The game engine
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) registry: Arc<UnitRegistry>,
    pub(crate) grid: WorldGrid,
    pub(crate) civs: Vec<Civilization>,
    pub(crate) units: AHashMap<UnitId, Unit>,
    pub(crate) next_unit_id: u32,
    pub(crate) calendar: Calendar,
    pub(crate) rng: ChaCha8Rng,
    /// Events since the last turn report
    pub(crate) events: Vec<GameEvent>,
}

impl Game {
    /// Create an engine over a prepared grid.
    ///
    /// The RNG is seeded from `config.seed`, or from OS entropy when unset.
    pub fn new(grid: WorldGrid, config: GameConfig, registry: Arc<UnitRegistry>) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(grid, config, registry, rng)
    }

    /// Create an engine with an explicit RNG
    pub fn with_rng(grid: WorldGrid, config: GameConfig, registry: Arc<UnitRegistry>, rng: ChaCha8Rng) -> Self {
        let calendar = Calendar::new(config.season_cycle_turns);
        Self {
            config,
            registry,
            grid,
            civs: Vec::new(),
            units: AHashMap::new(),
            next_unit_id: 1,
            calendar,
            rng,
            events: Vec::new(),
        }
    }

    // === VIEWS ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.grid.tile(TileCoord::new(x, y))
    }

    pub fn civs(&self) -> &[Civilization] {
        &self.civs
    }

    pub fn civ(&self, id: CivId) -> Option<&Civilization> {
        self.civs.get(id.index())
    }

    pub fn civ_ids(&self) -> impl Iterator<Item = CivId> {
        (0..self.civs.len() as u32).map(CivId)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Units in roster order, civ by civ
    pub fn units_of(&self, civ: CivId) -> Vec<&Unit> {
        self.civ(civ)
            .map(|c| c.units.iter().filter_map(|id| self.units.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn units_at(&self, coord: TileCoord) -> Vec<&Unit> {
        self.grid
            .tile(coord)
            .map(|t| t.occupants.iter().filter_map(|id| self.units.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn turn(&self) -> Turn {
        self.calendar.current_turn()
    }

    pub fn season(&self) -> Season {
        self.calendar.season()
    }

    pub fn season_label(&self) -> &'static str {
        self.calendar.season().label()
    }

    /// The human-controlled civilization, if any
    pub fn human_civ(&self) -> Option<CivId> {
        self.civs.iter().position(|c| c.is_human).map(|i| CivId(i as u32))
    }

    /// Rectangle spanning a civ's territory, for the minimap flag
    pub fn civ_bounding_box(&self, civ: CivId) -> Option<(TileCoord, TileCoord)> {
        let territory = &self.civ(civ)?.territory;
        let first = territory.iter().next()?;
        let (mut min, mut max) = (*first, *first);
        for c in territory {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        Some((min, max))
    }

    /// Human civ population in thousands, for the info panel
    pub fn player_population_thousands(&self) -> Option<u32> {
        self.human_civ()
            .and_then(|id| self.civ(id))
            .map(Civilization::population_thousands)
    }

    /// Drain events recorded since the last report
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === INTERNAL HELPERS ===

    pub(crate) fn civ_checked(&self, id: CivId) -> Result<&Civilization, ActionError> {
        self.civs.get(id.index()).ok_or(ActionError::UnknownCiv(id))
    }

    pub(crate) fn unit_checked(&self, id: UnitId) -> Result<&Unit, ActionError> {
        self.units.get(&id).ok_or(ActionError::UnknownUnit(id))
    }

    /// Create a unit, register it with its civ and the tile it stands on
    pub fn spawn_unit(&mut self, civ: CivId, unit_type: UnitType, at: TileCoord) -> Result<UnitId, ActionError> {
        self.civ_checked(civ)?;
        if self.grid.tile(at).is_none() {
            return Err(ActionError::invalid_tile(at, "cannot place a unit on water"));
        }

        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;

        let stats = self.registry.stats(unit_type);
        let unit = Unit::new(id, civ, unit_type, at, stats, self.config.move_multiplier);
        self.units.insert(id, unit);
        self.civs[civ.index()].units.push(id);
        if let Some(tile) = self.grid.tile_mut(at) {
            tile.add_occupant(id);
        }

        tracing::debug!("Spawned {} {} for {} at {}", unit_type, id, self.civs[civ.index()].name, at);
        Ok(id)
    }

    /// Move a unit between tiles, keeping occupant lists in sync
    pub(crate) fn relocate_unit(&mut self, id: UnitId, to: TileCoord) {
        let Some(unit) = self.units.get_mut(&id) else {
            return;
        };
        let from = unit.position;
        unit.position = to;
        if let Some(tile) = self.grid.tile_mut(from) {
            tile.remove_occupant(id);
        }
        if let Some(tile) = self.grid.tile_mut(to) {
            tile.add_occupant(id);
        }
    }
}

/// Log a rejected action and hand the error back
pub(crate) fn rejected<T>(action: &str, err: ActionError) -> Result<T, ActionError> {
    tracing::warn!("{} rejected: {}", action, err);
    Err(err)
}
