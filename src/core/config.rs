//! Game configuration with documented constants
//!
//! All tuning numbers are collected here. Defaults reproduce the classic
//! ruleset; a TOML file may override any subset of them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{GameError, Result};

/// Configuration for the game rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === MOVEMENT ===
    /// Scales every unit's base move into its per-turn budget
    ///
    /// A Swordsman (base move 1) therefore reaches 3 tiles per turn,
    /// Cavalry (base move 2) reaches 6.
    pub move_multiplier: u32,

    // === POPULATION ===
    /// Population every civilization starts with
    pub initial_population: u32,

    /// Population gained per Residence built
    pub residence_population_increase: u32,

    /// Population spent to train one unit at a Barracks
    pub barracks_train_cost: u32,

    // === SETUP ===
    /// Random tile attempts per civilization when placing its capital
    ///
    /// On a mostly-water map a civ may fail to find a site; it then
    /// plays without a capital.
    pub capital_placement_attempts: u32,

    // === SEASONS ===
    /// Length of the full season cycle in turns
    ///
    /// Temperate capitals see four quarters of `cycle / 4` turns, tropical
    /// capitals two halves of `cycle / 2`.
    pub season_cycle_turns: u32,

    // === COMBAT ===
    pub combat: CombatConfig,

    /// Seed for the game RNG. None draws one from the OS.
    pub seed: Option<u64>,
}

/// Damage multipliers used by combat resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Applied when the attacker's type counters the defender's type
    pub counter_multiplier: f32,

    /// Applied when a cold-adapted civilization attacks from tundra or ice cap
    pub cold_terrain_attack_bonus: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            counter_multiplier: 1.5,
            cold_terrain_attack_bonus: 1.2,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            move_multiplier: 3,
            initial_population: 1000,
            residence_population_increase: 1000,
            barracks_train_cost: 500,
            capital_placement_attempts: 1000,
            season_cycle_turns: 60,
            combat: CombatConfig::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate().map_err(GameError::Config)?;
        Ok(config)
    }

    /// Load and validate a TOML file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.move_multiplier == 0 {
            return Err("move_multiplier must be positive".into());
        }

        if self.barracks_train_cost == 0 {
            return Err("barracks_train_cost must be positive".into());
        }

        if self.capital_placement_attempts == 0 {
            return Err("capital_placement_attempts must be positive".into());
        }

        // Seasons split the cycle into quarters
        if self.season_cycle_turns == 0 || self.season_cycle_turns % 4 != 0 {
            return Err(format!(
                "season_cycle_turns ({}) must be a positive multiple of 4",
                self.season_cycle_turns
            ));
        }

        if self.combat.counter_multiplier <= 0.0 || self.combat.cold_terrain_attack_bonus <= 0.0 {
            return Err("Combat multipliers must be positive".into());
        }

        Ok(())
    }
}
