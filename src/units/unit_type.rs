//! Unit types and their fixed stat table
//!
//! The five base types form a strength cycle:
//! Swordsman > Archer > Mage > Spearman > Cavalry > Swordsman.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

/// Type of trainable unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Swordsman,
    Archer,
    Mage,
    Spearman,
    Cavalry,
}

impl UnitType {
    pub const ALL: [UnitType; 5] = [
        UnitType::Swordsman,
        UnitType::Archer,
        UnitType::Mage,
        UnitType::Spearman,
        UnitType::Cavalry,
    ];

    /// The type this one deals bonus damage to
    pub fn counters(&self) -> UnitType {
        match self {
            UnitType::Swordsman => UnitType::Archer,
            UnitType::Archer => UnitType::Mage,
            UnitType::Mage => UnitType::Spearman,
            UnitType::Spearman => UnitType::Cavalry,
            UnitType::Cavalry => UnitType::Swordsman,
        }
    }

    pub fn is_strong_against(&self, other: UnitType) -> bool {
        self.counters() == other
    }

    /// Uniformly random base type
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> UnitType {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnitType::Swordsman => "Swordsman",
            UnitType::Archer => "Archer",
            UnitType::Mage => "Mage",
            UnitType::Spearman => "Spearman",
            UnitType::Cavalry => "Cavalry",
        }
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown unit type: {}", s))
    }
}

/// Stats a fresh unit of a given type starts with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub hp: f32,
    pub attack: f32,
    #[serde(rename = "move")]
    pub base_move: u32,
}

impl UnitStats {
    pub const fn new(hp: f32, attack: f32, base_move: u32) -> Self {
        Self {
            hp,
            attack,
            base_move,
        }
    }
}

/// Immutable lookup table from unit type to stats.
///
/// Built once and shared with the engine through an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitRegistry {
    stats: [UnitStats; 5],
}

impl UnitRegistry {
    /// The standard stat table
    pub fn new() -> Self {
        Self {
            stats: [
                UnitStats::new(100.0, 20.0, 1), // Swordsman
                UnitStats::new(80.0, 25.0, 1),  // Archer
                UnitStats::new(60.0, 30.0, 1),  // Mage
                UnitStats::new(90.0, 22.0, 1),  // Spearman
                UnitStats::new(110.0, 18.0, 2), // Cavalry
            ],
        }
    }

    /// Replace one entry. Only used while assembling a custom registry.
    pub fn with_stats(mut self, unit_type: UnitType, stats: UnitStats) -> Self {
        self.stats[Self::slot(unit_type)] = stats;
        self
    }

    pub fn stats(&self, unit_type: UnitType) -> UnitStats {
        self.stats[Self::slot(unit_type)]
    }

    /// Damage multiplier for `attacker` hitting `defender`
    pub fn type_multiplier(&self, attacker: UnitType, defender: UnitType, counter_bonus: f32) -> f32 {
        if attacker.is_strong_against(defender) {
            counter_bonus
        } else {
            1.0
        }
    }

    fn slot(unit_type: UnitType) -> usize {
        match unit_type {
            UnitType::Swordsman => 0,
            UnitType::Archer => 1,
            UnitType::Mage => 2,
            UnitType::Spearman => 3,
            UnitType::Cavalry => 4,
        }
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static STANDARD: OnceLock<Arc<UnitRegistry>> = OnceLock::new();

/// Shared handle to the standard registry (built on first use)
pub fn standard_registry() -> Arc<UnitRegistry> {
    STANDARD.get_or_init(|| Arc::new(UnitRegistry::new())).clone()
}
