//! Turn calendar and seasons
//!
//! The season is a pure function of the turn within the cycle, the
//! hemisphere of the player's capital and whether that capital sits in a
//! tropical climate.

use serde::{Deserialize, Serialize};

use crate::core::climate::Climate;
use crate::core::types::Turn;

/// Season shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    DrySeason,
    WetSeason,
    Winter,
    Spring,
    Summer,
    Autumn,
    /// No player capital to derive a season from
    Unknown,
}

impl Season {
    /// Derive the season for a turn.
    ///
    /// Tropical (group A) capitals alternate dry/wet halves; all others cycle
    /// through four quarters. The southern hemisphere is phase-shifted by
    /// half a cycle.
    pub fn derive(turn: Turn, cycle: u32, latitude: f64, capital_climate: Climate) -> Season {
        let cycle = cycle.max(4);
        let t = turn % cycle;
        let northern = latitude >= 0.0;

        if capital_climate.is_tropical() {
            let first_half = t < cycle / 2;
            return match (northern, first_half) {
                (true, true) | (false, false) => Season::DrySeason,
                _ => Season::WetSeason,
            };
        }

        let quarter = t / (cycle / 4);
        let order = if northern {
            [Season::Winter, Season::Spring, Season::Summer, Season::Autumn]
        } else {
            [Season::Summer, Season::Autumn, Season::Winter, Season::Spring]
        };
        order[quarter.min(3) as usize]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::DrySeason => "Dry Season",
            Season::WetSeason => "Wet Season",
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Unknown => "Unknown",
        }
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar tracks the turn counter and the cached season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    turn: Turn,
    cycle: u32,
    season: Season,
}

impl Calendar {
    pub fn new(cycle: u32) -> Self {
        Self {
            turn: 0,
            cycle,
            season: Season::Unknown,
        }
    }

    pub fn advance(&mut self) {
        self.turn += 1;
    }

    pub fn current_turn(&self) -> Turn {
        self.turn
    }

    pub fn season(&self) -> Season {
        self.season
    }

    /// Recompute the cached season. Returns the previous value.
    pub fn update_season(&mut self, capital: Option<(f64, Climate)>) -> Season {
        let next = match capital {
            Some((latitude, climate)) => Season::derive(self.turn, self.cycle, latitude, climate),
            None => Season::Unknown,
        };
        std::mem::replace(&mut self.season, next)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(60)
    }
}
