//! Combat resolution
//!
//! Both sides strike at once: the defender takes the attacker's boosted
//! damage and the attacker takes the defender's plain attack, whatever the
//! outcome. Combat only changes hp; nothing is removed on death.

use serde::{Deserialize, Serialize};

use crate::core::error::ActionError;
use crate::core::types::UnitId;
use crate::game::engine::Game;
use crate::game::events::GameEvent;

/// Figures from one exchange of blows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub damage_dealt: f32,
    pub damage_taken: f32,
    pub attacker_hp: f32,
    pub defender_hp: f32,
}

impl CombatOutcome {
    pub fn defender_died(&self) -> bool {
        self.defender_hp <= 0.0
    }
}

/// Damage of one strike
pub fn strike_damage(attack: f32, type_multiplier: f32, terrain_multiplier: f32) -> f32 {
    attack * type_multiplier * terrain_multiplier
}

impl Game {
    /// Terrain multiplier for `unit` attacking from where it stands
    pub fn terrain_multiplier(&self, unit: UnitId) -> f32 {
        let Some(u) = self.units.get(&unit) else {
            return 1.0;
        };
        let cold_adapted = self
            .civs
            .get(u.civ.index())
            .is_some_and(|c| c.capabilities.cold_adapted);
        let on_cold = self.grid.tile(u.position).is_some_and(|t| t.climate.is_cold());
        if cold_adapted && on_cold {
            self.config.combat.cold_terrain_attack_bonus
        } else {
            1.0
        }
    }

    /// Resolve one simultaneous exchange between two units
    pub fn combat(&mut self, attacker: UnitId, defender: UnitId) -> Result<CombatOutcome, ActionError> {
        let a = self.unit_checked(attacker)?;
        let d = self.unit_checked(defender)?;

        let type_mult = self
            .registry
            .type_multiplier(a.unit_type, d.unit_type, self.config.combat.counter_multiplier);
        let damage_dealt = strike_damage(a.attack, type_mult, self.terrain_multiplier(attacker));
        let damage_taken = d.attack;

        let defender_hp = match self.units.get_mut(&defender) {
            Some(d) => {
                d.hp -= damage_dealt;
                d.hp
            }
            None => return Err(ActionError::UnknownUnit(defender)),
        };
        let attacker_hp = match self.units.get_mut(&attacker) {
            Some(a) => {
                a.hp -= damage_taken;
                a.hp
            }
            None => return Err(ActionError::UnknownUnit(attacker)),
        };

        tracing::debug!(
            "Combat {} -> {}: dealt {:.1}, took {:.1} (hp {:.1} / {:.1})",
            attacker,
            defender,
            damage_dealt,
            damage_taken,
            attacker_hp,
            defender_hp
        );
        self.events.push(GameEvent::Combat {
            attacker,
            defender,
            damage_dealt,
            damage_taken,
            defender_hp,
        });

        Ok(CombatOutcome {
            damage_dealt,
            damage_taken,
            attacker_hp,
            defender_hp,
        })
    }
}
