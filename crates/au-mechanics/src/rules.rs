//! Balance constants for character creation and combat.
//!
//! [`CombatRules::default`] reproduces the numbers the game ships with. A
//! rules file may override any subset of fields; missing fields keep their
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dice::Die;
use crate::error::{MechError, MechResult};

/// Every tunable number used by the combat resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CombatRules {
    /// Flat hit points every new character starts with.
    pub base_hp: i32,
    /// Extra max HP per point of attack at creation.
    pub hp_per_attack: i32,
    /// Extra max HP per point of magic at creation.
    pub hp_per_magic: i32,

    /// Die rolled for every hit check.
    pub hit_die: Die,
    /// Agility (and magic, for spells) is divided by this to get a hit bonus.
    pub agility_divisor: i32,
    /// Base target for the player's weapon attacks.
    pub physical_hit_target: i32,
    /// Base target for the player's spells.
    pub magic_hit_target: i32,
    /// Base target for enemy moves.
    pub enemy_hit_target: i32,

    /// Smallest damage a landed hit can deal.
    pub min_damage: i32,
    /// Spread of the player's weapon damage roll.
    pub physical_variance: u32,
    /// Spread of the player's spell damage roll.
    pub magic_variance: u32,
    /// Fraction of defense that still applies against magic.
    pub magic_defense_factor: f64,

    /// Fraction of enemy attack added to physical moves.
    pub enemy_attack_factor: f64,
    /// Fraction of enemy magic added to magic moves.
    pub enemy_magic_factor: f64,
    /// Fraction of enemy magic added to drain moves.
    pub drain_magic_factor: f64,
    /// Spread of enemy damage rolls.
    pub enemy_variance: u32,

    /// Damage bonus while focused.
    pub focus_bonus: i32,
    /// Rounds focus lasts.
    pub focus_turns: u32,
    /// Hit roll penalty while shaken.
    pub shaken_penalty: i32,
    /// Rounds shaken lasts.
    pub shaken_turns: u32,

    /// Flee chance with equal agility.
    pub flee_base_chance: f64,
    /// Flee chance gained per point of agility advantage.
    pub flee_agility_step: f64,
    /// Enemy agility lead at which fleeing always fails.
    pub flee_block_margin: i32,

    /// Player power at which enemies keep their listed HP.
    pub enemy_scale_baseline: i32,
    /// Each point of power above the baseline adds `1 / divisor` to enemy HP.
    pub enemy_scale_divisor: i32,
    /// Enemy HP never scales below this.
    pub enemy_min_hp: i32,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            base_hp: 60,
            hp_per_attack: 2,
            hp_per_magic: 1,
            hit_die: Die::D20,
            agility_divisor: 2,
            physical_hit_target: 8,
            magic_hit_target: 7,
            enemy_hit_target: 7,
            min_damage: 1,
            physical_variance: 3,
            magic_variance: 4,
            magic_defense_factor: 0.5,
            enemy_attack_factor: 0.3,
            enemy_magic_factor: 0.35,
            drain_magic_factor: 0.25,
            enemy_variance: 2,
            focus_bonus: 3,
            focus_turns: 2,
            shaken_penalty: 2,
            shaken_turns: 2,
            flee_base_chance: 0.3,
            flee_agility_step: 0.02,
            flee_block_margin: 5,
            enemy_scale_baseline: 15,
            enemy_scale_divisor: 80,
            enemy_min_hp: 10,
        }
    }
}

impl CombatRules {
    /// Load rules from a JSON file and validate them.
    pub fn from_file(path: &Path) -> MechResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| MechError::RulesIo {
            path: path.to_path_buf(),
            source,
        })?;
        let rules: Self = serde_json::from_str(&text).map_err(|source| MechError::RulesParse {
            path: path.to_path_buf(),
            source,
        })?;
        rules.validate()?;
        tracing::debug!(path = %path.display(), "loaded combat rules");
        Ok(rules)
    }

    /// Check that the numbers can be used without dividing by zero or
    /// producing probabilities outside `[0, 1]`.
    pub fn validate(&self) -> MechResult<()> {
        if self.agility_divisor <= 0 {
            return Err(MechError::InvalidRules(
                "agility_divisor must be positive".to_string(),
            ));
        }
        if self.enemy_scale_divisor <= 0 {
            return Err(MechError::InvalidRules(
                "enemy_scale_divisor must be positive".to_string(),
            ));
        }
        if self.hit_die.sides() < 2 {
            return Err(MechError::InvalidRules(
                "hit_die needs at least two sides".to_string(),
            ));
        }
        if self.min_damage < 0 {
            return Err(MechError::InvalidRules(
                "min_damage must not be negative".to_string(),
            ));
        }
        if self.base_hp <= 0 || self.enemy_min_hp <= 0 {
            return Err(MechError::InvalidRules(
                "base_hp and enemy_min_hp must be positive".to_string(),
            ));
        }
        let factors = [
            ("magic_defense_factor", self.magic_defense_factor),
            ("enemy_attack_factor", self.enemy_attack_factor),
            ("enemy_magic_factor", self.enemy_magic_factor),
            ("drain_magic_factor", self.drain_magic_factor),
            ("flee_agility_step", self.flee_agility_step),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(MechError::InvalidRules(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.flee_base_chance) {
            return Err(MechError::InvalidRules(
                "flee_base_chance must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Hit bonus granted by a stat.
    pub fn stat_bonus(&self, value: i32) -> i32 {
        value.div_euclid(self.agility_divisor.max(1))
    }

    /// Maximum HP for a freshly created character.
    pub fn starting_hp(&self, attack: i32, magic: i32) -> i32 {
        self.base_hp
            .saturating_add(attack.saturating_mul(self.hp_per_attack))
            .saturating_add(magic.saturating_mul(self.hp_per_magic))
    }

    /// Enemy HP scaled to the player's power.
    pub fn scaled_enemy_hp(&self, listed_hp: i32, player_power: i32) -> i32 {
        let divisor = f64::from(self.enemy_scale_divisor.max(1));
        let offset = player_power.saturating_sub(self.enemy_scale_baseline);
        let scale = 1.0 + f64::from(offset) / divisor;
        let scaled = (f64::from(listed_hp) * scale) as i32;
        scaled.max(self.enemy_min_hp)
    }

    /// Flee chance for the given agilities, or `None` when fleeing is blocked.
    pub fn flee_chance(&self, player_agility: i32, enemy_agility: i32) -> Option<f64> {
        if enemy_agility.saturating_sub(player_agility) >= self.flee_block_margin {
            return None;
        }
        let diff = f64::from(player_agility.saturating_sub(enemy_agility));
        Some((self.flee_base_chance + diff * self.flee_agility_step).clamp(0.0, 1.0))
    }
}
