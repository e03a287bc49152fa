//! Player characters and the templates they are created from.

use serde::{Deserialize, Serialize};

use crate::hp::HitPoints;
use crate::rules::CombatRules;
use crate::stats::{Stat, Stats};

/// A playable character variant offered at character selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterTemplate {
    /// Stable key stored in save files.
    pub key: &'static str,
    /// Name shown to the player.
    pub display_name: &'static str,
    /// One-line pitch shown at selection.
    pub description: &'static str,
    /// Starting stats.
    pub stats: Stats,
}

/// The player's character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name.
    pub name: String,
    /// Roster key this character was created from.
    pub template: String,
    /// Hit points.
    #[serde(flatten)]
    pub hp: HitPoints,
    /// Combat stats, including permanent upgrades.
    #[serde(flatten)]
    pub stats: Stats,
    /// Number of permanent upgrades applied so far.
    pub stat_upgrades: u32,
}

impl Character {
    /// Create a fresh character at full health.
    pub fn from_template(template: &CharacterTemplate, rules: &CombatRules) -> Self {
        let max_hp = rules.starting_hp(template.stats.attack, template.stats.magic);
        Self {
            name: template.display_name.to_string(),
            template: template.key.to_string(),
            hp: HitPoints::new(max_hp),
            stats: template.stats,
            stat_upgrades: 0,
        }
    }

    /// Returns true while the character has hit points left.
    pub fn is_alive(&self) -> bool {
        self.hp.is_alive()
    }

    /// Restore hit points, returning the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.hp.heal(amount)
    }

    /// Permanently raise a stat and count the upgrade.
    pub fn apply_upgrade(&mut self, stat: Stat, amount: i32) {
        self.stats.add(stat, amount);
        self.stat_upgrades = self.stat_upgrades.saturating_add(1);
    }

    /// Multi-line character sheet.
    pub fn sheet(&self) -> String {
        format!(
            "{}\n  HP: {}\n  {}\n  Permanent upgrades: {}",
            self.name, self.hp, self.stats, self.stat_upgrades
        )
    }
}
