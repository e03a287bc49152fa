//! Configuration for a play session.

use std::path::PathBuf;

use au_mechanics::CombatRules;

use crate::save::SaveFile;

/// Configuration for a [`GameSession`](crate::GameSession).
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed. A random seed is drawn (and logged) when unset.
    pub seed: Option<u64>,
    /// Where the save file lives.
    pub save_path: PathBuf,
    /// Balance numbers for character creation and combat.
    pub rules: CombatRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            save_path: PathBuf::from(SaveFile::DEFAULT_PATH),
            rules: CombatRules::default(),
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the save file path.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// Replace the combat rules.
    pub fn with_rules(mut self, rules: CombatRules) -> Self {
        self.rules = rules;
        self
    }
}
