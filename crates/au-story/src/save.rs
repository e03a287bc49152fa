//! Save state and the single-slot save file.
//!
//! The file is a flat, pretty-printed JSON object: the character's fields at
//! the top level, followed by `inventory`, `flags`, and `scene`. Saving
//! overwrites the file wholesale.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use au_mechanics::item::catalog;
use au_mechanics::{Character, Inventory, Stat, roster};

use crate::error::SaveError;
use crate::flags::StoryFlags;
use crate::story::Story;

/// Range every stored stat must fall in.
pub const STAT_RANGE: RangeInclusive<i32> = 0..=999;

/// Everything needed to resume a playthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    /// The player's character.
    #[serde(flatten)]
    pub character: Character,
    /// Carried items.
    pub inventory: Inventory,
    /// Decisions made so far.
    pub flags: StoryFlags,
    /// Current scene id.
    pub scene: String,
}

impl SaveState {
    /// Fresh state for a new game: starting items, no flags, at `start`.
    pub fn new_game(character: Character, start: impl Into<String>) -> Self {
        let mut inventory = Inventory::new();
        inventory.add(catalog::small_potion(), 1);
        inventory.add(catalog::smoke_bomb(), 1);
        inventory.add(catalog::battle_tonic(), 1);
        Self {
            character,
            inventory,
            flags: StoryFlags::new(),
            scene: start.into(),
        }
    }

    /// Check the invariants a loaded state must satisfy.
    pub fn validate(&self, story: &Story) -> Result<(), String> {
        let hp = &self.character.hp;
        if hp.max <= 0 {
            return Err(format!("max_hp must be positive, found {}", hp.max));
        }
        if hp.current < 0 || hp.current > hp.max {
            return Err(format!("hp {} is outside 0..={}", hp.current, hp.max));
        }
        for stat in [Stat::Attack, Stat::Defense, Stat::Agility, Stat::Magic] {
            let value = self.character.stats.get(stat);
            if !STAT_RANGE.contains(&value) {
                return Err(format!(
                    "{stat} {value} is outside {}..={}",
                    STAT_RANGE.start(),
                    STAT_RANGE.end()
                ));
            }
        }
        if roster::find(&self.character.template).is_none() {
            return Err(format!(
                "unknown character template '{}'",
                self.character.template
            ));
        }
        if let Some(slot) = self.inventory.iter().find(|s| s.quantity == 0) {
            return Err(format!("item '{}' has quantity 0", slot.item.name));
        }
        let scene = story
            .scene(&self.scene)
            .map_err(|_| format!("unknown scene '{}'", self.scene))?;
        if hp.current == 0 && !scene.is_ending() {
            return Err(format!("character has 0 hp in scene '{}'", self.scene));
        }
        Ok(())
    }

    /// Encode as the on-disk JSON text.
    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(test)]
    pub(crate) fn sample() -> Self {
        let template = roster::find("sans").expect("sans is in the roster");
        let character = Character::from_template(template, &au_mechanics::CombatRules::default());
        Self::new_game(character, "start")
    }
}

/// The save file on disk.
#[derive(Debug, Clone)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    /// Default file name, relative to the working directory.
    pub const DEFAULT_PATH: &'static str = "savegame.json";

    /// A save file at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the file lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a file exists at the path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the state, replacing any previous save.
    pub fn save(&self, state: &SaveState) -> Result<(), SaveError> {
        let json = state.to_json()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }
        std::fs::write(&self.path, json).map_err(|source| self.io_error(source))?;
        tracing::info!(path = %self.path.display(), scene = %state.scene, "game saved");
        Ok(())
    }

    /// Read the state back, checking it against the story.
    pub fn load(&self, story: &Story) -> Result<SaveState, SaveError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SaveError::NotFound(self.path.clone()));
            }
            Err(source) => return Err(self.io_error(source)),
        };
        let state = Self::parse(&text).map_err(|reason| self.corrupt(reason))?;
        state.validate(story).map_err(|reason| self.corrupt(reason))?;
        tracing::info!(path = %self.path.display(), scene = %state.scene, "game loaded");
        Ok(state)
    }

    /// Parse save text without checking it against a story.
    pub fn parse(text: &str) -> Result<SaveState, String> {
        serde_json::from_str(text).map_err(|e| e.to_string())
    }

    fn io_error(&self, source: std::io::Error) -> SaveError {
        SaveError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn corrupt(&self, reason: String) -> SaveError {
        SaveError::Corrupt {
            path: self.path.clone(),
            reason,
        }
    }
}

impl Default for SaveFile {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}
