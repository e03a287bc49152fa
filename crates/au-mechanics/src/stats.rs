//! Combat statistics shared by player characters and enemies.

use serde::{Deserialize, Serialize};

/// One of the four combat statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    /// Physical power; drives weapon damage.
    Attack,
    /// Physical toughness; subtracted from incoming damage.
    Defense,
    /// Speed and footwork; drives hit chance, dodging, and fleeing.
    Agility,
    /// Arcane power; drives spell damage and spell accuracy.
    Magic,
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack => write!(f, "attack"),
            Self::Defense => write!(f, "defense"),
            Self::Agility => write!(f, "agility"),
            Self::Magic => write!(f, "magic"),
        }
    }
}

/// A block of combat statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Physical power.
    pub attack: i32,
    /// Physical toughness.
    pub defense: i32,
    /// Speed and footwork.
    pub agility: i32,
    /// Arcane power.
    pub magic: i32,
}

impl Stats {
    /// Create a stat block.
    pub fn new(attack: i32, defense: i32, agility: i32, magic: i32) -> Self {
        Self {
            attack,
            defense,
            agility,
            magic,
        }
    }

    /// Read a single stat.
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Agility => self.agility,
            Stat::Magic => self.magic,
        }
    }

    /// Add `delta` to a single stat.
    pub fn add(&mut self, stat: Stat, delta: i32) {
        let slot = match stat {
            Stat::Attack => &mut self.attack,
            Stat::Defense => &mut self.defense,
            Stat::Agility => &mut self.agility,
            Stat::Magic => &mut self.magic,
        };
        *slot = slot.saturating_add(delta);
    }

    /// Overall offensive power, used to scale enemies to the player.
    pub fn power(&self) -> i32 {
        self.attack
            .saturating_add(self.agility)
            .saturating_add(self.magic)
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ATK:{} DEF:{} AGI:{} MAG:{}",
            self.attack, self.defense, self.agility, self.magic
        )
    }
}
