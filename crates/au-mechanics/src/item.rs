//! Items and their effects.

use serde::{Deserialize, Serialize};

use crate::stats::Stat;

/// What happens when an item is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemEffect {
    /// Restore hit points, clamped to the maximum.
    Heal {
        /// Hit points restored.
        amount: i32,
    },
    /// Temporarily raise a stat for the rest of a fight.
    Buff {
        /// Stat raised.
        stat: Stat,
        /// Amount added.
        amount: i32,
        /// Rounds the buff lasts.
        turns: u32,
    },
    /// Leave a fight immediately.
    Escape,
    /// Permanently raise a stat.
    PermanentUpgrade {
        /// Stat raised.
        stat: Stat,
        /// Amount added.
        amount: i32,
    },
    /// A quest item with no usable effect (maps, tokens, trophies).
    Keepsake,
}

impl ItemEffect {
    /// Short lowercase label for the effect kind.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Heal { .. } => "heal",
            Self::Buff { .. } => "buff",
            Self::Escape => "escape",
            Self::PermanentUpgrade { .. } => "upgrade",
            Self::Keepsake => "keepsake",
        }
    }

    /// Whether the effect may be triggered during a fight.
    pub fn usable_in_combat(&self) -> bool {
        !matches!(self, Self::Keepsake)
    }

    /// Whether the effect may be triggered while exploring.
    pub fn usable_outside_combat(&self) -> bool {
        matches!(self, Self::Heal { .. } | Self::PermanentUpgrade { .. })
    }
}

/// An item the player can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name, also the stacking key in the inventory.
    pub name: String,
    /// Flavor text shown in listings.
    pub description: String,
    /// What using the item does.
    #[serde(flatten)]
    pub effect: ItemEffect,
}

impl Item {
    /// Create a new item.
    pub fn new(name: impl Into<String>, description: impl Into<String>, effect: ItemEffect) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            effect,
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}

/// The items that appear in the built-in game.
pub mod catalog {
    use super::{Item, ItemEffect};
    use crate::stats::Stat;

    /// Heals 25 HP. One of the two starting items.
    pub fn small_potion() -> Item {
        Item::new("Small Potion", "Heals 25 HP.", ItemEffect::Heal { amount: 25 })
    }

    /// Guaranteed escape from a fight. One of the two starting items.
    pub fn smoke_bomb() -> Item {
        Item::new("Smoke Bomb", "Escape from a fight.", ItemEffect::Escape)
    }

    /// A short-lived attack buff.
    pub fn battle_tonic() -> Item {
        Item::new(
            "Battle Tonic",
            "+3 attack for 3 rounds of a fight.",
            ItemEffect::Buff {
                stat: Stat::Attack,
                amount: 3,
                turns: 3,
            },
        )
    }

    /// Heals 30 HP.
    pub fn herbal_salve() -> Item {
        Item::new("Herbal Salve", "Heals 30 HP.", ItemEffect::Heal { amount: 30 })
    }

    /// Permanent +2 magic.
    pub fn tarnished_amulet() -> Item {
        Item::new(
            "Tarnished Amulet",
            "An old amulet. Grants +2 magic when used (permanent).",
            ItemEffect::PermanentUpgrade {
                stat: Stat::Magic,
                amount: 2,
            },
        )
    }

    /// Permanent +2 attack.
    pub fn rusty_blade() -> Item {
        Item::new(
            "Rusty Blade",
            "An old blade that grants +2 attack when used (permanent).",
            ItemEffect::PermanentUpgrade {
                stat: Stat::Attack,
                amount: 2,
            },
        )
    }

    /// Opens the secret route to the castle dungeons.
    pub fn hidden_map() -> Item {
        Item::new(
            "Hidden Map",
            "A map showing a secret entrance to the castle.",
            ItemEffect::Keepsake,
        )
    }

    /// Taken from the bandit chief.
    pub fn dungeon_map() -> Item {
        Item::new("Dungeon Map", "Marks a secret entrance.", ItemEffect::Keepsake)
    }

    /// Occasional spoil from a wolf spirit.
    pub fn wolf_pelt() -> Item {
        Item::new("Wolf Pelt", "A pelt of a spectral wolf.", ItemEffect::Keepsake)
    }
}
