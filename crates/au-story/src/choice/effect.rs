//! Effects applied when a story choice is taken.

use au_mechanics::Item;

use crate::flags::FlagValue;
use crate::save::SaveState;

/// A state change caused by a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Record a flag.
    SetFlag {
        /// Flag key.
        key: String,
        /// Value to record.
        value: FlagValue,
    },
    /// Give one unit of an item.
    GiveItem(Item),
    /// Restore hit points.
    Heal(i32),
}

impl Effect {
    /// Shorthand for a boolean [`Effect::SetFlag`].
    pub fn flag(key: impl Into<String>) -> Self {
        Self::SetFlag {
            key: key.into(),
            value: FlagValue::Bool(true),
        }
    }

    /// Apply the effect, returning a line for the player if anything changed.
    pub fn apply(&self, state: &mut SaveState) -> Option<String> {
        match self {
            Effect::SetFlag { key, value } => state
                .flags
                .set(key.clone(), value.clone())
                .then(|| format!("(Flag gained: {key})")),
            Effect::GiveItem(item) => {
                state.inventory.add(item.clone(), 1);
                Some(format!("You obtained: {item}"))
            }
            Effect::Heal(amount) => {
                let restored = state.character.heal(*amount);
                Some(format!("You recovered {restored} HP by resting."))
            }
        }
    }
}
