//! Requirements attached to story choices.

use au_mechanics::Inventory;

use crate::flags::{FlagValue, StoryFlags};

/// A condition evaluated against the player's flags and inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Condition {
    /// A flag is set.
    HasFlag {
        /// Flag key.
        key: String,
    },
    /// A flag holds a specific value.
    FlagEquals {
        /// Flag key.
        key: String,
        /// Expected value.
        value: FlagValue,
    },
    /// An item is carried.
    HasItem {
        /// Item name.
        item: String,
    },
    /// Logical NOT.
    Not(Box<Condition>),
    /// Logical AND.
    And(Vec<Condition>),
    /// Logical OR.
    Or(Vec<Condition>),
    /// Always true.
    #[default]
    Always,
}

impl Condition {
    /// Shorthand for [`Condition::HasFlag`].
    pub fn flag(key: impl Into<String>) -> Self {
        Self::HasFlag { key: key.into() }
    }

    /// Shorthand for [`Condition::HasItem`].
    pub fn item(item: impl Into<String>) -> Self {
        Self::HasItem { item: item.into() }
    }

    /// Evaluate the condition.
    pub fn evaluate(&self, flags: &StoryFlags, inventory: &Inventory) -> bool {
        match self {
            Condition::HasFlag { key } => flags.is_set(key),
            Condition::FlagEquals { key, value } => flags.get(key).is_some_and(|v| v == value),
            Condition::HasItem { item } => inventory.contains(item),
            Condition::Not(inner) => !inner.evaluate(flags, inventory),
            Condition::And(conditions) => conditions.iter().all(|c| c.evaluate(flags, inventory)),
            Condition::Or(conditions) => conditions.iter().any(|c| c.evaluate(flags, inventory)),
            Condition::Always => true,
        }
    }
}
