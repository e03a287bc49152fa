//! Using items from the inventory.
//!
//! Validation always happens before the slot is consumed, so a refused item
//! leaves both the character and the inventory untouched.

use crate::character::Character;
use crate::error::{MechError, MechResult};
use crate::inventory::Inventory;
use crate::item::{Item, ItemEffect};
use crate::stats::Stat;

/// What using an item did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemUse {
    /// Hit points were restored.
    Healed {
        /// Item name.
        item: String,
        /// HP before.
        from: i32,
        /// HP after.
        to: i32,
    },
    /// A stat was raised for the rest of the fight.
    Buffed {
        /// Item name.
        item: String,
        /// Stat raised.
        stat: Stat,
        /// Amount added.
        amount: i32,
        /// Rounds the buff lasts.
        turns: u32,
    },
    /// A stat was raised for good.
    Upgraded {
        /// Item name.
        item: String,
        /// Stat raised.
        stat: Stat,
        /// Amount added.
        amount: i32,
    },
    /// The fight was abandoned.
    Escaped {
        /// Item name.
        item: String,
    },
}

impl std::fmt::Display for ItemUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healed { item, from, to } => write!(f, "You used {item}: HP {from} -> {to}."),
            Self::Buffed {
                item,
                stat,
                amount,
                turns,
            } => write!(
                f,
                "You used {item}: {stat} {amount:+} for {turns} rounds."
            ),
            Self::Upgraded { item, stat, amount } => write!(
                f,
                "You used {item}: {stat} permanently increased by {amount}."
            ),
            Self::Escaped { item } => {
                write!(f, "You used {item} and slipped away from the fight.")
            }
        }
    }
}

/// Refuse items whose effect does not fit the situation.
pub fn check_usable(item: &Item, in_combat: bool) -> MechResult<()> {
    let usable = if in_combat {
        item.effect.usable_in_combat()
    } else {
        item.effect.usable_outside_combat()
    };
    if usable {
        return Ok(());
    }
    let reason = match (&item.effect, in_combat) {
        (ItemEffect::Keepsake, _) => "at all",
        (_, false) => "outside of combat",
        (_, true) => "in combat",
    };
    Err(MechError::ItemNotUsable {
        item: item.name.clone(),
        reason: reason.to_string(),
    })
}

/// Apply an effect that only touches the character (heal or upgrade).
///
/// Returns `None` for effects that need a fight to mean anything.
pub(crate) fn apply_to_character(character: &mut Character, item: &Item) -> Option<ItemUse> {
    match item.effect {
        ItemEffect::Heal { amount } => {
            let from = character.hp.current;
            character.heal(amount);
            Some(ItemUse::Healed {
                item: item.name.clone(),
                from,
                to: character.hp.current,
            })
        }
        ItemEffect::PermanentUpgrade { stat, amount } => {
            character.apply_upgrade(stat, amount);
            Some(ItemUse::Upgraded {
                item: item.name.clone(),
                stat,
                amount,
            })
        }
        ItemEffect::Buff { .. } | ItemEffect::Escape | ItemEffect::Keepsake => None,
    }
}

/// Use the item in a 0-based slot while exploring.
pub fn use_out_of_combat(
    character: &mut Character,
    inventory: &mut Inventory,
    index: usize,
) -> MechResult<ItemUse> {
    check_usable(&inventory.get(index)?.item, false)?;
    let item = inventory.consume(index)?;
    let used = apply_to_character(character, &item).ok_or_else(|| MechError::ItemNotUsable {
        item: item.name.clone(),
        reason: "outside of combat".to_string(),
    })?;
    tracing::debug!(item = %item.name, "item used outside combat");
    Ok(used)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hp::HitPoints;
    use crate::item::catalog;
    use crate::roster;
    use crate::rules::CombatRules;

    fn hero() -> Character {
        Character::from_template(roster::find("sans").unwrap(), &CombatRules::default())
    }

    #[test]
    fn potion_heals_and_is_consumed() {
        let mut c = hero();
        c.hp = HitPoints::with_current(10, 20);
        let mut inv = Inventory::new();
        inv.add(catalog::small_potion(), 2);
        let used = use_out_of_combat(&mut c, &mut inv, 0).unwrap();
        assert_eq!(
            used,
            ItemUse::Healed {
                item: "Small Potion".into(),
                from: 10,
                to: 20
            }
        );
        assert_eq!(inv.get(0).unwrap().quantity, 1);
    }

    #[test]
    fn upgrade_outside_combat() {
        let mut c = hero();
        let mut inv = Inventory::new();
        inv.add(catalog::tarnished_amulet(), 1);
        let before = c.stats.magic;
        use_out_of_combat(&mut c, &mut inv, 0).unwrap();
        assert_eq!(c.stats.magic, before + 2);
        assert!(inv.is_empty());
    }

    #[test]
    fn smoke_bomb_refused_outside_combat() {
        let mut c = hero();
        let mut inv = Inventory::new();
        inv.add(catalog::smoke_bomb(), 1);
        let err = use_out_of_combat(&mut c, &mut inv, 0).unwrap_err();
        assert!(err.to_string().contains("outside of combat"));
        assert_eq!(inv.get(0).unwrap().quantity, 1);
    }

    #[test]
    fn keepsake_is_never_usable() {
        let item = catalog::hidden_map();
        let err = check_usable(&item, true).unwrap_err();
        assert_eq!(err.to_string(), "Hidden Map cannot be used at all");
    }

    #[test]
    fn missing_slot_is_an_error() {
        let mut c = hero();
        let mut inv = Inventory::new();
        let err = use_out_of_combat(&mut c, &mut inv, 3).unwrap_err();
        assert_eq!(err.to_string(), "no item in slot 4");
    }
}
