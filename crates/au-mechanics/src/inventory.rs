//! Stacked item storage.
//!
//! Items stack by name. Slots are addressed 1-based in the UI and 0-based
//! here; a stack disappears when its quantity reaches zero.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::item::Item;

/// A stack of identical items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// The stacked item.
    #[serde(flatten)]
    pub item: Item,
    /// How many are held (always at least 1 while stored).
    pub quantity: u32,
}

/// The player's carried items in pickup order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    slots: Vec<InventoryItem>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of an item, stacking onto an existing entry with the same name.
    pub fn add(&mut self, item: Item, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.slots.iter_mut().find(|s| s.item.name == item.name) {
            Some(slot) => slot.quantity = slot.quantity.saturating_add(quantity),
            None => self.slots.push(InventoryItem { item, quantity }),
        }
    }

    /// Get a slot by 0-based index.
    pub fn get(&self, index: usize) -> MechResult<&InventoryItem> {
        self.slots.get(index).ok_or(MechError::NoSuchItem(index + 1))
    }

    /// Remove one unit from a slot and return a copy of the item.
    ///
    /// The slot is dropped when its quantity reaches zero.
    pub fn consume(&mut self, index: usize) -> MechResult<Item> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(MechError::NoSuchItem(index + 1))?;
        slot.quantity = slot.quantity.saturating_sub(1);
        let item = slot.item.clone();
        if slot.quantity == 0 {
            self.slots.remove(index);
        }
        Ok(item)
    }

    /// Find the slot index of an item by name (case-insensitive).
    pub fn position(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.item.name.eq_ignore_ascii_case(name))
    }

    /// Returns true if at least one unit of the named item is held.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Iterate over all stacks.
    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.slots.iter()
    }

    /// Number of stacks.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the inventory is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Numbered listing, one stack per line.
    pub fn listing(&self) -> String {
        if self.is_empty() {
            return "Inventory is empty.".to_string();
        }
        let mut out = String::from("-- Inventory --\n");
        for (i, slot) in self.slots.iter().enumerate() {
            out.push_str(&format!("{}. {}", i + 1, slot.item));
            if slot.quantity > 1 {
                out.push_str(&format!(" (x{})", slot.quantity));
            }
            out.push('\n');
        }
        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::catalog;

    fn held(inv: &Inventory, name: &str) -> u32 {
        inv.position(name).map_or(0, |i| inv.get(i).unwrap().quantity)
    }

    #[test]
    fn empty_inventory() {
        let inv = Inventory::new();
        assert!(inv.is_empty());
        assert_eq!(inv.listing(), "Inventory is empty.");
    }

    #[test]
    fn add_stacks_by_name() {
        let mut inv = Inventory::new();
        inv.add(catalog::small_potion(), 1);
        inv.add(catalog::smoke_bomb(), 1);
        inv.add(catalog::small_potion(), 2);
        assert_eq!(inv.len(), 2);
        assert_eq!(held(&inv, "small potion"), 3);
    }

    #[test]
    fn add_zero_is_noop() {
        let mut inv = Inventory::new();
        inv.add(catalog::small_potion(), 0);
        assert!(inv.is_empty());
    }

    #[test]
    fn consume_removes_empty_stacks() {
        let mut inv = Inventory::new();
        inv.add(catalog::small_potion(), 2);
        inv.add(catalog::smoke_bomb(), 1);

        let item = inv.consume(0).unwrap();
        assert_eq!(item.name, "Small Potion");
        assert_eq!(held(&inv, "Small Potion"), 1);

        inv.consume(0).unwrap();
        assert!(!inv.contains("Small Potion"));
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.get(0).unwrap().item.name, "Smoke Bomb");
    }

    #[test]
    fn consume_bad_index() {
        let mut inv = Inventory::new();
        let err = inv.consume(3).unwrap_err();
        assert_eq!(err.to_string(), "no item in slot 4");
    }

    #[test]
    fn listing_shows_quantities() {
        let mut inv = Inventory::new();
        inv.add(catalog::small_potion(), 2);
        inv.add(catalog::hidden_map(), 1);
        let text = inv.listing();
        assert!(text.contains("1. Small Potion - Heals 25 HP. (x2)"));
        assert!(text.contains("2. Hidden Map"));
        assert!(!text.contains("(x1)"));
    }

    #[test]
    fn serializes_as_flat_list() {
        let mut inv = Inventory::new();
        inv.add(catalog::small_potion(), 2);
        let json = serde_json::to_value(&inv).unwrap();
        assert_eq!(json[0]["name"], "Small Potion");
        assert_eq!(json[0]["quantity"], 2);
        assert_eq!(json[0]["kind"], "heal");

        let back: Inventory = serde_json::from_value(json).unwrap();
        assert_eq!(back, inv);
    }
}
