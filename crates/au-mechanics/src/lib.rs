//! Rules engine for the AU text RPG.
//!
//! Provides character stats and hit points, stacked inventories, the
//! playable roster and enemy bestiary, tunable combat rules, and a
//! seeded turn-based combat resolver.

pub mod bestiary;
pub mod character;
pub mod combat;
pub mod dice;
pub mod error;
pub mod hp;
pub mod inventory;
pub mod item;
pub mod roster;
pub mod rules;
pub mod stats;
pub mod usage;

pub use bestiary::{Enemy, EnemyTemplate, Move, MoveKind};
pub use character::{Character, CharacterTemplate};
pub use combat::{CombatAction, CombatEvent, CombatOutcome, Encounter, TurnReport};
pub use dice::Die;
pub use error::{MechError, MechResult};
pub use hp::HitPoints;
pub use inventory::{Inventory, InventoryItem};
pub use item::{Item, ItemEffect};
pub use rules::CombatRules;
pub use stats::{Stat, Stats};
pub use usage::ItemUse;
