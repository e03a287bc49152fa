//! Combat actions, events, and outcomes.

use crate::usage::ItemUse;

/// An action the player can take on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    /// Weapon attack against the enemy's defense.
    Attack,
    /// Spell that ignores part of the enemy's defense.
    Magic,
    /// Use the item in a 0-based inventory slot.
    UseItem(usize),
    /// Spend the turn to empower the next attacks.
    Focus,
    /// Try to run away.
    Flee,
}

impl std::fmt::Display for CombatAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack => write!(f, "Attack"),
            Self::Magic => write!(f, "Magic"),
            Self::UseItem(index) => write!(f, "Use item #{}", index + 1),
            Self::Focus => write!(f, "Focus"),
            Self::Flee => write!(f, "Flee"),
        }
    }
}

/// How a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// The enemy was reduced to 0 HP.
    Victory,
    /// The player was reduced to 0 HP.
    Defeat,
    /// The player fled or escaped with an item.
    Retreat,
}

impl CombatOutcome {
    /// Lowercase tag used in logs and save flags.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Victory => "victory",
            Self::Defeat => "defeat",
            Self::Retreat => "retreat",
        }
    }
}

impl std::fmt::Display for CombatOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single thing that happened during a round.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    /// The player's attack or spell landed.
    PlayerHit {
        /// "Attack" or "Magic".
        technique: &'static str,
        /// Damage dealt.
        damage: i32,
    },
    /// The player's attack or spell missed.
    PlayerMiss {
        /// "Attack" or "Magic".
        technique: &'static str,
    },
    /// The player focused.
    Focused,
    /// The player used an item.
    Item(ItemUse),
    /// The player got away.
    Fled,
    /// The flee attempt failed.
    FleeFailed {
        /// True when the enemy was simply too fast to try.
        blocked: bool,
    },
    /// The enemy announced a move.
    EnemyMove {
        /// Enemy name.
        enemy: String,
        /// Move name.
        technique: &'static str,
    },
    /// An enemy move dealt damage.
    EnemyHit {
        /// Damage dealt.
        damage: i32,
    },
    /// An enemy drained the player.
    Drained {
        /// Damage dealt.
        damage: i32,
        /// HP the enemy recovered.
        healed: i32,
    },
    /// An enemy move left the player shaken.
    Shaken,
    /// The enemy's move missed.
    EnemyMiss {
        /// Enemy name.
        enemy: String,
    },
    /// The enemy had no moves to use.
    EnemyIdle {
        /// Enemy name.
        enemy: String,
    },
    /// The enemy fell.
    EnemyDefeated {
        /// Enemy name.
        enemy: String,
    },
    /// The player fell.
    PlayerDefeated,
    /// The enemy dropped something.
    Looted {
        /// Item name.
        item: String,
    },
}

impl std::fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlayerHit { technique, damage } => {
                write!(f, "Your {technique} hits for {damage} damage.")
            }
            Self::PlayerMiss { technique } => write!(f, "Your {technique} misses!"),
            Self::Focused => write!(f, "You focus, steadying your next strikes."),
            Self::Item(used) => write!(f, "{used}"),
            Self::Fled => write!(f, "You successfully fled the battle."),
            Self::FleeFailed { blocked: true } => {
                write!(f, "The enemy is far too quick. There is no getting away.")
            }
            Self::FleeFailed { blocked: false } => write!(f, "Flee attempt failed."),
            Self::EnemyMove { enemy, technique } => write!(f, "{enemy} uses {technique}!"),
            Self::EnemyHit { damage } => write!(f, "It hits you for {damage} damage."),
            Self::Drained { damage, healed } => write!(
                f,
                "It drains {damage} HP from you and recovers {healed} HP."
            ),
            Self::Shaken => write!(f, "You are shaken. Your aim will suffer."),
            Self::EnemyMiss { enemy } => write!(f, "{enemy}'s attack misses!"),
            Self::EnemyIdle { enemy } => write!(f, "{enemy} hesitates."),
            Self::EnemyDefeated { enemy } => write!(f, "You defeated {enemy}!"),
            Self::PlayerDefeated => write!(f, "You have been defeated..."),
            Self::Looted { item } => write!(f, "The enemy dropped a {item}."),
        }
    }
}

/// Everything that happened in one round.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Round number (1-based).
    pub round: u32,
    /// Events in the order they happened.
    pub events: Vec<CombatEvent>,
    /// Set when the round ended the fight.
    pub outcome: Option<CombatOutcome>,
}

impl TurnReport {
    /// Narration, one line per event.
    pub fn narration(&self) -> String {
        self.events
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_display() {
        assert_eq!(CombatAction::UseItem(0).to_string(), "Use item #1");
        assert_eq!(CombatAction::Flee.to_string(), "Flee");
    }

    #[test]
    fn outcome_tags() {
        assert_eq!(CombatOutcome::Victory.tag(), "victory");
        assert_eq!(CombatOutcome::Retreat.to_string(), "retreat");
    }

    #[test]
    fn narration_joins_lines() {
        let report = TurnReport {
            round: 1,
            events: vec![
                CombatEvent::PlayerHit {
                    technique: "Attack",
                    damage: 6,
                },
                CombatEvent::EnemyMiss {
                    enemy: "Wolf Spirit".into(),
                },
            ],
            outcome: None,
        };
        assert_eq!(
            report.narration(),
            "Your Attack hits for 6 damage.\nWolf Spirit's attack misses!"
        );
    }
}
