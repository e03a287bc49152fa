//! Enemy templates and spawning.

use crate::hp::HitPoints;
use crate::item::{Item, catalog};
use crate::rules::CombatRules;
use crate::stats::Stats;

/// How an enemy move deals its effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Scales with attack, reduced by defense.
    Physical,
    /// Scales with magic, partially reduced by defense.
    Magic,
    /// Ignores defense and heals the user by half the damage dealt.
    Drain,
    /// No damage; leaves the target shaken.
    Debuff,
}

/// A move in an enemy's repertoire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Name announced when the move is used.
    pub name: &'static str,
    /// Effect family.
    pub kind: MoveKind,
    /// Flat damage before stat scaling.
    pub base: i32,
}

/// A possible drop on victory.
#[derive(Debug, Clone, Copy)]
pub struct Loot {
    /// Builds the dropped item.
    pub item: fn() -> Item,
    /// Probability of the drop (0.0 to 1.0).
    pub chance: f64,
}

/// A bestiary entry.
#[derive(Debug, Clone, Copy)]
pub struct EnemyTemplate {
    /// Stable key referenced by story content.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Listed HP before scaling to the player.
    pub hp: i32,
    /// Combat stats.
    pub stats: Stats,
    /// Moves chosen from at random each turn.
    pub moves: &'static [Move],
    /// Optional drop.
    pub loot: Option<Loot>,
}

/// Every enemy that can appear in the story.
pub static ENEMIES: [EnemyTemplate; 4] = [
    EnemyTemplate {
        key: "wolf_spirit",
        name: "Wolf Spirit",
        hp: 45,
        stats: Stats {
            attack: 8,
            defense: 2,
            agility: 9,
            magic: 5,
        },
        moves: &[
            Move {
                name: "Bite",
                kind: MoveKind::Physical,
                base: 8,
            },
            Move {
                name: "Howl",
                kind: MoveKind::Debuff,
                base: 0,
            },
        ],
        loot: Some(Loot {
            item: catalog::wolf_pelt,
            chance: 0.4,
        }),
    },
    EnemyTemplate {
        key: "bandit_chief",
        name: "Bandit Chief",
        hp: 70,
        stats: Stats {
            attack: 11,
            defense: 3,
            agility: 8,
            magic: 4,
        },
        moves: &[
            Move {
                name: "Slash",
                kind: MoveKind::Physical,
                base: 10,
            },
            Move {
                name: "Poison Dart",
                kind: MoveKind::Magic,
                base: 4,
            },
        ],
        loot: None,
    },
    EnemyTemplate {
        key: "nightmare_minion",
        name: "Nightmare Minion",
        hp: 90,
        stats: Stats {
            attack: 10,
            defense: 3,
            agility: 7,
            magic: 12,
        },
        moves: &[
            Move {
                name: "Claw",
                kind: MoveKind::Physical,
                base: 11,
            },
            Move {
                name: "Night Rasp",
                kind: MoveKind::Magic,
                base: 8,
            },
        ],
        loot: None,
    },
    EnemyTemplate {
        key: "throne_shadow",
        name: "Throne Shadow",
        hp: 140,
        stats: Stats {
            attack: 14,
            defense: 4,
            agility: 6,
            magic: 16,
        },
        moves: &[
            Move {
                name: "Shadow Strike",
                kind: MoveKind::Physical,
                base: 15,
            },
            Move {
                name: "Abyssal Judgement",
                kind: MoveKind::Magic,
                base: 14,
            },
            Move {
                name: "Drain",
                kind: MoveKind::Drain,
                base: 6,
            },
        ],
        loot: None,
    },
];

/// Stand-in for keys missing from the bestiary.
pub static FAINT_ECHO: EnemyTemplate = EnemyTemplate {
    key: "faint_echo",
    name: "Faint Echo",
    hp: 30,
    stats: Stats {
        attack: 5,
        defense: 1,
        agility: 5,
        magic: 5,
    },
    moves: &[Move {
        name: "Tap",
        kind: MoveKind::Physical,
        base: 4,
    }],
    loot: None,
};

/// Look up an enemy template by key.
pub fn find(key: &str) -> Option<&'static EnemyTemplate> {
    ENEMIES.iter().find(|e| e.key == key)
}

/// A spawned enemy.
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Display name.
    pub name: String,
    /// Current and maximum hit points.
    pub hp: HitPoints,
    /// Combat stats.
    pub stats: Stats,
    /// Moves chosen from at random each turn.
    pub moves: Vec<Move>,
    /// Optional drop.
    pub loot: Option<Loot>,
}

impl Enemy {
    /// Create an enemy directly, without a bestiary entry.
    pub fn new(name: impl Into<String>, max_hp: i32, stats: Stats, moves: Vec<Move>) -> Self {
        Self {
            name: name.into(),
            hp: HitPoints::new(max_hp),
            stats,
            moves,
            loot: None,
        }
    }

    /// Spawn an enemy from the bestiary, scaled to the player's power.
    ///
    /// Unknown keys spawn [`FAINT_ECHO`] without scaling.
    pub fn spawn(key: &str, player_power: i32, rules: &CombatRules) -> Self {
        let (template, max_hp) = match find(key) {
            Some(template) => (template, rules.scaled_enemy_hp(template.hp, player_power)),
            None => {
                tracing::warn!(key, "unknown enemy, spawning a faint echo");
                (&FAINT_ECHO, FAINT_ECHO.hp)
            }
        };
        Self {
            name: template.name.to_string(),
            hp: HitPoints::new(max_hp),
            stats: template.stats,
            moves: template.moves.to_vec(),
            loot: template.loot,
        }
    }

    /// Returns true while the enemy has hit points left.
    pub fn is_alive(&self) -> bool {
        self.hp.is_alive()
    }
}
