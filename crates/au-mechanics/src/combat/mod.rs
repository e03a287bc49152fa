//! Turn-based fights between the player and a single enemy.
//!
//! Each call to [`Encounter::take_turn`] resolves one round: the player's
//! action, then (if the fight is still on) the enemy's move, then status
//! decay. Invalid player input is rejected before any state changes.

pub mod action;
pub mod resolve;
pub mod status;

pub use action::{CombatAction, CombatEvent, CombatOutcome, TurnReport};
pub use status::StatusEffects;

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::bestiary::{Enemy, MoveKind};
use crate::character::Character;
use crate::dice::roll_spread;
use crate::error::{MechError, MechResult};
use crate::inventory::Inventory;
use crate::item::{Item, ItemEffect};
use crate::rules::CombatRules;
use crate::stats::Stat;
use crate::usage::{self, ItemUse};

/// An ongoing fight.
#[derive(Debug, Clone)]
pub struct Encounter {
    /// The opponent.
    pub enemy: Enemy,
    /// Statuses on the player.
    pub status: StatusEffects,
    round: u32,
    outcome: Option<CombatOutcome>,
}

impl Encounter {
    /// Start a fight against the given enemy.
    pub fn new(enemy: Enemy) -> Self {
        tracing::debug!(enemy = %enemy.name, hp = enemy.hp.max, "encounter started");
        Self {
            enemy,
            status: StatusEffects::new(),
            round: 0,
            outcome: None,
        }
    }

    /// Rounds resolved so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// How the fight ended, if it has.
    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    /// Whether the fight has ended.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Resolve one round.
    pub fn take_turn(
        &mut self,
        player: &mut Character,
        inventory: &mut Inventory,
        action: CombatAction,
        rules: &CombatRules,
        rng: &mut StdRng,
    ) -> MechResult<TurnReport> {
        if self.is_over() {
            return Err(MechError::CombatOver);
        }
        if let CombatAction::UseItem(index) = action {
            usage::check_usable(&inventory.get(index)?.item, true)?;
        }

        self.round += 1;
        let mut events = Vec::new();
        let mut outcome = self.player_turn(player, inventory, action, rules, rng, &mut events)?;

        if outcome.is_none() {
            if self.enemy.is_alive() {
                self.enemy_turn(player, rules, rng, &mut events);
                if !player.is_alive() {
                    events.push(CombatEvent::PlayerDefeated);
                    outcome = Some(CombatOutcome::Defeat);
                }
            } else {
                events.push(CombatEvent::EnemyDefeated {
                    enemy: self.enemy.name.clone(),
                });
                if let Some(item) = self.roll_loot(rng) {
                    events.push(CombatEvent::Looted {
                        item: item.name.clone(),
                    });
                    inventory.add(item, 1);
                }
                outcome = Some(CombatOutcome::Victory);
            }
        }
        self.status.decay();

        tracing::debug!(
            round = self.round,
            %action,
            player_hp = player.hp.current,
            enemy_hp = self.enemy.hp.current,
            "combat round resolved"
        );
        if let Some(done) = outcome {
            tracing::info!(enemy = %self.enemy.name, outcome = %done, rounds = self.round, "encounter ended");
        }

        self.outcome = outcome;
        Ok(TurnReport {
            round: self.round,
            events,
            outcome,
        })
    }

    fn player_turn(
        &mut self,
        player: &mut Character,
        inventory: &mut Inventory,
        action: CombatAction,
        rules: &CombatRules,
        rng: &mut StdRng,
        events: &mut Vec<CombatEvent>,
    ) -> MechResult<Option<CombatOutcome>> {
        let penalty = if self.status.is_shaken() {
            rules.shaken_penalty
        } else {
            0
        };
        let focus = if self.status.is_focused() {
            rules.focus_bonus
        } else {
            0
        };
        match action {
            CombatAction::Attack => {
                let agility = self.effective(player, Stat::Agility);
                let check = resolve::roll_to_hit(
                    rules,
                    agility,
                    penalty,
                    rules.physical_hit_target,
                    self.enemy.stats.agility,
                    rng,
                );
                if check.is_hit() {
                    let spread = roll_spread(rules.physical_variance, rng);
                    let attack = self.effective(player, Stat::Attack).saturating_add(focus);
                    let damage =
                        resolve::physical_damage(rules, attack, self.enemy.stats.defense, spread);
                    self.enemy.hp.damage(damage);
                    events.push(CombatEvent::PlayerHit {
                        technique: "Attack",
                        damage,
                    });
                } else {
                    events.push(CombatEvent::PlayerMiss {
                        technique: "Attack",
                    });
                }
            }
            CombatAction::Magic => {
                let magic = self.effective(player, Stat::Magic);
                let check = resolve::roll_to_hit(
                    rules,
                    magic,
                    penalty,
                    rules.magic_hit_target,
                    self.enemy.stats.agility,
                    rng,
                );
                if check.is_hit() {
                    let spread = roll_spread(rules.magic_variance, rng);
                    let damage = resolve::magic_damage(
                        rules,
                        magic.saturating_add(focus),
                        self.enemy.stats.defense,
                        spread,
                    );
                    self.enemy.hp.damage(damage);
                    events.push(CombatEvent::PlayerHit {
                        technique: "Magic",
                        damage,
                    });
                } else {
                    events.push(CombatEvent::PlayerMiss { technique: "Magic" });
                }
            }
            CombatAction::Focus => {
                self.status.focus(rules.focus_turns);
                events.push(CombatEvent::Focused);
            }
            CombatAction::Flee => {
                let agility = self.effective(player, Stat::Agility);
                match rules.flee_chance(agility, self.enemy.stats.agility) {
                    Some(chance) if rng.random_bool(chance) => {
                        events.push(CombatEvent::Fled);
                        return Ok(Some(CombatOutcome::Retreat));
                    }
                    Some(_) => events.push(CombatEvent::FleeFailed { blocked: false }),
                    None => events.push(CombatEvent::FleeFailed { blocked: true }),
                }
            }
            CombatAction::UseItem(index) => {
                let item = inventory.consume(index)?;
                tracing::debug!(item = %item.name, "item used in combat");
                match item.effect {
                    ItemEffect::Escape => {
                        events.push(CombatEvent::Item(ItemUse::Escaped { item: item.name }));
                        return Ok(Some(CombatOutcome::Retreat));
                    }
                    ItemEffect::Buff {
                        stat,
                        amount,
                        turns,
                    } => {
                        self.status.add_buff(stat, amount, turns);
                        events.push(CombatEvent::Item(ItemUse::Buffed {
                            item: item.name,
                            stat,
                            amount,
                            turns,
                        }));
                    }
                    _ => {
                        if let Some(used) = usage::apply_to_character(player, &item) {
                            events.push(CombatEvent::Item(used));
                        }
                    }
                }
            }
        }
        Ok(None)
    }

    fn enemy_turn(
        &mut self,
        player: &mut Character,
        rules: &CombatRules,
        rng: &mut StdRng,
        events: &mut Vec<CombatEvent>,
    ) {
        let Some(mv) = self.enemy.moves.choose(rng).copied() else {
            events.push(CombatEvent::EnemyIdle {
                enemy: self.enemy.name.clone(),
            });
            return;
        };
        events.push(CombatEvent::EnemyMove {
            enemy: self.enemy.name.clone(),
            technique: mv.name,
        });

        let check = resolve::roll_to_hit(
            rules,
            self.enemy.stats.agility,
            0,
            rules.enemy_hit_target,
            self.effective(player, Stat::Agility),
            rng,
        );
        if !check.is_hit() {
            events.push(CombatEvent::EnemyMiss {
                enemy: self.enemy.name.clone(),
            });
            return;
        }

        let defense = self.effective(player, Stat::Defense);
        match mv.kind {
            MoveKind::Physical | MoveKind::Magic => {
                let spread = roll_spread(rules.enemy_variance, rng);
                let damage =
                    resolve::enemy_move_damage(rules, &mv, &self.enemy.stats, defense, spread);
                let damage = player.hp.damage(damage);
                events.push(CombatEvent::EnemyHit { damage });
            }
            MoveKind::Drain => {
                let damage = resolve::enemy_move_damage(rules, &mv, &self.enemy.stats, defense, 0);
                let damage = player.hp.damage(damage);
                let healed = self.enemy.hp.heal(damage / 2);
                events.push(CombatEvent::Drained { damage, healed });
            }
            MoveKind::Debuff => {
                self.status.shake(rules.shaken_turns);
                events.push(CombatEvent::Shaken);
            }
        }
    }

    fn effective(&self, player: &Character, stat: Stat) -> i32 {
        player.stats.get(stat).saturating_add(self.status.bonus(stat))
    }

    fn roll_loot(&self, rng: &mut StdRng) -> Option<Item> {
        let loot = self.enemy.loot?;
        if rng.random_bool(loot.chance.clamp(0.0, 1.0)) {
            Some((loot.item)())
        } else {
            None
        }
    }
}
