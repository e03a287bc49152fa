//! Hit checks and damage formulas.
//!
//! Everything here is a pure function of its inputs plus, for hit checks, a
//! die roll. The [`Encounter`](super::Encounter) decides who rolls what.

use rand::rngs::StdRng;

use crate::bestiary::{Move, MoveKind};
use crate::rules::CombatRules;
use crate::stats::Stats;

/// The result of a single to-hit roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitCheck {
    /// Natural die result.
    pub roll: u32,
    /// Bonus added to the roll (stat bonus minus penalties).
    pub bonus: i32,
    /// Number the total must meet or beat.
    pub target: i32,
}

impl HitCheck {
    /// Roll plus bonus.
    pub fn total(&self) -> i32 {
        (self.roll as i32).saturating_add(self.bonus)
    }

    /// Whether the check landed.
    pub fn is_hit(&self) -> bool {
        self.total() >= self.target
    }
}

/// Roll to hit.
///
/// `accuracy` is the attacker's agility (or magic, for spells); the target is
/// `base_target` plus the defender's agility bonus.
pub fn roll_to_hit(
    rules: &CombatRules,
    accuracy: i32,
    penalty: i32,
    base_target: i32,
    defender_agility: i32,
    rng: &mut StdRng,
) -> HitCheck {
    HitCheck {
        roll: rules.hit_die.roll(rng),
        bonus: rules.stat_bonus(accuracy).saturating_sub(penalty),
        target: base_target.saturating_add(rules.stat_bonus(defender_agility)),
    }
}

/// Weapon damage: attack plus spread minus defense, never below the minimum.
pub fn physical_damage(rules: &CombatRules, attack: i32, defense: i32, spread: i32) -> i32 {
    attack
        .saturating_add(spread)
        .saturating_sub(defense)
        .max(rules.min_damage)
}

/// Spell damage: only part of the defense applies.
pub fn magic_damage(rules: &CombatRules, magic: i32, defense: i32, spread: i32) -> i32 {
    magic
        .saturating_add(spread)
        .saturating_sub(magic_defense(rules, defense))
        .max(rules.min_damage)
}

/// Damage dealt by an enemy move against the given defense.
///
/// Debuff moves deal no damage.
pub fn enemy_move_damage(
    rules: &CombatRules,
    mv: &Move,
    stats: &Stats,
    defense: i32,
    spread: i32,
) -> i32 {
    match mv.kind {
        MoveKind::Physical => {
            let power = mv.base.saturating_add(scaled(stats.attack, rules.enemy_attack_factor));
            physical_damage(rules, power, defense, spread)
        }
        MoveKind::Magic => {
            let power = mv.base.saturating_add(scaled(stats.magic, rules.enemy_magic_factor));
            magic_damage(rules, power, defense, spread)
        }
        MoveKind::Drain => {
            mv.base
            .saturating_add(scaled(stats.magic, rules.drain_magic_factor))
            .max(rules.min_damage)
        }
        MoveKind::Debuff => 0,
    }
}

fn magic_defense(rules: &CombatRules, defense: i32) -> i32 {
    scaled(defense, rules.magic_defense_factor)
}

fn scaled(value: i32, factor: f64) -> i32 {
    (f64::from(value) * factor).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn mv(kind: MoveKind, base: i32) -> Move {
        Move {
            name: "Test",
            kind,
            base,
        }
    }

    #[test]
    fn physical_attack_minus_defense() {
        let rules = CombatRules::default();
        assert_eq!(physical_damage(&rules, 10, 4, 0), 6);
        assert_eq!(physical_damage(&rules, 10, 4, 2), 8);
    }

    #[test]
    fn physical_damage_has_floor() {
        let rules = CombatRules::default();
        assert_eq!(physical_damage(&rules, 3, 10, -3), 1);
        let rules = CombatRules {
            min_damage: 0,
            ..CombatRules::default()
        };
        assert_eq!(physical_damage(&rules, 3, 10, 0), 0);
    }

    #[test]
    fn magic_halves_defense() {
        let rules = CombatRules::default();
        // defense 5 -> 2 after the 0.5 factor
        assert_eq!(magic_damage(&rules, 9, 5, 0), 7);
        assert!(magic_damage(&rules, 9, 5, 0) > physical_damage(&rules, 9, 5, 0));
    }

    #[test]
    fn enemy_moves() {
        let rules = CombatRules::default();
        let stats = Stats::new(10, 0, 0, 12);
        // 8 + floor(10 * 0.3) - 2
        assert_eq!(enemy_move_damage(&rules, &mv(MoveKind::Physical, 8), &stats, 2, 0), 9);
        // 8 + floor(12 * 0.35) - floor(4 * 0.5)
        assert_eq!(enemy_move_damage(&rules, &mv(MoveKind::Magic, 8), &stats, 4, 0), 10);
        // 6 + floor(12 * 0.25), defense ignored
        assert_eq!(enemy_move_damage(&rules, &mv(MoveKind::Drain, 6), &stats, 50, 0), 9);
        assert_eq!(enemy_move_damage(&rules, &mv(MoveKind::Debuff, 0), &stats, 0, 0), 0);
    }

    #[test]
    fn extreme_values_saturate() {
        let rules = CombatRules::default();
        assert_eq!(physical_damage(&rules, i32::MAX, 0, 5), i32::MAX);
        assert_eq!(magic_damage(&rules, i32::MAX, 0, 5), i32::MAX);
        assert_eq!(physical_damage(&rules, i32::MIN, i32::MAX, 0), rules.min_damage);
        let stats = Stats::new(i32::MAX, 0, 0, i32::MAX);
        assert_eq!(
            enemy_move_damage(&rules, &mv(MoveKind::Drain, i32::MAX), &stats, 0, 0),
            i32::MAX
        );
        let check = HitCheck {
            roll: 20,
            bonus: i32::MAX,
            target: 8,
        };
        assert!(check.is_hit());
    }

    #[test]
    fn hit_check_math() {
        let check = HitCheck {
            roll: 7,
            bonus: 2,
            target: 9,
        };
        assert_eq!(check.total(), 9);
        assert!(check.is_hit());
        let miss = HitCheck { target: 10, ..check };
        assert!(!miss.is_hit());
    }

    #[test]
    fn roll_to_hit_applies_bonuses() {
        let rules = CombatRules::default();
        let mut rng = StdRng::seed_from_u64(1);
        let check = roll_to_hit(&rules, 10, 2, 8, 7, &mut rng);
        assert_eq!(check.bonus, 3);
        assert_eq!(check.target, 11);
        assert!((1..=20).contains(&check.roll));
    }
}
