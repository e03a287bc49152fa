//! Short-lived status effects that exist only during a fight.

use crate::stats::Stat;

/// A temporary stat bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buff {
    /// Stat raised.
    pub stat: Stat,
    /// Amount added.
    pub amount: i32,
    /// Rounds remaining, counting the current one.
    pub turns: u32,
}

/// Statuses carried by the player during an encounter.
///
/// Durations count down at the end of every round; a status applied with
/// two turns therefore covers the rest of this round and all of the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusEffects {
    focused: u32,
    shaken: u32,
    buffs: Vec<Buff>,
}

impl StatusEffects {
    /// Create an empty status set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Become focused for `turns` rounds. Reapplying refreshes the duration.
    pub fn focus(&mut self, turns: u32) {
        self.focused = self.focused.max(turns);
    }

    /// Become shaken for `turns` rounds. Reapplying refreshes the duration.
    pub fn shake(&mut self, turns: u32) {
        self.shaken = self.shaken.max(turns);
    }

    /// Add a temporary stat bonus.
    pub fn add_buff(&mut self, stat: Stat, amount: i32, turns: u32) {
        if turns > 0 {
            self.buffs.push(Buff {
                stat,
                amount,
                turns,
            });
        }
    }

    /// Whether focus is active.
    pub fn is_focused(&self) -> bool {
        self.focused > 0
    }

    /// Whether shaken is active.
    pub fn is_shaken(&self) -> bool {
        self.shaken > 0
    }

    /// Total active bonus for a stat.
    pub fn bonus(&self, stat: Stat) -> i32 {
        self.buffs
            .iter()
            .filter(|b| b.stat == stat)
            .fold(0i32, |total, b| total.saturating_add(b.amount))
    }

    /// Count every duration down by one round and drop expired effects.
    pub fn decay(&mut self) {
        self.focused = self.focused.saturating_sub(1);
        self.shaken = self.shaken.saturating_sub(1);
        for buff in &mut self.buffs {
            buff.turns = buff.turns.saturating_sub(1);
        }
        self.buffs.retain(|b| b.turns > 0);
    }

    /// Short labels for the active effects, e.g. `["focused", "+3 attack"]`.
    pub fn labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        if self.is_focused() {
            labels.push("focused".to_string());
        }
        if self.is_shaken() {
            labels.push("shaken".to_string());
        }
        for buff in &self.buffs {
            labels.push(format!("{:+} {}", buff.amount, buff.stat));
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_lasts_its_turns() {
        let mut s = StatusEffects::new();
        s.focus(2);
        assert!(s.is_focused());
        s.decay();
        assert!(s.is_focused());
        s.decay();
        assert!(!s.is_focused());
    }

    #[test]
    fn reapply_refreshes_not_stacks() {
        let mut s = StatusEffects::new();
        s.shake(2);
        s.decay();
        s.shake(2);
        s.decay();
        assert!(s.is_shaken());
    }

    #[test]
    fn buffs_sum_and_expire() {
        let mut s = StatusEffects::new();
        s.add_buff(Stat::Attack, 3, 1);
        s.add_buff(Stat::Attack, 2, 2);
        s.add_buff(Stat::Magic, 5, 2);
        assert_eq!(s.bonus(Stat::Attack), 5);
        s.decay();
        assert_eq!(s.bonus(Stat::Attack), 2);
        assert_eq!(s.bonus(Stat::Magic), 5);
        s.decay();
        assert_eq!(s.bonus(Stat::Attack), 0);
    }

    #[test]
    fn zero_turn_buff_is_ignored() {
        let mut s = StatusEffects::new();
        s.add_buff(Stat::Defense, 4, 0);
        assert_eq!(s.bonus(Stat::Defense), 0);
    }

    #[test]
    fn labels() {
        let mut s = StatusEffects::new();
        s.focus(1);
        s.add_buff(Stat::Attack, 3, 2);
        assert_eq!(s.labels(), vec!["focused".to_string(), "+3 attack".to_string()]);
    }
}
