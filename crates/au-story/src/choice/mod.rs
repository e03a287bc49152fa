//! Story choices: what the player may pick in a scene and what it does.

mod condition;
mod effect;

pub use condition::Condition;
pub use effect::Effect;

/// Where a choice leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Move to another scene.
    Goto(String),
    /// Start a fight.
    Fight {
        /// Bestiary key of the opponent.
        enemy: String,
        /// Scene entered after winning.
        victory: String,
        /// Scene entered after fleeing or escaping.
        retreat: String,
    },
}

/// A single numbered option in a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// The text shown to the player.
    pub text: String,
    /// Must hold for the choice to be taken.
    pub requires: Condition,
    /// Applied, in order, when the choice is taken.
    pub effects: Vec<Effect>,
    /// Where the choice leads.
    pub transition: Transition,
}

impl Choice {
    /// A choice that moves to another scene.
    pub fn goto(text: impl Into<String>, scene: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            requires: Condition::Always,
            effects: Vec::new(),
            transition: Transition::Goto(scene.into()),
        }
    }

    /// A choice that starts a fight.
    pub fn fight(
        text: impl Into<String>,
        enemy: impl Into<String>,
        victory: impl Into<String>,
        retreat: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            requires: Condition::Always,
            effects: Vec::new(),
            transition: Transition::Fight {
                enemy: enemy.into(),
                victory: victory.into(),
                retreat: retreat.into(),
            },
        }
    }

    /// Set the requirement.
    pub fn requires(mut self, condition: Condition) -> Self {
        self.requires = condition;
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Scene ids this choice can lead to.
    pub fn targets(&self) -> Vec<&str> {
        match &self.transition {
            Transition::Goto(scene) => vec![scene.as_str()],
            Transition::Fight {
                victory, retreat, ..
            } => vec![victory.as_str(), retreat.as_str()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let choice = Choice::goto("Rest", "camp")
            .requires(Condition::flag("tired"))
            .with_effect(Effect::Heal(10));
        assert_eq!(choice.requires, Condition::flag("tired"));
        assert_eq!(choice.effects, vec![Effect::Heal(10)]);
        assert_eq!(choice.targets(), vec!["camp"]);
    }

    #[test]
    fn fight_targets() {
        let choice = Choice::fight("Fight", "wolf_spirit", "won", "ran");
        assert_eq!(choice.targets(), vec!["won", "ran"]);
    }
}
