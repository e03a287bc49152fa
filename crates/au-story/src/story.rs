//! The scene graph and its defeat routing.

use std::collections::BTreeMap;

use au_mechanics::{Inventory, bestiary};

use crate::choice::{Condition, Transition};
use crate::error::{StoryError, StoryResult};
use crate::flags::StoryFlags;
use crate::scene::Scene;

/// Where the story goes when the player loses a fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefeatRoute {
    /// Must hold for this route to be taken.
    pub when: Condition,
    /// Ending scene id.
    pub ending: String,
    /// Extra line shown before the ending.
    pub narration: Option<String>,
}

/// A complete story: scenes plus the rules for losing.
#[derive(Debug, Clone)]
pub struct Story {
    start: String,
    scenes: BTreeMap<String, Scene>,
    defeat_routes: Vec<DefeatRoute>,
    defeat_fallback: String,
}

impl Story {
    /// Create an empty story that begins at `start` and falls back to
    /// `defeat_fallback` when no defeat route matches.
    pub fn new(start: impl Into<String>, defeat_fallback: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            scenes: BTreeMap::new(),
            defeat_routes: Vec::new(),
            defeat_fallback: defeat_fallback.into(),
        }
    }

    /// Add a scene, replacing any scene with the same id.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scenes.insert(scene.id.clone(), scene);
        self
    }

    /// Add a defeat route. Routes are tried in the order they were added.
    pub fn with_defeat_route(
        mut self,
        when: Condition,
        ending: impl Into<String>,
        narration: Option<&str>,
    ) -> Self {
        self.defeat_routes.push(DefeatRoute {
            when,
            ending: ending.into(),
            narration: narration.map(str::to_string),
        });
        self
    }

    /// The opening scene id.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Look up a scene.
    pub fn scene(&self, id: &str) -> StoryResult<&Scene> {
        self.scenes
            .get(id)
            .ok_or_else(|| StoryError::SceneNotFound(id.to_string()))
    }

    /// Whether a scene id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    /// All scenes in id order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    /// Pick the ending for a lost fight: the first matching route, or the fallback.
    pub fn defeat_ending(&self, flags: &StoryFlags, inventory: &Inventory) -> (&str, Option<&str>) {
        self.defeat_routes
            .iter()
            .find(|r| r.when.evaluate(flags, inventory))
            .map(|r| (r.ending.as_str(), r.narration.as_deref()))
            .unwrap_or((self.defeat_fallback.as_str(), None))
    }

    /// Check that every reference in the graph resolves.
    pub fn validate(&self) -> StoryResult<()> {
        let mut problems = Vec::new();
        if !self.contains(&self.start) {
            problems.push(format!("start scene '{}' is missing", self.start));
        }
        for scene in self.scenes.values() {
            for (i, choice) in scene.choices.iter().enumerate() {
                for target in choice.targets() {
                    if !self.contains(target) {
                        problems.push(format!(
                            "{} choice {} leads to missing scene '{target}'",
                            scene.id,
                            i + 1
                        ));
                    }
                }
                if let Transition::Fight { enemy, .. } = &choice.transition {
                    if bestiary::find(enemy).is_none() {
                        problems.push(format!(
                            "{} choice {} fights unknown enemy '{enemy}'",
                            scene.id,
                            i + 1
                        ));
                    }
                }
            }
        }
        let endings = self
            .defeat_routes
            .iter()
            .map(|r| r.ending.as_str())
            .chain(std::iter::once(self.defeat_fallback.as_str()));
        for ending in endings {
            match self.scenes.get(ending) {
                Some(scene) if scene.is_ending() => {}
                Some(_) => problems.push(format!("defeat route '{ending}' is not an ending")),
                None => problems.push(format!("defeat route '{ending}' is missing")),
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(StoryError::InvalidStory(problems.join("; ")))
        }
    }
}
