//! Scenes: a title, a description, and the numbered choices on offer.

use crate::choice::Choice;

/// A unit of narrative content.
///
/// A scene with no choices is an ending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// Stable id stored in save files.
    pub id: String,
    /// Heading shown above the description.
    pub title: String,
    /// Narrative text.
    pub description: String,
    /// Options in menu order.
    pub choices: Vec<Choice>,
}

impl Scene {
    /// Create a scene with no choices yet.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            choices: Vec::new(),
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Whether this scene ends the story.
    pub fn is_ending(&self) -> bool {
        self.choices.is_empty()
    }

    /// Get a choice by its 1-based menu number.
    pub fn choice(&self, number: usize) -> Option<&Choice> {
        number.checked_sub(1).and_then(|i| self.choices.get(i))
    }

    /// Heading, description, and numbered choices.
    pub fn render(&self) -> String {
        if self.is_ending() {
            return format!("*** ENDING: {} ***\n{}", self.title, self.description);
        }
        let mut out = format!("== {} ==\n{}\n", self.title, self.description);
        for (i, choice) in self.choices.iter().enumerate() {
            out.push_str(&format!("\n{}. {}", i + 1, choice.text));
        }
        out
    }
}
