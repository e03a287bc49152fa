//! Branching story runner for the AU text RPG.
//!
//! Provides the scene graph with conditional choices, append-only story
//! flags, the single-slot JSON save file, the built-in story content, and
//! the interactive play session that ties them to the combat engine.

pub mod choice;
pub mod config;
pub mod content;
pub mod error;
pub mod flags;
pub mod save;
pub mod scene;
pub mod session;
pub mod story;

pub use choice::{Choice, Condition, Effect, Transition};
pub use config::GameConfig;
pub use error::{SaveError, StoryError, StoryResult};
pub use flags::{FlagValue, StoryFlags};
pub use save::{SaveFile, SaveState};
pub use scene::Scene;
pub use session::{GameSession, Phase};
pub use story::Story;
