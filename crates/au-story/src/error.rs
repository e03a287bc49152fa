//! Error types for the story engine and save files.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while playing through the story.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A menu selection that is not on offer.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// Input that matches no command in the current phase.
    #[error("unknown command: {input}{}", suggestion_suffix(.suggestion))]
    UnknownCommand {
        /// What the player typed.
        input: String,
        /// Closest known command, if any is close enough.
        suggestion: Option<String>,
    },

    /// The selected choice has a requirement the player does not meet.
    #[error("You do not have the required condition to take that action.")]
    ConditionNotMet,

    /// A scene id that the story does not define.
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// The command exists but not in the current phase.
    #[error("{0} is not available right now")]
    NotAvailable(String),

    /// A command that needs a game in progress was given without one.
    #[error("no game in progress")]
    NoGame,

    /// Input arrived after the session ended.
    #[error("the game has ended")]
    Finished,

    /// The story graph references something that does not exist.
    #[error("invalid story: {0}")]
    InvalidStory(String),

    /// Rules engine error.
    #[error("{0}")]
    Mechanics(#[from] au_mechanics::MechError),

    /// Save file error.
    #[error("{0}")]
    Save(#[from] SaveError),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

/// Errors from reading or writing the save file.
#[derive(Debug, Error)]
pub enum SaveError {
    /// No save file exists at the path.
    #[error("no save file found at {0}")]
    NotFound(PathBuf),

    /// The file could not be read or written.
    #[error("save file {path}: {source}")]
    Io {
        /// Save file path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not a valid save.
    #[error("save file {path} is corrupt: {reason}")]
    Corrupt {
        /// Save file path.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// The state could not be encoded.
    #[error("cannot encode save state: {0}")]
    Serialize(#[from] serde_json::Error),
}
