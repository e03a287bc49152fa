//! Error types for the mechanics engine.

use std::path::PathBuf;

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// An inventory slot number does not exist.
    #[error("no item in slot {0}")]
    NoSuchItem(usize),

    /// The item exists but cannot be used in the current situation.
    #[error("{item} cannot be used {reason}")]
    ItemNotUsable {
        /// Name of the item.
        item: String,
        /// Why the item was refused, phrased to follow "cannot be used".
        reason: String,
    },

    /// An action was submitted to an encounter that has already ended.
    #[error("the fight is already over")]
    CombatOver,

    /// A combat rules configuration failed validation.
    #[error("invalid combat rules: {0}")]
    InvalidRules(String),

    /// A combat rules file could not be read.
    #[error("cannot read combat rules from {path}: {source}")]
    RulesIo {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// A combat rules file is not valid JSON for [`crate::CombatRules`].
    #[error("cannot parse combat rules from {path}: {source}")]
    RulesParse {
        /// Path that was read.
        path: PathBuf,
        /// Underlying parse failure.
        source: serde_json::Error,
    },
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
