//! Story flags recording the player's decisions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The value stored under a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A plain marker.
    Bool(bool),
    /// A named outcome, such as the ending reached.
    Text(String),
}

impl FlagValue {
    /// Whether the value counts as set for a has-flag check.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => !s.is_empty(),
        }
    }
}

impl From<bool> for FlagValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for FlagValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl std::fmt::Display for FlagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Append-only flag set for one playthrough, sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryFlags {
    flags: BTreeMap<String, FlagValue>,
}

impl StoryFlags {
    /// Create an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a flag. Returns false, leaving the old value, if it was already set.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FlagValue>) -> bool {
        let key = key.into();
        if self.flags.contains_key(&key) {
            return false;
        }
        tracing::debug!(flag = %key, "flag set");
        self.flags.insert(key, value.into());
        true
    }

    /// Whether a flag is present and truthy.
    pub fn is_set(&self, key: &str) -> bool {
        self.flags.get(key).is_some_and(FlagValue::is_truthy)
    }

    /// Get a flag's value.
    pub fn get(&self, key: &str) -> Option<&FlagValue> {
        self.flags.get(key)
    }

    /// Iterate in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flags are set.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_is_append_only() {
        let mut flags = StoryFlags::new();
        assert!(flags.set("saved_villager", true));
        assert!(!flags.set("saved_villager", false));
        assert!(flags.is_set("saved_villager"));
        assert_eq!(flags.len(), 1);
    }

    #[test]
    fn text_flags() {
        let mut flags = StoryFlags::new();
        flags.set("ending", "ending_peace");
        assert_eq!(flags.get("ending"), Some(&FlagValue::Text("ending_peace".into())));
        assert!(flags.is_set("ending"));
        assert!(!flags.is_set("missing"));
    }

    #[test]
    fn serializes_sorted() {
        let mut flags = StoryFlags::new();
        flags.set("zeta", true);
        flags.set("alpha", "x");
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#"{"alpha":"x","zeta":true}"#);
        let back: StoryFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
    }
}
