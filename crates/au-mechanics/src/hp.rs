//! Hit point pools.
//!
//! A pool is a clamped value between 0 and its maximum. Every mutation goes
//! through [`HitPoints::adjust`], so `0 <= hp <= max_hp` holds at all times.

use serde::{Deserialize, Serialize};

/// Current and maximum hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    /// Current value.
    #[serde(rename = "hp")]
    pub current: i32,
    /// Maximum value.
    #[serde(rename = "max_hp")]
    pub max: i32,
}

impl HitPoints {
    /// Create a full pool.
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    /// Create a pool with a custom starting value, clamped into range.
    pub fn with_current(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    /// Adjust by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.current = self.current.saturating_add(delta).clamp(0, self.max);
        self.current
    }

    /// Apply damage, returning the amount actually removed.
    pub fn damage(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.adjust(-amount.max(0));
        before - self.current
    }

    /// Restore hit points, returning the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.adjust(amount.max(0));
        self.current - before
    }

    /// Returns true while the pool is above zero.
    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Returns the filled fraction (0.0 to 1.0).
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        f64::from(self.current) / f64::from(self.max)
    }
}

impl std::fmt::Display for HitPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}
