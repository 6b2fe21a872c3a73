//! Health, food, and experience snapshot.

use serde::{Deserialize, Serialize};

/// Full health on the world's vitals scale.
pub const MAX_HEALTH: f32 = 20.0;

/// Momentary copy of the agent's vital statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    /// Health points, 0 to [`MAX_HEALTH`].
    pub health: f32,
    /// Food saturation, 0 to 20.
    pub food: f32,
    /// Experience level.
    pub experience: u32,
}

impl Vitals {
    /// A fully healthy, fully fed snapshot at experience level 0.
    pub const fn full() -> Self {
        Self {
            health: MAX_HEALTH,
            food: 20.0,
            experience: 0,
        }
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self::full()
    }
}
