//! Roster configuration

use serde::{Deserialize, Serialize};

/// Default maximum number of players a roster holds
pub const DEFAULT_ROSTER_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub capacity: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_ROSTER_CAPACITY,
        }
    }
}
