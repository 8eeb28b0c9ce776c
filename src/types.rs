//! Common types used throughout the balancer

use crate::error::BalancerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for players
pub type PlayerId = Uuid;

/// Number of players on one side
pub const TEAM_SIZE: usize = 5;

/// Number of seats in one game (two sides)
pub const GAME_SIZE: usize = TEAM_SIZE * 2;

/// A concrete lane a player can be assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Lane {
    #[serde(rename = "TOP")]
    Top,
    #[serde(rename = "JG", alias = "JUNGLE")]
    Jungle,
    #[serde(rename = "MID")]
    Mid,
    #[serde(rename = "BOT")]
    Bot,
    #[serde(rename = "SUP", alias = "SUPPORT")]
    Support,
}

impl Lane {
    /// All lanes in slot order
    pub const ALL: [Lane; TEAM_SIZE] = [Lane::Top, Lane::Jungle, Lane::Mid, Lane::Bot, Lane::Support];

    /// Position of this lane within a side
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lane at a side position
    pub fn from_index(index: usize) -> Result<Self, BalancerError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| BalancerError::InvalidLane {
                value: index.to_string(),
            })
    }

    /// Lane played by the seat at `slot` (0..10) of an arrangement
    pub fn for_slot(slot: usize) -> Self {
        Self::ALL[slot % TEAM_SIZE]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lane::Top => "TOP",
            Lane::Jungle => "JG",
            Lane::Mid => "MID",
            Lane::Bot => "BOT",
            Lane::Support => "SUP",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Lane {
    type Err = BalancerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TOP" => Ok(Lane::Top),
            "JG" | "JUNGLE" => Ok(Lane::Jungle),
            "MID" => Ok(Lane::Mid),
            "BOT" | "ADC" => Ok(Lane::Bot),
            "SUP" | "SUPPORT" => Ok(Lane::Support),
            _ => Err(BalancerError::InvalidLane {
                value: s.to_string(),
            }),
        }
    }
}

/// Main/sub role declaration: a concrete lane or no preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RolePreference {
    #[default]
    Any,
    Lane(Lane),
}

impl RolePreference {
    /// Whether this preference covers `lane`
    pub fn covers(self, lane: Lane) -> bool {
        match self {
            RolePreference::Any => true,
            RolePreference::Lane(preferred) => preferred == lane,
        }
    }
}

impl fmt::Display for RolePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RolePreference::Any => f.write_str("ALL"),
            RolePreference::Lane(lane) => fmt::Display::fmt(lane, f),
        }
    }
}

impl FromStr for RolePreference {
    type Err = BalancerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL" | "ANY" | "" => Ok(RolePreference::Any),
            other => other.parse().map(RolePreference::Lane),
        }
    }
}

impl TryFrom<String> for RolePreference {
    type Error = BalancerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RolePreference> for String {
    fn from(value: RolePreference) -> Self {
        value.to_string()
    }
}

impl From<Lane> for RolePreference {
    fn from(lane: Lane) -> Self {
        RolePreference::Lane(lane)
    }
}

/// Set of lanes a player is willing to play, stored positionally in lane order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneSet([bool; TEAM_SIZE]);

impl LaneSet {
    /// Every lane desired
    pub fn all() -> Self {
        Self([true; TEAM_SIZE])
    }

    /// No lane desired
    pub fn empty() -> Self {
        Self([false; TEAM_SIZE])
    }

    /// Exactly one lane desired
    pub fn only(lane: Lane) -> Self {
        Self::empty().with(lane)
    }

    /// Copy of this set with `lane` added
    pub fn with(mut self, lane: Lane) -> Self {
        self.0[lane.index()] = true;
        self
    }

    pub fn contains(&self, lane: Lane) -> bool {
        self.0[lane.index()]
    }

    /// Add `lane` if absent, remove it if present
    pub fn toggle(&mut self, lane: Lane) {
        self.0[lane.index()] = !self.0[lane.index()];
    }

    pub fn len(&self) -> usize {
        self.0.iter().filter(|desired| **desired).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Lane> + '_ {
        Lane::ALL.into_iter().filter(|lane| self.contains(*lane))
    }
}

impl Default for LaneSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Lane> for LaneSet {
    fn from_iter<I: IntoIterator<Item = Lane>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), LaneSet::with)
    }
}
