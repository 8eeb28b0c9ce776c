//! Tier/division rating table
//!
//! A rank is a (tier, division) pair. Its rating is a pure function of the pair:
//! tiers step by 400 starting at 0 for IRON and divisions add 0/100/200/300 for
//! IV/III/II/I. MASTER and above ignore the division.

use crate::error::{BalancerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rating step between consecutive tiers
const TIER_STEP: u32 = 400;

/// Rating step between consecutive divisions
const DIVISION_STEP: u32 = 100;

/// Coarse skill bracket, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    pub const ALL: [Tier; 10] = [
        Tier::Iron,
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Emerald,
        Tier::Diamond,
        Tier::Master,
        Tier::Grandmaster,
        Tier::Challenger,
    ];

    /// Whether divisions are meaningless for this tier
    pub fn is_apex(self) -> bool {
        self >= Tier::Master
    }

    fn base_rating(self) -> u32 {
        self as u32 * TIER_STEP
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Iron => "IRON",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Emerald => "EMERALD",
            Tier::Diamond => "DIAMOND",
            Tier::Master => "MASTER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Challenger => "CHALLENGER",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = BalancerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == wanted)
            .ok_or_else(|| BalancerError::InvalidRank {
                reason: format!("unknown tier '{}'", s),
            })
    }
}

/// Fine-grained bracket within a tier; I is the highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Division {
    #[serde(rename = "IV")]
    Four,
    #[serde(rename = "III")]
    Three,
    #[serde(rename = "II")]
    Two,
    #[serde(rename = "I")]
    One,
}

impl Division {
    /// Divisions from lowest to highest
    pub const ALL: [Division; 4] = [Division::Four, Division::Three, Division::Two, Division::One];

    fn bonus(self) -> u32 {
        self as u32 * DIVISION_STEP
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Division::Four => "IV",
            Division::Three => "III",
            Division::Two => "II",
            Division::One => "I",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Division {
    type Err = BalancerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IV" | "4" => Ok(Division::Four),
            "III" | "3" => Ok(Division::Three),
            "II" | "2" => Ok(Division::Two),
            "I" | "1" => Ok(Division::One),
            _ => Err(BalancerError::InvalidRank {
                reason: format!("unknown division '{}'", s),
            }),
        }
    }
}

/// Rating for a (tier, division) pair
pub fn rating(tier: Tier, division: Division) -> u32 {
    if tier.is_apex() {
        tier.base_rating()
    } else {
        tier.base_rating() + division.bonus()
    }
}

/// Rating for tier/division names, failing on names outside the table
pub fn rating_from_str(tier: &str, division: &str) -> Result<u32> {
    let rank = Rank::parse(tier, division)?;
    Ok(rank.rating())
}

/// Tier names from lowest to highest
pub fn tier_list() -> Vec<&'static str> {
    Tier::ALL.iter().map(|tier| tier.as_str()).collect()
}

/// Division names from highest to lowest
pub fn division_list() -> Vec<&'static str> {
    Division::ALL.iter().rev().map(|division| division.as_str()).collect()
}

/// A player's rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rank {
    pub tier: Tier,
    pub division: Division,
}

impl Rank {
    pub fn new(tier: Tier, division: Division) -> Self {
        Self { tier, division }
    }

    /// Parse and validate a rank from its tier and division names
    pub fn parse(tier: &str, division: &str) -> Result<Self> {
        Ok(Self::new(tier.parse()?, division.parse()?))
    }

    pub fn rating(&self) -> u32 {
        rating(self.tier, self.division)
    }

    /// Human-readable rank: the tier alone for MASTER and above
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl Default for Rank {
    fn default() -> Self {
        Self::new(Tier::Gold, Division::Two)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tier.is_apex() {
            write!(f, "{}", self.tier)
        } else {
            write!(f, "{} {}", self.tier, self.division)
        }
    }
}
