//! Player model
//!
//! Players are values: every edit consumes the player and returns the updated one,
//! and a roster swaps the new value in by index. The rating is derived from the
//! rank and can only change through [`Player::with_rank`].

use crate::error::{BalancerError, Result};
use crate::rank::Rank;
use crate::types::{Lane, LaneSet, PlayerId, RolePreference};
use crate::utils::generate_player_id;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Multiplier applied when a lane is neither the main nor the sub role
const OFF_ROLE_FACTOR: f64 = 0.8;

/// Multiplier applied when a lane is the sub role
const SUB_ROLE_FACTOR: f64 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    id: PlayerId,
    name: String,
    rank: Rank,
    rating: u32,
    display_rank: String,
    main_role: RolePreference,
    sub_role: RolePreference,
    desired_roles: LaneSet,
    is_role_fixed: bool,
    is_participating: bool,
}

impl Player {
    /// Create a GOLD II player willing to play every lane
    pub fn new(name: impl Into<String>) -> Self {
        let rank = Rank::default();
        Self {
            id: generate_player_id(),
            name: name.into(),
            rank,
            rating: rank.rating(),
            display_rank: rank.display(),
            main_role: RolePreference::Any,
            sub_role: RolePreference::Any,
            desired_roles: LaneSet::all(),
            is_role_fixed: false,
            is_participating: false,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn rating(&self) -> u32 {
        self.rating
    }

    pub fn display_rank(&self) -> &str {
        &self.display_rank
    }

    pub fn main_role(&self) -> RolePreference {
        self.main_role
    }

    pub fn sub_role(&self) -> RolePreference {
        self.sub_role
    }

    pub fn desired_roles(&self) -> LaneSet {
        self.desired_roles
    }

    pub fn is_role_fixed(&self) -> bool {
        self.is_role_fixed
    }

    pub fn is_participating(&self) -> bool {
        self.is_participating
    }

    /// Set the rank, recomputing rating and display string together
    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = rank;
        self.rating = rank.rating();
        self.display_rank = rank.display();
        self
    }

    /// Set the rank from tier/division names
    pub fn set_rank(self, tier: &str, division: &str) -> Result<Self> {
        let rank = Rank::parse(tier, division)?;
        Ok(self.with_rank(rank))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_main_role(mut self, role: impl Into<RolePreference>) -> Self {
        self.main_role = role.into();
        self
    }

    pub fn with_sub_role(mut self, role: impl Into<RolePreference>) -> Self {
        self.sub_role = role.into();
        self
    }

    pub fn with_desired_roles(mut self, roles: LaneSet) -> Self {
        self.desired_roles = roles;
        self
    }

    pub fn with_role_fixed(mut self, fixed: bool) -> Self {
        self.is_role_fixed = fixed;
        self
    }

    pub fn with_participation(mut self, participating: bool) -> Self {
        self.is_participating = participating;
        self
    }

    /// Add `lane` to the desired roles if absent, remove it if present
    pub fn toggle_desired_role(mut self, lane: Lane) -> Self {
        self.desired_roles.toggle(lane);
        self
    }

    /// Toggle a desired role by its lane position (0 = TOP .. 4 = SUP)
    pub fn toggle_desired_role_by_index(self, index: usize) -> Result<Self> {
        let lane = Lane::from_index(index)?;
        Ok(self.toggle_desired_role(lane))
    }

    /// Whether the player wants to play `lane`
    pub fn desires(&self, lane: Lane) -> bool {
        self.desired_roles.contains(lane)
    }

    /// Rating adjusted for how comfortable the player is on `lane`
    pub fn rating_for_lane(&self, lane: Lane) -> f64 {
        let rating = f64::from(self.rating);
        if self.main_role.covers(lane) {
            rating
        } else if self.sub_role.covers(lane) {
            rating * SUB_ROLE_FACTOR
        } else {
            rating * OFF_ROLE_FACTOR
        }
    }

    /// Serialization view of this player
    pub fn to_record(&self) -> PlayerRecord {
        PlayerRecord::from(self)
    }
}

/// Persisted form of a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    #[serde(default = "generate_player_id")]
    pub id: PlayerId,
    pub name: String,
    pub tier: String,
    #[serde(alias = "rank")]
    pub division: String,
    #[serde(default)]
    pub display_rank: String,
    #[serde(default)]
    pub rating: u32,
    #[serde(default)]
    pub main_role: RolePreference,
    #[serde(default)]
    pub sub_role: RolePreference,
    #[serde(default = "LaneSet::all")]
    pub desired_roles: LaneSet,
    #[serde(default)]
    pub is_role_fixed: bool,
    #[serde(default)]
    pub is_participating_in_game: bool,
}

impl From<&Player> for PlayerRecord {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            tier: player.rank.tier.to_string(),
            division: player.rank.division.to_string(),
            display_rank: player.display_rank.clone(),
            rating: player.rating,
            main_role: player.main_role,
            sub_role: player.sub_role,
            desired_roles: player.desired_roles,
            is_role_fixed: player.is_role_fixed,
            is_participating_in_game: player.is_participating,
        }
    }
}

impl TryFrom<PlayerRecord> for Player {
    type Error = anyhow::Error;

    fn try_from(record: PlayerRecord) -> Result<Self> {
        if record.name.trim().is_empty() {
            return Err(BalancerError::InvalidRosterDocument {
                reason: "player name cannot be empty".to_string(),
            }
            .into());
        }

        let rank = Rank::parse(&record.tier, &record.division)?;
        if record.rating != 0 && record.rating != rank.rating() {
            warn!(
                "Stored rating {} for '{}' does not match {}, using {}",
                record.rating,
                record.name,
                rank,
                rank.rating()
            );
        }

        let mut player = Player::new(record.name)
            .with_rank(rank)
            .with_main_role(record.main_role)
            .with_sub_role(record.sub_role)
            .with_desired_roles(record.desired_roles)
            .with_role_fixed(record.is_role_fixed)
            .with_participation(record.is_participating_in_game);
        player.id = record.id;
        Ok(player)
    }
}
