//! Arrangement scoring
//!
//! An arrangement seats ten players in slot order: slots 0-4 are side A and
//! 5-9 side B, each in lane order TOP, JG, MID, BOT, SUP. Its score is a
//! weighted sum of rating differences between the sides; lower is better.

use crate::error::{BalancerError, Result};
use crate::player::Player;
use crate::types::{Lane, GAME_SIZE, TEAM_SIZE};
use crate::utils::rating_difference;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which rating a seat contributes to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingModel {
    /// [`Player::rating_for_lane`], discounting off-role seats
    #[default]
    LaneAdjusted,
    /// The plain rank rating on every lane
    Raw,
}

impl RatingModel {
    pub fn seat_rating(self, player: &Player, lane: Lane) -> f64 {
        match self {
            RatingModel::LaneAdjusted => player.rating_for_lane(lane),
            RatingModel::Raw => f64::from(player.rating()),
        }
    }
}

impl fmt::Display for RatingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingModel::LaneAdjusted => write!(f, "lane_adjusted"),
            RatingModel::Raw => write!(f, "raw"),
        }
    }
}

impl FromStr for RatingModel {
    type Err = BalancerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lane_adjusted" | "lane-adjusted" => Ok(RatingModel::LaneAdjusted),
            "raw" => Ok(RatingModel::Raw),
            other => Err(BalancerError::ConfigurationError {
                message: format!("unknown rating model '{}'", other),
            }),
        }
    }
}

/// Weights of the three score terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Whole-side rating difference
    pub total: f64,
    /// Sum of lane-opponent rating differences
    pub lane: f64,
    /// Bot+support pair rating difference
    pub pair: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            total: 0.3,
            lane: 0.5,
            pair: 0.2,
        }
    }
}

impl ScoreWeights {
    /// Weights for a deployment that does not model the bot lane pairing
    pub fn without_pair() -> Self {
        Self {
            total: 0.375,
            lane: 0.625,
            pair: 0.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [self.total, self.lane, self.pair];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(BalancerError::ConfigurationError {
                message: "score weights must be finite and non-negative".to_string(),
            }
            .into());
        }
        if weights.iter().all(|w| *w == 0.0) {
            return Err(BalancerError::ConfigurationError {
                message: "at least one score weight must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Score seat ratings given in slot order
    pub fn score(&self, seats: &[f64; GAME_SIZE]) -> f64 {
        self.total * total_rating_difference(seats)
            + self.lane * lane_rating_difference(seats)
            + self.pair * pair_rating_difference(seats)
    }
}

/// |sum of side A − sum of side B|
pub fn total_rating_difference(seats: &[f64; GAME_SIZE]) -> f64 {
    let (side_a, side_b) = seats.split_at(TEAM_SIZE);
    rating_difference(side_a.iter().sum(), side_b.iter().sum())
}

/// Sum over lanes of |side A seat − side B seat|
pub fn lane_rating_difference(seats: &[f64; GAME_SIZE]) -> f64 {
    (0..TEAM_SIZE)
        .map(|lane| rating_difference(seats[lane], seats[lane + TEAM_SIZE]))
        .sum()
}

/// |(bot + support) on side A − (bot + support) on side B|
pub fn pair_rating_difference(seats: &[f64; GAME_SIZE]) -> f64 {
    let bot = Lane::Bot.index();
    let support = Lane::Support.index();
    rating_difference(
        seats[bot] + seats[support],
        seats[bot + TEAM_SIZE] + seats[support + TEAM_SIZE],
    )
}

/// Rating model and weights a search scores arrangements with
///
/// [`TrialContext`](crate::balancer::search::TrialContext) precomputes seat
/// ratings from it and is the single place arrangements are scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluator {
    pub model: RatingModel,
    pub weights: ScoreWeights,
}

impl Evaluator {
    pub fn new(model: RatingModel, weights: ScoreWeights) -> Self {
        Self { model, weights }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(RatingModel::default(), ScoreWeights::default())
    }
}
