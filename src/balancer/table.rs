//! Per-mismatch-count result table
//!
//! One bucket per possible mismatch count (0 through 10). A bucket that never
//! received a valid arrangement stays empty with an infinite score and is
//! reported as unachievable.

use crate::balancer::evaluation::RatingModel;
use crate::balancer::search::Standings;
use crate::player::Player;
use crate::types::{Lane, GAME_SIZE, TEAM_SIZE};
use serde::Serialize;
use std::fmt;

/// Number of buckets: one for each mismatch count 0..=10
pub const BUCKET_COUNT: usize = GAME_SIZE + 1;

/// One of the two sides of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Best-known arrangement for one mismatch count
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceResult {
    /// Empty, or ten players in slot order
    pub players: Vec<Player>,
    pub score: f64,
}

impl BalanceResult {
    pub fn unachievable() -> Self {
        Self {
            players: Vec::new(),
            score: f64::INFINITY,
        }
    }

    pub fn is_achievable(&self) -> bool {
        self.score.is_finite() && self.players.len() == GAME_SIZE
    }

    pub fn side_a(&self) -> &[Player] {
        self.players.get(..TEAM_SIZE).unwrap_or(&[])
    }

    pub fn side_b(&self) -> &[Player] {
        self.players.get(TEAM_SIZE..).unwrap_or(&[])
    }

    /// `(side, lane, player)` for every seat
    pub fn seats(&self) -> impl Iterator<Item = (Side, Lane, &Player)> + '_ {
        self.players.iter().enumerate().map(|(slot, player)| {
            let side = if slot < TEAM_SIZE { Side::A } else { Side::B };
            (side, Lane::for_slot(slot), player)
        })
    }

    /// Players seated on a lane outside their desired roles
    pub fn mismatched_players(&self) -> Vec<&Player> {
        self.seats()
            .filter(|(_, lane, player)| !player.desires(*lane))
            .map(|(_, _, player)| player)
            .collect()
    }
}

impl Default for BalanceResult {
    fn default() -> Self {
        Self::unachievable()
    }
}

/// Results of one `divide()`, keyed by mismatch count
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    buckets: Vec<BalanceResult>,
    /// Model the scores were computed under; reports rate seats with it too
    model: RatingModel,
}

impl ResultTable {
    /// Table with every bucket unachievable
    pub fn new(model: RatingModel) -> Self {
        Self {
            buckets: vec![BalanceResult::unachievable(); BUCKET_COUNT],
            model,
        }
    }

    /// Materialize search standings against the pool they index into
    pub fn from_standings(pool: &[Player], standings: &Standings, model: RatingModel) -> Self {
        let mut table = Self::new(model);
        for (mismatches, candidate) in standings.iter() {
            let players = candidate
                .order
                .iter()
                .map(|&index| pool[index].clone())
                .collect();
            table.offer(mismatches, players, candidate.score);
        }
        table
    }

    pub fn model(&self) -> RatingModel {
        self.model
    }

    pub fn get(&self, mismatches: usize) -> Option<&BalanceResult> {
        self.buckets.get(mismatches)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &BalanceResult)> + '_ {
        self.buckets.iter().enumerate()
    }

    /// Store an arrangement if it strictly beats the bucket's current score
    pub fn offer(&mut self, mismatches: usize, players: Vec<Player>, score: f64) -> bool {
        match self.buckets.get_mut(mismatches) {
            Some(bucket) if players.len() == GAME_SIZE && score < bucket.score => {
                *bucket = BalanceResult { players, score };
                true
            }
            _ => false,
        }
    }

    pub fn achievable_count(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_achievable()).count()
    }

    /// Achievable bucket with the fewest mismatches
    pub fn fewest_mismatches(&self) -> Option<(usize, &BalanceResult)> {
        self.iter().find(|(_, bucket)| bucket.is_achievable())
    }

    /// Serializable view for callers outside the crate
    pub fn report(&self) -> Vec<BucketReport> {
        self.iter()
            .map(|(mismatches, bucket)| BucketReport::new(mismatches, bucket, self.model))
            .collect()
    }
}

impl Default for ResultTable {
    fn default() -> Self {
        Self::new(RatingModel::default())
    }
}

/// One seat in a report; `seat_rating` is the rating the score used for this seat
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatReport {
    pub side: Side,
    pub lane: Lane,
    pub name: String,
    pub rating: u32,
    pub seat_rating: f64,
    pub desired: bool,
}

/// One bucket in a report; `score` is absent for unachievable buckets
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketReport {
    pub mismatch_count: usize,
    pub achievable: bool,
    pub score: Option<f64>,
    pub seats: Vec<SeatReport>,
}

impl BucketReport {
    fn new(mismatch_count: usize, bucket: &BalanceResult, model: RatingModel) -> Self {
        let achievable = bucket.is_achievable();
        let seats = bucket
            .seats()
            .map(|(side, lane, player)| SeatReport {
                side,
                lane,
                name: player.name().to_string(),
                rating: player.rating(),
                seat_rating: model.seat_rating(player, lane),
                desired: player.desires(lane),
            })
            .collect();
        Self {
            mismatch_count,
            achievable,
            score: achievable.then_some(bucket.score),
            seats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balancer::search::SlotOrder;
    use crate::types::LaneSet;

    fn ten_players() -> Vec<Player> {
        (0..GAME_SIZE).map(|i| Player::new(format!("P{}", i))).collect()
    }

    #[test]
    fn test_new_table_is_unachievable() {
        let table = ResultTable::default();
        assert_eq!(table.iter().count(), 11);
        for (_, bucket) in table.iter() {
            assert!(bucket.players.is_empty());
            assert_eq!(bucket.score, f64::INFINITY);
            assert!(!bucket.is_achievable());
        }
        assert!(table.get(11).is_none());
        assert!(table.fewest_mismatches().is_none());
    }

    #[test]
    fn test_offer_requires_strictly_lower_score() {
        let mut table = ResultTable::default();
        let players = ten_players();
        let mut reversed = players.clone();
        reversed.reverse();

        assert!(table.offer(3, players.clone(), 12.0));
        assert!(!table.offer(3, reversed.clone(), 12.0));
        assert_eq!(table.get(3).unwrap().players, players);
        assert!(table.offer(3, reversed.clone(), 11.0));
        assert_eq!(table.get(3).unwrap().players, reversed);
        assert!(!table.offer(3, players[..9].to_vec(), 1.0));
        assert!(!table.offer(11, players, 0.0));
        assert_eq!(table.achievable_count(), 1);
    }

    #[test]
    fn test_from_standings() {
        let pool = ten_players();
        let mut standings = Standings::new();
        let order: SlotOrder = [9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
        standings.offer(0, &order, 4.0);

        let table = ResultTable::from_standings(&pool, &standings, RatingModel::LaneAdjusted);
        let bucket = table.get(0).unwrap();
        assert!(bucket.is_achievable());
        assert_eq!(bucket.players[0].name(), "P9");
        assert_eq!(bucket.side_b()[4].name(), "P0");
        assert_eq!(table.fewest_mismatches().unwrap().0, 0);
        assert_eq!(table.achievable_count(), 1);
    }

    #[test]
    fn test_seats_and_mismatches() {
        let mut players = ten_players();
        players[3] = players[3].clone().with_desired_roles(LaneSet::only(Lane::Top));
        let bucket = BalanceResult {
            players,
            score: 1.0,
        };

        let seats: Vec<_> = bucket.seats().collect();
        assert_eq!(seats[3].0, Side::A);
        assert_eq!(seats[3].1, Lane::Bot);
        assert_eq!(seats[7].0, Side::B);
        assert_eq!(seats[7].1, Lane::Mid);

        let mismatched = bucket.mismatched_players();
        assert_eq!(mismatched.len(), 1);
        assert_eq!(mismatched[0].name(), "P3");
    }

    #[test]
    fn test_report_marks_unachievable() {
        let mut table = ResultTable::default();
        table.offer(0, ten_players(), 0.0);
        let report = table.report();
        assert_eq!(report.len(), 11);
        assert!(report[0].achievable);
        assert_eq!(report[0].score, Some(0.0));
        assert_eq!(report[0].seats.len(), 10);
        assert!(!report[5].achievable);
        assert_eq!(report[5].score, None);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json[0]["mismatchCount"], 0);
        assert_eq!(json[0]["seats"][1]["lane"], "JG");
        assert!(json[5]["score"].is_null());
    }

    #[test]
    fn test_report_rates_seats_with_table_model() {
        let players: Vec<Player> = ten_players()
            .into_iter()
            .map(|p| p.with_main_role(Lane::Support).with_sub_role(Lane::Support))
            .collect();

        let mut raw = ResultTable::new(RatingModel::Raw);
        raw.offer(0, players.clone(), 0.0);
        let seats = &raw.report()[0].seats;
        assert_eq!(seats[0].lane, Lane::Top);
        assert!(seats.iter().all(|seat| seat.seat_rating == f64::from(seat.rating)));

        let mut adjusted = ResultTable::new(RatingModel::LaneAdjusted);
        adjusted.offer(0, players, 0.0);
        let seats = &adjusted.report()[0].seats;
        assert_eq!(seats[0].seat_rating, 1120.0);
        assert_eq!(seats[4].seat_rating, 1400.0);
    }
}
