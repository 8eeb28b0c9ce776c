//! Utility functions for the balancer

use crate::types::PlayerId;
use uuid::Uuid;

/// Generate a new unique player ID
pub fn generate_player_id() -> PlayerId {
    Uuid::new_v4()
}

/// Generate a new unique roster ID
pub fn generate_roster_id() -> Uuid {
    Uuid::new_v4()
}

/// Calculate the absolute difference between two ratings
pub fn rating_difference(rating1: f64, rating2: f64) -> f64 {
    (rating1 - rating2).abs()
}
