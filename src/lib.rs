//! Roster Balancer - Lane-aware team splitting for ten-player custom games
//!
//! This crate keeps a roster of players with ranks and lane preferences and
//! splits the ten participating players into two sides, keeping the best
//! arrangement found for every count of off-role seats.

pub mod balancer;
pub mod config;
pub mod error;
pub mod metrics;
pub mod player;
pub mod rank;
pub mod roster;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{BalancerError, Result};
pub use types::*;

// Re-export key components
pub use balancer::{DivideStats, ResultTable, TeamBalancer};
pub use player::{Player, PlayerRecord};
pub use rank::{Division, Rank, Tier};
pub use roster::{Roster, RosterDocument};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
