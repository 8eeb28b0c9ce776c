//! Team balancing
//!
//! This module scores arrangements of ten players into two sides, searches the
//! permutation space, and keeps the best arrangement per mismatch count.

pub mod engine;
pub mod evaluation;
pub mod search;
pub mod table;

// Re-export commonly used types
pub use engine::{DivideStats, TeamBalancer};
pub use evaluation::{Evaluator, RatingModel, ScoreWeights};
pub use search::{
    CancellationToken, Exhaustive, RandomSampling, SearchLimits, SearchOutcome, SearchStrategy,
    StopReason, TrialContext,
};
pub use table::{BalanceResult, BucketReport, ResultTable, SeatReport, Side, BUCKET_COUNT};
