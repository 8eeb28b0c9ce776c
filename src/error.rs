//! Error types for the roster balancer
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Callers that need to react to a specific failure recover
//! the typed variant with `downcast_ref::<BalancerError>()`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific balancing scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BalancerError {
    #[error("Invalid rank: {reason}")]
    InvalidRank { reason: String },

    #[error("Invalid lane: {value}")]
    InvalidLane { value: String },

    #[error("Index {index} is out of range for roster of {len} players")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Name already in roster: {name}")]
    DuplicateName { name: String },

    #[error("Roster is full: capacity {capacity} reached")]
    RosterFull { capacity: usize },

    #[error("Division not ready: {participating} participating players, {required} required")]
    DivisionNotReady { participating: usize, required: usize },

    #[error("Invalid roster document: {reason}")]
    InvalidRosterDocument { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl BalancerError {
    /// Whether this error belongs to the input validation family
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BalancerError::InvalidRank { .. }
                | BalancerError::InvalidLane { .. }
                | BalancerError::IndexOutOfRange { .. }
                | BalancerError::DuplicateName { .. }
        )
    }
}
