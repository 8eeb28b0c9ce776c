//! Configuration management for the roster balancer
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;
pub mod balancer;
pub mod roster;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use balancer::{BalancerConfig, StrategyKind, DEFAULT_MAX_TRIALS};
pub use roster::{RosterConfig, DEFAULT_ROSTER_CAPACITY};
