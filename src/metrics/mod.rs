//! Metrics for the roster balancer
//!
//! This module provides Prometheus metrics for balancing runs and roster size.

pub mod collector;

pub use collector::{BalancerMetrics, MetricsCollector, RosterMetrics};
