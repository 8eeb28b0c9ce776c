//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for roster changes and team
//! balancing runs.

use crate::balancer::engine::DivideStats;
use crate::balancer::search::StopReason;
use anyhow::Result;
use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Main metrics collector for the balancer
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Balancing run metrics
    balancer_metrics: BalancerMetrics,

    /// Roster metrics
    roster_metrics: RosterMetrics,
}

/// Balancing run metrics
#[derive(Clone)]
pub struct BalancerMetrics {
    /// Divide calls by outcome (completed, cancelled, time_budget, not_ready)
    pub divides_total: IntCounterVec,

    /// Trials evaluated
    pub trials_total: IntCounter,

    /// Trials discarded for violating a fixed role
    pub invalid_trials_total: IntCounter,

    /// Wall-clock time of one divide
    pub divide_duration_seconds: Histogram,

    /// Achievable buckets after the latest divide
    pub achievable_buckets: IntGauge,
}

/// Roster metrics
#[derive(Clone)]
pub struct RosterMetrics {
    /// Players in the roster
    pub roster_size: IntGauge,

    /// Players marked as participating
    pub participating_players: IntGauge,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        Self::with_registry(Arc::new(Registry::new()))
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let balancer_metrics = BalancerMetrics::new(&registry)?;
        let roster_metrics = RosterMetrics::new(&registry)?;

        Ok(Self {
            registry,
            balancer_metrics,
            roster_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn balancer(&self) -> &BalancerMetrics {
        &self.balancer_metrics
    }

    pub fn roster(&self) -> &RosterMetrics {
        &self.roster_metrics
    }

    /// Record a finished divide
    pub fn record_divide(&self, stats: &DivideStats) {
        let outcome = match stats.stop {
            StopReason::Completed => "completed",
            StopReason::Cancelled => "cancelled",
            StopReason::TimeBudget => "time_budget",
        };
        self.balancer_metrics
            .divides_total
            .with_label_values(&[outcome])
            .inc();
        self.balancer_metrics.trials_total.inc_by(stats.trials);
        self.balancer_metrics
            .invalid_trials_total
            .inc_by(stats.invalid_trials);
        self.balancer_metrics
            .divide_duration_seconds
            .observe(stats.elapsed.as_secs_f64());
        self.balancer_metrics
            .achievable_buckets
            .set(stats.achievable_buckets as i64);
    }

    /// Record a divide refused because the roster was not ready
    pub fn record_not_ready(&self) {
        self.balancer_metrics
            .divides_total
            .with_label_values(&["not_ready"])
            .inc();
    }

    /// Update roster gauges
    pub fn update_roster(&self, size: usize, participating: usize) {
        self.roster_metrics.roster_size.set(size as i64);
        self.roster_metrics
            .participating_players
            .set(participating as i64);
    }

    /// Encode all metrics in the Prometheus text format
    pub fn gather_text(&self) -> Result<String> {
        let metric_families = self.registry.gather();
        TextEncoder::new()
            .encode_to_string(&metric_families)
            .map_err(|e| anyhow::anyhow!("Failed to encode metrics: {}", e))
    }
}

impl BalancerMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let divides_total = IntCounterVec::new(
            Opts::new("roster_balancer_divides_total", "Total divide calls"),
            &["outcome"],
        )?;
        registry.register(Box::new(divides_total.clone()))?;

        let trials_total = IntCounter::new("roster_balancer_trials_total", "Total trials evaluated")?;
        registry.register(Box::new(trials_total.clone()))?;

        let invalid_trials_total = IntCounter::new(
            "roster_balancer_invalid_trials_total",
            "Trials discarded for fixed-role violations",
        )?;
        registry.register(Box::new(invalid_trials_total.clone()))?;

        let divide_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "roster_balancer_divide_duration_seconds",
                "Divide duration in seconds",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;
        registry.register(Box::new(divide_duration_seconds.clone()))?;

        let achievable_buckets = IntGauge::new(
            "roster_balancer_achievable_buckets",
            "Achievable mismatch buckets after the latest divide",
        )?;
        registry.register(Box::new(achievable_buckets.clone()))?;

        Ok(Self {
            divides_total,
            trials_total,
            invalid_trials_total,
            divide_duration_seconds,
            achievable_buckets,
        })
    }
}

impl RosterMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let roster_size = IntGauge::new("roster_balancer_roster_size", "Players in the roster")?;
        registry.register(Box::new(roster_size.clone()))?;

        let participating_players = IntGauge::new(
            "roster_balancer_participating_players",
            "Players marked as participating",
        )?;
        registry.register(Box::new(participating_players.clone()))?;

        Ok(Self {
            roster_size,
            participating_players,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn stats(stop: StopReason) -> DivideStats {
        DivideStats {
            trials: 1000,
            invalid_trials: 40,
            improvements: 12,
            achievable_buckets: 3,
            elapsed: Duration::from_millis(20),
            stop,
        }
    }

    #[test]
    fn test_record_divide() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");
        collector.record_divide(&stats(StopReason::Completed));
        collector.record_divide(&stats(StopReason::Cancelled));

        let balancer = collector.balancer();
        assert_eq!(balancer.trials_total.get(), 2000);
        assert_eq!(balancer.invalid_trials_total.get(), 80);
        assert_eq!(balancer.achievable_buckets.get(), 3);
        assert_eq!(
            balancer.divides_total.with_label_values(&["cancelled"]).get(),
            1
        );
        assert_eq!(balancer.divide_duration_seconds.get_sample_count(), 2);
    }

    #[test]
    fn test_not_ready_and_roster() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");
        collector.record_not_ready();
        collector.update_roster(14, 10);

        assert_eq!(
            collector
                .balancer()
                .divides_total
                .with_label_values(&["not_ready"])
                .get(),
            1
        );
        assert_eq!(collector.roster().roster_size.get(), 14);
        assert_eq!(collector.roster().participating_players.get(), 10);
    }

    #[test]
    fn test_gather_text() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");
        collector.record_divide(&stats(StopReason::TimeBudget));
        let text = collector.gather_text().unwrap();
        assert!(text.contains("roster_balancer_trials_total 1000"));
        assert!(text.contains("outcome=\"time_budget\""));
    }
}
