//! Team balancer engine
//!
//! `TeamBalancer` owns one result table and rebuilds it on every successful
//! `divide()`. The roster is only borrowed for the duration of the call, so
//! it cannot be mutated while a search runs against it.

use crate::balancer::evaluation::Evaluator;
use crate::balancer::search::{
    CancellationToken, Exhaustive, RandomSampling, SearchLimits, SearchStrategy, StopReason,
    TrialContext,
};
use crate::balancer::table::ResultTable;
use crate::config::{BalancerConfig, StrategyKind};
use crate::error::{BalancerError, Result};
use crate::metrics::MetricsCollector;
use crate::roster::Roster;
use crate::types::GAME_SIZE;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Statistics of one `divide()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivideStats {
    pub trials: u64,
    /// Trials discarded for seating a fixed-role player off their roles
    pub invalid_trials: u64,
    pub improvements: u64,
    pub achievable_buckets: usize,
    pub elapsed: Duration,
    pub stop: StopReason,
}

/// Splits the ten participating players of a roster into two lane-balanced sides
pub struct TeamBalancer {
    config: BalancerConfig,
    evaluator: Evaluator,
    strategy: Box<dyn SearchStrategy>,
    results: ResultTable,
    cancel: CancellationToken,
    metrics: Option<Arc<MetricsCollector>>,
}

impl TeamBalancer {
    /// Create a balancer with the strategy named by the configuration
    pub fn new(config: BalancerConfig) -> Result<Self> {
        config.validate()?;

        let strategy: Box<dyn SearchStrategy> = match config.strategy {
            StrategyKind::Random => Box::new(RandomSampling::new(config.seed, config.workers)),
            StrategyKind::Exhaustive => Box::new(Exhaustive),
        };

        Ok(Self {
            evaluator: Evaluator::new(config.rating_model, config.weights),
            results: ResultTable::new(config.rating_model),
            config,
            strategy,
            cancel: CancellationToken::new(),
            metrics: None,
        })
    }

    /// Replace the search strategy
    pub fn with_strategy(mut self, strategy: Box<dyn SearchStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Report divide statistics to a metrics collector
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Results of the latest successful `divide()`
    pub fn results(&self) -> &ResultTable {
        &self.results
    }

    /// Token that stops a running `divide()` early when cancelled from another thread
    ///
    /// The token is cleared once `divide()` returns, so a cancel only affects
    /// the call in flight.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Search arrangements of the roster's participating players
    ///
    /// Fails with [`BalancerError::DivisionNotReady`] unless exactly ten
    /// players participate; the previous results are then left untouched.
    pub fn divide(&mut self, roster: &Roster) -> Result<DivideStats> {
        let pool = roster.participants();
        if pool.len() != GAME_SIZE {
            warn!(
                "Cannot divide: {} participating players, {} required",
                pool.len(),
                GAME_SIZE
            );
            if let Some(metrics) = &self.metrics {
                metrics.record_not_ready();
            }
            return Err(BalancerError::DivisionNotReady {
                participating: pool.len(),
                required: GAME_SIZE,
            }
            .into());
        }

        let context = TrialContext::new(&pool, &self.evaluator)?;
        let started = Instant::now();
        let limits = SearchLimits {
            max_trials: self.config.max_trials,
            deadline: self.config.time_budget().map(|budget| started + budget),
            cancel: self.cancel.clone(),
        };

        info!(
            "Dividing {} players: strategy={}, model={}, max_trials={}",
            pool.len(),
            self.strategy.name(),
            self.evaluator.model,
            limits.max_trials
        );

        let outcome = self.strategy.search(&context, &limits);
        self.cancel.reset();
        self.results =
            ResultTable::from_standings(&pool, &outcome.standings, self.evaluator.model);

        let stats = DivideStats {
            trials: outcome.stats.trials,
            invalid_trials: outcome.stats.invalid_trials,
            improvements: outcome.stats.improvements,
            achievable_buckets: self.results.achievable_count(),
            elapsed: started.elapsed(),
            stop: outcome.stats.stop,
        };

        for (mismatches, bucket) in self.results.iter() {
            if bucket.is_achievable() {
                debug!("Bucket {}: score {:.2}", mismatches, bucket.score);
            }
        }
        info!(
            "Divide finished ({:?}): {} trials, {} invalid, {} achievable buckets in {:?}",
            stats.stop, stats.trials, stats.invalid_trials, stats.achievable_buckets, stats.elapsed
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_divide(&stats);
        }
        Ok(stats)
    }
}

impl std::fmt::Debug for TeamBalancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamBalancer")
            .field("config", &self.config)
            .field("strategy", &self.strategy.name())
            .field("achievable_buckets", &self.results.achievable_count())
            .finish()
    }
}
