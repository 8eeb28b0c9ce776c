//! Balancer search configuration

use crate::balancer::evaluation::{RatingModel, ScoreWeights};
use crate::error::{BalancerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default number of trials per `divide()` call
pub const DEFAULT_MAX_TRIALS: u64 = 100_000;

/// How arrangements are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Uniform random permutations, bounded by `max_trials`
    #[default]
    Random,
    /// Every permutation of the ten players
    Exhaustive,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Random => write!(f, "random"),
            StrategyKind::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = BalancerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(StrategyKind::Random),
            "exhaustive" => Ok(StrategyKind::Exhaustive),
            other => Err(BalancerError::ConfigurationError {
                message: format!("unknown search strategy '{}'", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    /// Trials per divide for the random strategy
    pub max_trials: u64,
    /// Parallel workers sharing the trial budget
    pub workers: usize,
    /// Fixed RNG seed for reproducible results
    pub seed: Option<u64>,
    /// Wall-clock bound for one divide, in milliseconds
    pub time_budget_ms: Option<u64>,
    pub strategy: StrategyKind,
    pub rating_model: RatingModel,
    pub weights: ScoreWeights,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            max_trials: DEFAULT_MAX_TRIALS,
            workers: 1,
            seed: None,
            time_budget_ms: None,
            strategy: StrategyKind::default(),
            rating_model: RatingModel::default(),
            weights: ScoreWeights::default(),
        }
    }
}

impl BalancerConfig {
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_trials == 0 {
            return Err(BalancerError::ConfigurationError {
                message: "max_trials must be greater than 0".to_string(),
            }
            .into());
        }
        if self.workers == 0 {
            return Err(BalancerError::ConfigurationError {
                message: "workers must be greater than 0".to_string(),
            }
            .into());
        }
        if self.time_budget_ms == Some(0) {
            return Err(BalancerError::ConfigurationError {
                message: "time_budget_ms must be greater than 0 when set".to_string(),
            }
            .into());
        }
        self.weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BalancerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_trials, 100_000);
        assert_eq!(config.strategy, StrategyKind::Random);
        assert_eq!(config.rating_model, RatingModel::LaneAdjusted);
        assert!(config.time_budget().is_none());
    }

    #[test]
    fn test_invalid_values() {
        let config = BalancerConfig {
            max_trials: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BalancerConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BalancerConfig {
            time_budget_ms: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("Exhaustive".parse::<StrategyKind>().unwrap(), StrategyKind::Exhaustive);
        assert!("genetic".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: BalancerConfig = toml::from_str("max_trials = 5000\nseed = 7\nstrategy = \"exhaustive\"").unwrap();
        assert_eq!(config.max_trials, 5000);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.strategy, StrategyKind::Exhaustive);
        assert_eq!(config.weights, ScoreWeights::default());
    }
}
