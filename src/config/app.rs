//! Main application configuration
//!
//! This module defines the top-level configuration for the roster balancer,
//! including environment variable loading, TOML files and validation.

use crate::config::balancer::{BalancerConfig, StrategyKind};
use crate::config::roster::RosterConfig;
use crate::types::GAME_SIZE;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub roster: RosterConfig,
    pub balancer: BalancerConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in logs and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "roster-balancer".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let mut config: AppConfig = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Roster settings
        if let Ok(capacity) = env::var("ROSTER_CAPACITY") {
            self.roster.capacity = capacity
                .parse()
                .map_err(|_| anyhow!("Invalid ROSTER_CAPACITY value: {}", capacity))?;
        }

        // Balancer settings
        if let Ok(trials) = env::var("BALANCER_MAX_TRIALS") {
            self.balancer.max_trials = trials
                .parse()
                .map_err(|_| anyhow!("Invalid BALANCER_MAX_TRIALS value: {}", trials))?;
        }
        if let Ok(workers) = env::var("BALANCER_WORKERS") {
            self.balancer.workers = workers
                .parse()
                .map_err(|_| anyhow!("Invalid BALANCER_WORKERS value: {}", workers))?;
        }
        if let Ok(seed) = env::var("BALANCER_SEED") {
            self.balancer.seed = Some(
                seed.parse()
                    .map_err(|_| anyhow!("Invalid BALANCER_SEED value: {}", seed))?,
            );
        }
        if let Ok(budget) = env::var("BALANCER_TIME_BUDGET_MS") {
            self.balancer.time_budget_ms = Some(
                budget
                    .parse()
                    .map_err(|_| anyhow!("Invalid BALANCER_TIME_BUDGET_MS value: {}", budget))?,
            );
        }
        if let Ok(strategy) = env::var("BALANCER_STRATEGY") {
            self.balancer.strategy = strategy.parse::<StrategyKind>()?;
        }
        if let Ok(model) = env::var("BALANCER_RATING_MODEL") {
            self.balancer.rating_model = model.parse()?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    // A roster must at least hold one game
    if config.roster.capacity < GAME_SIZE {
        return Err(anyhow!(
            "Roster capacity must be at least {}, got {}",
            GAME_SIZE,
            config.roster.capacity
        ));
    }

    config.balancer.validate()
}
