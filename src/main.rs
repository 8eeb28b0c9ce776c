//! Command line entry point for the roster balancer
//!
//! Loads a roster document and an optional lobby chat log, splits the ten
//! participating players into two sides and prints the best arrangement for
//! every mismatch count.

use anyhow::Result;
use clap::Parser;
use roster_balancer::balancer::{BucketReport, RatingModel, TeamBalancer};
use roster_balancer::config::{validate_config, AppConfig, StrategyKind};
use roster_balancer::metrics::MetricsCollector;
use roster_balancer::roster::{Roster, RosterDocument};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Roster Balancer - lane-aware ten-player team splitting
#[derive(Parser)]
#[command(
    name = "roster-balancer",
    version,
    about = "Split ten participating players into two lane-balanced sides",
    long_about = "Roster Balancer loads a roster document, optionally replays lobby join/leave \
                 lines from a chat log, and searches seat arrangements of the ten participating \
                 players. The best arrangement is reported for every number of players seated \
                 outside their desired lanes."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Roster document
    #[arg(short, long, value_name = "FILE", help = "Roster document (JSON)")]
    roster: Option<PathBuf>,

    /// Lobby chat log to replay onto the roster
    #[arg(long, value_name = "FILE", help = "Lobby chat log to import")]
    chat_log: Option<PathBuf>,

    /// Trial budget override
    #[arg(short, long, value_name = "N", help = "Override the number of trials")]
    trials: Option<u64>,

    /// RNG seed override
    #[arg(long, value_name = "SEED", help = "Seed the search for reproducible results")]
    seed: Option<u64>,

    /// Worker count override
    #[arg(short, long, value_name = "N", help = "Override the number of search workers")]
    workers: Option<usize>,

    /// Enumerate every permutation
    #[arg(long, help = "Search every arrangement instead of sampling")]
    exhaustive: bool,

    /// Use plain rank ratings
    #[arg(long, help = "Score with plain rank ratings instead of lane-adjusted ones")]
    raw_rating: bool,

    /// Mark every roster player as participating
    #[arg(long, help = "Mark every roster player as participating before dividing")]
    all_participate: bool,

    /// JSON output
    #[arg(long, help = "Print the result table as JSON")]
    json: bool,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Print metrics after dividing
    #[arg(long, help = "Print Prometheus metrics after dividing")]
    print_metrics: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and inputs, then exit without dividing")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if let Some(trials) = args.trials {
        config.balancer.max_trials = trials;
    }

    if let Some(seed) = args.seed {
        config.balancer.seed = Some(seed);
    }

    if let Some(workers) = args.workers {
        config.balancer.workers = workers;
    }

    if args.exhaustive {
        config.balancer.strategy = StrategyKind::Exhaustive;
    }

    if args.raw_rating {
        config.balancer.rating_model = RatingModel::Raw;
    }

    validate_config(&config)?;
    Ok(config)
}

/// Build the roster from the document and chat log arguments
fn load_roster(args: &Args, config: &AppConfig) -> Result<Roster> {
    let mut roster = match &args.roster {
        Some(path) => {
            info!("Loading roster from: {}", path.display());
            RosterDocument::from_file(path)?.into_roster(config.roster.capacity)?
        }
        None => Roster::with_config(&config.roster),
    };

    if let Some(path) = &args.chat_log {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read chat log {}: {}", path.display(), e))?;
        roster.import_from_log(&text)?;
    }

    if args.all_participate {
        for index in 0..roster.len() {
            roster.set_participating(index, true)?;
        }
    }

    Ok(roster)
}

fn print_table(reports: &[BucketReport]) {
    for report in reports {
        match report.score {
            Some(score) if report.achievable => {
                println!("== {} off-role: score {:.2}", report.mismatch_count, score);
                for seat in &report.seats {
                    println!(
                        "  {} {:<4} {:<24} {:>5} {:>8.1}{}",
                        seat.side,
                        seat.lane,
                        seat.name,
                        seat.rating,
                        seat.seat_rating,
                        if seat.desired { "" } else { "  (off-role)" }
                    );
                }
            }
            _ => println!("== {} off-role: unachievable", report.mismatch_count),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let roster = match load_roster(&args, &config) {
        Ok(roster) => roster,
        Err(e) => {
            error!("Failed to load roster: {}", e);
            std::process::exit(1);
        }
    };

    let metrics = Arc::new(MetricsCollector::new()?);
    metrics.update_roster(roster.len(), roster.participating_count());

    if args.dry_run {
        info!(
            "Configuration valid: {} players in roster, {} participating, dividable: {}",
            roster.len(),
            roster.participating_count(),
            roster.is_dividable()
        );
        return Ok(());
    }

    let mut balancer = TeamBalancer::new(config.balancer.clone())?.with_metrics(metrics.clone());
    if let Err(e) = balancer.divide(&roster) {
        error!("Divide failed: {}", e);
        std::process::exit(2);
    }

    let reports = balancer.results().report();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_table(&reports);
    }

    if args.print_metrics {
        print!("{}", metrics.gather_text()?);
    }

    Ok(())
}
