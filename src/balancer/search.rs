//! Arrangement search strategies
//!
//! A search walks permutations of the ten-player pool into the ten slots and
//! keeps, per mismatch count, the lowest-scoring valid permutation it met.
//! Arrangements are handled as index permutations over the pool; players are
//! only cloned once the search is over.

use crate::balancer::evaluation::{Evaluator, ScoreWeights};
use crate::balancer::table::BUCKET_COUNT;
use crate::error::{BalancerError, Result};
use crate::player::Player;
use crate::types::{Lane, LaneSet, GAME_SIZE, TEAM_SIZE};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Trials between checks of the cancellation flag and deadline
const STOP_CHECK_INTERVAL: u64 = 1024;

/// Number of distinct slot orders of ten players
pub const PERMUTATION_COUNT: u64 = 3_628_800;

/// Largest per-worker budget that still draws only unseen permutations
const DISTINCT_TRIAL_LIMIT: u64 = PERMUTATION_COUNT / 16;

/// A permutation of pool indices into slots
pub type SlotOrder = [usize; GAME_SIZE];

/// Shared flag that asks a running search to stop early
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Why a search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopReason {
    /// The trial budget or permutation space was used up
    #[default]
    Completed,
    Cancelled,
    TimeBudget,
}

/// Bounds on one search
#[derive(Debug, Clone)]
pub struct SearchLimits {
    pub max_trials: u64,
    pub deadline: Option<Instant>,
    pub cancel: CancellationToken,
}

impl SearchLimits {
    pub fn new(max_trials: u64) -> Self {
        Self {
            max_trials,
            deadline: None,
            cancel: CancellationToken::new(),
        }
    }

    fn should_stop(&self) -> Option<StopReason> {
        if self.cancel.is_cancelled() {
            return Some(StopReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(StopReason::TimeBudget),
            _ => None,
        }
    }
}

/// Precomputed per-player data for fast trial evaluation
#[derive(Debug, Clone)]
pub struct TrialContext {
    /// Seat rating of each pool player on each lane
    seat_ratings: [[f64; TEAM_SIZE]; GAME_SIZE],
    desired: [LaneSet; GAME_SIZE],
    fixed: [bool; GAME_SIZE],
    weights: ScoreWeights,
}

impl TrialContext {
    pub fn new(pool: &[Player], evaluator: &Evaluator) -> Result<Self> {
        if pool.len() != GAME_SIZE {
            return Err(BalancerError::DivisionNotReady {
                participating: pool.len(),
                required: GAME_SIZE,
            }
            .into());
        }

        let mut seat_ratings = [[0.0; TEAM_SIZE]; GAME_SIZE];
        let mut desired = [LaneSet::all(); GAME_SIZE];
        let mut fixed = [false; GAME_SIZE];
        for (index, player) in pool.iter().enumerate() {
            for lane in Lane::ALL {
                seat_ratings[index][lane.index()] = evaluator.model.seat_rating(player, lane);
            }
            desired[index] = player.desired_roles();
            fixed[index] = player.is_role_fixed();
        }

        Ok(Self {
            seat_ratings,
            desired,
            fixed,
            weights: evaluator.weights,
        })
    }

    /// Mismatch count and score of one permutation, or `None` if a fixed role is violated
    pub fn run_trial(&self, order: &SlotOrder) -> Option<(usize, f64)> {
        let mut mismatches = 0;
        let mut seats = [0.0; GAME_SIZE];
        for (slot, &player) in order.iter().enumerate() {
            let lane = Lane::for_slot(slot);
            if !self.desired[player].contains(lane) {
                if self.fixed[player] {
                    return None;
                }
                mismatches += 1;
            }
            seats[slot] = self.seat_ratings[player][lane.index()];
        }
        Some((mismatches, self.weights.score(&seats)))
    }
}

/// Best permutation seen for one mismatch count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub order: SlotOrder,
    pub score: f64,
}

/// Best candidate per mismatch count
#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    best: [Option<Candidate>; BUCKET_COUNT],
}

impl Standings {
    pub fn new() -> Self {
        Self {
            best: [None; BUCKET_COUNT],
        }
    }

    pub fn get(&self, mismatches: usize) -> Option<&Candidate> {
        self.best.get(mismatches).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Candidate)> + '_ {
        self.best
            .iter()
            .enumerate()
            .filter_map(|(mismatches, candidate)| candidate.as_ref().map(|c| (mismatches, c)))
    }

    /// Keep `order` if it strictly beats the stored candidate; earlier ties win
    pub fn offer(&mut self, mismatches: usize, order: &SlotOrder, score: f64) -> bool {
        let Some(slot) = self.best.get_mut(mismatches) else {
            return false;
        };
        let improves = slot.map_or(true, |current| score < current.score);
        if improves {
            *slot = Some(Candidate {
                order: *order,
                score,
            });
        }
        improves
    }

    /// Pointwise minimum by score; `self` wins ties
    pub fn merge(mut self, other: Standings) -> Standings {
        for (mine, theirs) in self.best.iter_mut().zip(other.best) {
            if let Some(theirs) = theirs {
                if mine.map_or(true, |current| theirs.score < current.score) {
                    *mine = Some(theirs);
                }
            }
        }
        self
    }
}

impl Default for Standings {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters for one search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    pub trials: u64,
    /// Trials discarded for seating a fixed-role player off their roles
    pub invalid_trials: u64,
    /// Trials that replaced a bucket's candidate
    pub improvements: u64,
    pub stop: StopReason,
}

impl SearchStats {
    fn merge(self, other: SearchStats) -> SearchStats {
        let stop = match (self.stop, other.stop) {
            (StopReason::Cancelled, _) | (_, StopReason::Cancelled) => StopReason::Cancelled,
            (StopReason::TimeBudget, _) | (_, StopReason::TimeBudget) => StopReason::TimeBudget,
            _ => StopReason::Completed,
        };
        SearchStats {
            trials: self.trials + other.trials,
            invalid_trials: self.invalid_trials + other.invalid_trials,
            improvements: self.improvements + other.improvements,
            stop,
        }
    }
}

/// Standings plus counters
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchOutcome {
    pub standings: Standings,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn merge(self, other: SearchOutcome) -> SearchOutcome {
        SearchOutcome {
            standings: self.standings.merge(other.standings),
            stats: self.stats.merge(other.stats),
        }
    }

    fn record(&mut self, context: &TrialContext, order: &SlotOrder) {
        self.stats.trials += 1;
        match context.run_trial(order) {
            None => self.stats.invalid_trials += 1,
            Some((mismatches, score)) => {
                if self.standings.offer(mismatches, order, score) {
                    self.stats.improvements += 1;
                }
            }
        }
    }
}

/// Trait for arrangement search algorithms
pub trait SearchStrategy: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Search arrangements of the pool described by `context`
    fn search(&self, context: &TrialContext, limits: &SearchLimits) -> SearchOutcome;
}

/// Monte-Carlo search over uniformly shuffled permutations
///
/// Invalid trials are dropped rather than repaired, so tight role locks can
/// leave low mismatch buckets empty. With several workers the trial budget is
/// split evenly and the per-worker standings are merged. Within a worker,
/// trials are distinct permutations unless the budget is a sizeable share of 10!.
#[derive(Debug, Clone, Default)]
pub struct RandomSampling {
    seed: Option<u64>,
    workers: usize,
}

impl RandomSampling {
    pub fn new(seed: Option<u64>, workers: usize) -> Self {
        Self {
            seed,
            workers: workers.max(1),
        }
    }

    fn rng_for(&self, worker: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(worker)),
            None => StdRng::from_entropy(),
        }
    }

    fn run_worker(
        &self,
        worker: u64,
        budget: u64,
        context: &TrialContext,
        limits: &SearchLimits,
    ) -> SearchOutcome {
        let mut sampler = PermutationSampler::new(self.rng_for(worker), budget);
        let mut outcome = SearchOutcome::default();

        for trial in 0..budget {
            if trial % STOP_CHECK_INTERVAL == 0 {
                if let Some(reason) = limits.should_stop() {
                    outcome.stats.stop = reason;
                    break;
                }
            }
            let order = sampler.next_order();
            outcome.record(context, &order);
        }
        outcome
    }
}

impl SearchStrategy for RandomSampling {
    fn name(&self) -> &'static str {
        "random"
    }

    fn search(&self, context: &TrialContext, limits: &SearchLimits) -> SearchOutcome {
        let workers = (self.workers as u64).clamp(1, limits.max_trials.max(1));
        if workers == 1 {
            return self.run_worker(0, limits.max_trials, context, limits);
        }

        let share = limits.max_trials / workers;
        let remainder = limits.max_trials % workers;
        (0..workers)
            .into_par_iter()
            .map(|worker| {
                let budget = share + u64::from(worker < remainder);
                self.run_worker(worker, budget, context, limits)
            })
            .reduce(SearchOutcome::default, SearchOutcome::merge)
    }
}

/// Uniform permutation source for one worker
///
/// Small budgets remember every order drawn and redraw repeats, so each trial
/// is a distinct permutation. Budgets above [`DISTINCT_TRIAL_LIMIT`] sample
/// with replacement.
struct PermutationSampler {
    rng: StdRng,
    order: SlotOrder,
    seen: Option<HashSet<SlotOrder>>,
}

impl PermutationSampler {
    fn new(rng: StdRng, budget: u64) -> Self {
        let seen = (budget <= DISTINCT_TRIAL_LIMIT)
            .then(|| HashSet::with_capacity(budget as usize));
        Self {
            rng,
            order: std::array::from_fn(|i| i),
            seen,
        }
    }

    fn next_order(&mut self) -> SlotOrder {
        loop {
            self.order.shuffle(&mut self.rng);
            if let Some(seen) = &mut self.seen {
                if !seen.insert(self.order) {
                    continue;
                }
            }
            return self.order;
        }
    }
}

/// Visits every permutation of the pool once (Heap's algorithm)
///
/// The trial budget does not apply; cancellation and the deadline do.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exhaustive;

impl SearchStrategy for Exhaustive {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn search(&self, context: &TrialContext, limits: &SearchLimits) -> SearchOutcome {
        let mut order: SlotOrder = std::array::from_fn(|i| i);
        let mut counters = [0usize; GAME_SIZE];
        let mut outcome = SearchOutcome::default();
        outcome.record(context, &order);

        let mut i = 1;
        while i < GAME_SIZE {
            if counters[i] < i {
                if outcome.stats.trials % STOP_CHECK_INTERVAL == 0 {
                    if let Some(reason) = limits.should_stop() {
                        outcome.stats.stop = reason;
                        break;
                    }
                }
                if i % 2 == 0 {
                    order.swap(0, i);
                } else {
                    order.swap(counters[i], i);
                }
                outcome.record(context, &order);
                counters[i] += 1;
                i = 1;
            } else {
                counters[i] = 0;
                i += 1;
            }
        }
        outcome
    }
}
