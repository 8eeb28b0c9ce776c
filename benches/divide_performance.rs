//! Performance benchmarks for arrangement search

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use roster_balancer::balancer::{Evaluator, RandomSampling, SearchLimits, SearchStrategy, TrialContext};
use roster_balancer::config::BalancerConfig;
use roster_balancer::rank::{Division, Rank, Tier};
use roster_balancer::types::{Lane, LaneSet, GAME_SIZE};
use roster_balancer::{Player, Roster, TeamBalancer};

fn create_bench_roster() -> Roster {
    let mut roster = Roster::new();
    for i in 0..GAME_SIZE {
        let main = Lane::for_slot(i);
        let player = Player::new(format!("Bench{}", i))
            .with_rank(Rank::new(Tier::ALL[i % 9], Division::ALL[i % 4]))
            .with_main_role(main)
            .with_sub_role(Lane::for_slot(i + 1))
            .with_desired_roles(LaneSet::only(main).with(Lane::for_slot(i + 1)))
            .with_role_fixed(i == 0)
            .with_participation(true);
        roster.add(player).unwrap();
    }
    roster
}

fn bench_single_trial(c: &mut Criterion) {
    let roster = create_bench_roster();
    let pool = roster.participants();
    let context = TrialContext::new(&pool, &Evaluator::default()).unwrap();
    let order = [3, 1, 4, 0, 5, 9, 2, 6, 8, 7];

    c.bench_function("run_trial", |b| {
        b.iter(|| black_box(context.run_trial(black_box(&order))))
    });
}

fn bench_random_search(c: &mut Criterion) {
    let roster = create_bench_roster();
    let pool = roster.participants();
    let context = TrialContext::new(&pool, &Evaluator::default()).unwrap();
    let limits = SearchLimits::new(10_000);

    let mut group = c.benchmark_group("random_search_10k");
    for workers in [1, 4] {
        let strategy = RandomSampling::new(Some(42), workers);
        group.bench_function(format!("{}_workers", workers), |b| {
            b.iter(|| black_box(strategy.search(&context, &limits)))
        });
    }
    group.finish();
}

fn bench_divide(c: &mut Criterion) {
    let roster = create_bench_roster();
    let mut balancer = TeamBalancer::new(BalancerConfig {
        max_trials: 100_000,
        seed: Some(7),
        ..Default::default()
    })
    .unwrap();

    let mut group = c.benchmark_group("divide");
    group.sample_size(10);
    group.bench_function("default_trials", |b| {
        b.iter(|| black_box(balancer.divide(&roster).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_single_trial, bench_random_search, bench_divide);
criterion_main!(benches);
