//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use roster_balancer::config::BalancerConfig;
use roster_balancer::rank::{Division, Rank, Tier};
use roster_balancer::types::{Lane, LaneSet, GAME_SIZE};
use roster_balancer::{Player, Roster};

/// Balancer configuration with a fixed seed
pub fn seeded_config(max_trials: u64) -> BalancerConfig {
    BalancerConfig {
        max_trials,
        seed: Some(1234),
        ..Default::default()
    }
}

/// Ten participating GOLD II players with no lane restrictions
pub fn uniform_roster() -> Roster {
    let mut roster = Roster::new();
    for i in 0..GAME_SIZE {
        roster
            .add(
                Player::new(format!("Uniform{}", i))
                    .with_rank(Rank::new(Tier::Gold, Division::Two))
                    .with_participation(true),
            )
            .unwrap();
    }
    roster
}

/// Ten participating players spread across tiers, each preferring one lane
/// and accepting a second
pub fn realistic_roster() -> Roster {
    let ranks = [
        (Tier::Iron, Division::One),
        (Tier::Bronze, Division::Three),
        (Tier::Silver, Division::Two),
        (Tier::Gold, Division::Four),
        (Tier::Gold, Division::One),
        (Tier::Platinum, Division::Two),
        (Tier::Emerald, Division::Three),
        (Tier::Diamond, Division::Four),
        (Tier::Master, Division::One),
        (Tier::Silver, Division::Four),
    ];

    let mut roster = Roster::new();
    for (i, (tier, division)) in ranks.into_iter().enumerate() {
        let main = Lane::for_slot(i);
        let sub = Lane::for_slot(i + 3);
        roster
            .add(
                Player::new(format!("Player{}", i))
                    .with_rank(Rank::new(tier, division))
                    .with_main_role(main)
                    .with_sub_role(sub)
                    .with_desired_roles(LaneSet::only(main).with(sub))
                    .with_participation(true),
            )
            .unwrap();
    }
    roster
}

/// Chat log lines in the lobby notification format
pub fn join_line(name: &str, tag: &str) -> String {
    format!("{} #{}がロビーに参加しました。", name, tag)
}

pub fn leave_line(name: &str, tag: &str) -> String {
    format!("{} #{}がロビーから退出しました。", name, tag)
}
