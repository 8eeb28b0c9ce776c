//! Bounded, name-deduplicated player roster
//!
//! A roster may hold more players than fit in one game; the ten marked as
//! participating form the pool the balancer splits.

use crate::config::RosterConfig;
use crate::error::{BalancerError, Result};
use crate::player::Player;
use crate::roster::chat_log::{parse_chat_log, LobbyEvent};
use crate::types::GAME_SIZE;
use tracing::{debug, info};

/// Outcome of a chat-log import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogImportSummary {
    /// Players added to the roster
    pub joined: usize,
    /// Players removed from the roster
    pub left: usize,
    /// Recognized lines that changed nothing (repeat joins, unknown leaves)
    pub unchanged: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    players: Vec<Player>,
    capacity: usize,
}

impl Roster {
    /// Create an empty roster with the default capacity
    pub fn new() -> Self {
        Self::with_config(&RosterConfig::default())
    }

    pub fn with_config(config: &RosterConfig) -> Self {
        Self::with_capacity(config.capacity)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            players: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Index of the first player with exactly this name
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|player| player.name() == name)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    /// Add a player; a player whose name is already present is silently ignored
    ///
    /// Returns whether the player was added.
    pub fn add(&mut self, player: Player) -> Result<bool> {
        if self.players.len() >= self.capacity {
            return Err(BalancerError::RosterFull {
                capacity: self.capacity,
            }
            .into());
        }

        if self.contains_name(player.name()) {
            debug!("Player '{}' already in roster, ignoring", player.name());
            return Ok(false);
        }

        debug!("Adding player '{}' to roster", player.name());
        self.players.push(player);
        Ok(true)
    }

    /// Remove and return the player at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<Player> {
        self.check_index(index)?;
        let player = self.players.remove(index);
        debug!("Removed player '{}' from roster", player.name());
        Ok(player)
    }

    /// Swap in an edited player at `index`, returning the previous value
    ///
    /// Renaming onto another member's name is rejected so names stay unique.
    pub fn replace(&mut self, index: usize, player: Player) -> Result<Player> {
        self.check_index(index)?;
        if let Some(existing) = self.position_of(player.name()) {
            if existing != index {
                return Err(BalancerError::DuplicateName {
                    name: player.name().to_string(),
                }
                .into());
            }
        }
        Ok(std::mem::replace(&mut self.players[index], player))
    }

    /// Mark the player at `index` as taking part in the next game or not
    pub fn set_participating(&mut self, index: usize, participating: bool) -> Result<()> {
        self.check_index(index)?;
        let player = self.players[index].clone().with_participation(participating);
        self.players[index] = player;
        Ok(())
    }

    /// Apply lobby join/leave lines in order
    ///
    /// The import is all-or-nothing: if a join would exceed capacity the roster
    /// is left as it was and the capacity error is returned.
    pub fn import_from_log(&mut self, text: &str) -> Result<LogImportSummary> {
        let events = parse_chat_log(text);
        if events.is_empty() {
            return Ok(LogImportSummary::default());
        }

        let mut staged = self.clone();
        let mut summary = LogImportSummary::default();
        for event in events {
            match event {
                LobbyEvent::Joined { name, .. } => {
                    // A repeat join is a no-op even when the roster is full
                    if staged.contains_name(&name) {
                        summary.unchanged += 1;
                    } else {
                        staged.add(Player::new(name))?;
                        summary.joined += 1;
                    }
                }
                LobbyEvent::Left { name, .. } => match staged.position_of(&name) {
                    Some(index) => {
                        staged.remove_at(index)?;
                        summary.left += 1;
                    }
                    None => summary.unchanged += 1,
                },
            }
        }

        *self = staged;
        info!(
            "Imported chat log: {} joined, {} left, {} unchanged, {} in roster",
            summary.joined,
            summary.left,
            summary.unchanged,
            self.len()
        );
        Ok(summary)
    }

    /// Players marked as participating, in roster order
    pub fn participants(&self) -> Vec<Player> {
        self.players
            .iter()
            .filter(|player| player.is_participating())
            .cloned()
            .collect()
    }

    pub fn participating_count(&self) -> usize {
        self.players
            .iter()
            .filter(|player| player.is_participating())
            .count()
    }

    /// Whether exactly one game's worth of players is participating
    pub fn is_dividable(&self) -> bool {
        self.participating_count() == GAME_SIZE
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.players.len() {
            return Err(BalancerError::IndexOutOfRange {
                index,
                len: self.players.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::{Division, Rank, Tier};

    fn full_game_roster() -> Roster {
        let mut roster = Roster::new();
        for i in 0..10 {
            roster
                .add(Player::new(format!("Player{}", i)).with_participation(true))
                .unwrap();
        }
        roster
    }

    fn names(roster: &Roster) -> Vec<&str> {
        roster.players().iter().map(Player::name).collect()
    }

    #[test]
    fn test_new_roster_is_empty() {
        let roster = Roster::new();
        assert!(roster.is_empty());
        assert_eq!(roster.capacity(), 50);
        assert!(!roster.is_dividable());
    }

    #[test]
    fn test_add_player() {
        let mut roster = Roster::new();
        assert!(roster.add(Player::new("Alice")).unwrap());
        assert_eq!(names(&roster), vec!["Alice"]);
    }

    #[test]
    fn test_duplicate_name_is_ignored() {
        let mut roster = Roster::new();
        roster.add(Player::new("Alice")).unwrap();
        let duplicate = Player::new("Alice").with_rank(Rank::new(Tier::Iron, Division::Four));
        assert!(!roster.add(duplicate).unwrap());
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.players()[0].rating(), 1400);

        // Names match case-sensitively
        assert!(roster.add(Player::new("alice")).unwrap());
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_capacity_error_leaves_roster_unchanged() {
        let mut roster = Roster::new();
        for i in 0..50 {
            roster.add(Player::new(format!("Player{}", i))).unwrap();
        }
        let before = roster.clone();

        let err = roster.add(Player::new("ExtraPlayer")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BalancerError>(),
            Some(&BalancerError::RosterFull { capacity: 50 })
        );
        assert_eq!(roster, before);
    }

    #[test]
    fn test_remove_at() {
        let mut roster = Roster::new();
        roster.add(Player::new("Alice")).unwrap();
        roster.add(Player::new("Bob")).unwrap();
        let removed = roster.remove_at(0).unwrap();
        assert_eq!(removed.name(), "Alice");
        assert_eq!(names(&roster), vec!["Bob"]);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut roster = Roster::new();
        let err = roster.remove_at(0).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BalancerError>(),
            Some(&BalancerError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_replace_updates_in_place() {
        let mut roster = Roster::new();
        roster.add(Player::new("Alice")).unwrap();
        roster.add(Player::new("Bob")).unwrap();

        let edited = roster.players()[1]
            .clone()
            .with_rank(Rank::new(Tier::Diamond, Division::One));
        let previous = roster.replace(1, edited).unwrap();
        assert_eq!(previous.rating(), 1400);
        assert_eq!(roster.players()[1].rating(), 2700);

        let clash = roster.players()[1].clone().with_name("Alice");
        assert!(roster.replace(1, clash).is_err());
        assert!(roster.replace(7, Player::new("Zed")).is_err());
    }

    #[test]
    fn test_import_adds_new_players() {
        let mut roster = Roster::new();
        roster.add(Player::new("Charlie")).unwrap();
        let logs = "
            Alice #1234がロビーに参加しました。
            Bob #5678がロビーに参加しました。
        ";
        let summary = roster.import_from_log(logs).unwrap();
        assert_eq!(summary.joined, 2);
        assert_eq!(names(&roster), vec!["Charlie", "Alice", "Bob"]);
    }

    #[test]
    fn test_import_skips_existing_players() {
        let mut roster = Roster::new();
        roster.add(Player::new("Alice").with_participation(true)).unwrap();
        let logs = "Alice #1234がロビーに参加しました。\nBob #5678がロビーに参加しました。";
        let summary = roster.import_from_log(logs).unwrap();
        assert_eq!(summary.unchanged, 1);
        assert_eq!(names(&roster), vec!["Alice", "Bob"]);
        assert!(roster.players()[0].is_participating());
    }

    #[test]
    fn test_import_join_then_leave_cancels() {
        let mut roster = Roster::new();
        let logs = "Alice #1がロビーに参加しました。\nAlice #1がロビーから退出しました。";
        roster.import_from_log(logs).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_import_leave_without_join_is_noop() {
        let mut roster = Roster::new();
        roster.add(Player::new("Bob")).unwrap();
        let summary = roster
            .import_from_log("Alice #1がロビーから退出しました。")
            .unwrap();
        assert_eq!(summary.unchanged, 1);
        assert_eq!(names(&roster), vec!["Bob"]);
    }

    #[test]
    fn test_import_leave_removes_existing_member() {
        let mut roster = Roster::new();
        roster.add(Player::new("Alice")).unwrap();
        roster.add(Player::new("Bob")).unwrap();
        roster
            .import_from_log("Alice #1がロビーから退出しました。")
            .unwrap();
        assert_eq!(names(&roster), vec!["Bob"]);
    }

    #[test]
    fn test_empty_import_keeps_members() {
        let mut roster = full_game_roster();
        let before = roster.clone();
        assert_eq!(
            roster.import_from_log("").unwrap(),
            LogImportSummary::default()
        );
        assert_eq!(roster, before);
    }

    #[test]
    fn test_import_over_capacity_is_atomic() {
        let mut roster = Roster::with_capacity(2);
        roster.add(Player::new("Alice")).unwrap();
        let before = roster.clone();
        let logs = "Bob #1がロビーに参加しました。\nCarol #2がロビーに参加しました。";
        let err = roster.import_from_log(logs).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BalancerError>(),
            Some(BalancerError::RosterFull { capacity: 2 })
        ));
        assert_eq!(roster, before);
    }

    #[test]
    fn test_is_dividable() {
        let mut roster = full_game_roster();
        assert!(roster.is_dividable());
        assert_eq!(roster.participants().len(), 10);

        roster.add(Player::new("Bench")).unwrap();
        assert!(roster.is_dividable());

        roster.set_participating(10, true).unwrap();
        assert!(!roster.is_dividable());

        roster.set_participating(0, false).unwrap();
        roster.set_participating(10, false).unwrap();
        assert_eq!(roster.participating_count(), 9);
        assert!(!roster.is_dividable());
    }
}
