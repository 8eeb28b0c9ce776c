//! Persisted roster document
//!
//! The surrounding product stores a roster as
//! `{ id, version, playersTotalCount, players: PlayerRecord[] }`. Loading a
//! document rebuilds every player from its record, so ratings are always
//! recomputed from the stored rank.

use crate::error::{BalancerError, Result};
use crate::player::{Player, PlayerRecord};
use crate::roster::collection::Roster;
use crate::utils::generate_roster_id;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// Document format version written by this crate
pub const DOCUMENT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterDocument {
    #[serde(default = "generate_roster_id")]
    pub id: Uuid,
    pub version: String,
    #[serde(default)]
    pub players_total_count: usize,
    pub players: Vec<PlayerRecord>,
}

impl RosterDocument {
    /// Snapshot a roster into a document with the given ID
    pub fn from_roster(id: Uuid, roster: &Roster) -> Self {
        Self {
            id,
            version: DOCUMENT_VERSION.to_string(),
            players_total_count: roster.len(),
            players: roster.players().iter().map(Player::to_record).collect(),
        }
    }

    /// Rebuild a roster with the given capacity
    ///
    /// Duplicate names collapse to their first occurrence, as with [`Roster::add`].
    pub fn into_roster(self, capacity: usize) -> Result<Roster> {
        if self.version != DOCUMENT_VERSION {
            return Err(BalancerError::InvalidRosterDocument {
                reason: format!("unsupported version '{}'", self.version),
            }
            .into());
        }

        let mut roster = Roster::with_capacity(capacity);
        for record in self.players {
            let player = Player::try_from(record)?;
            roster.add(player)?;
        }

        if self.players_total_count != 0 && self.players_total_count != roster.len() {
            debug!(
                "Document declared {} players, loaded {}",
                self.players_total_count,
                roster.len()
            );
        }
        Ok(roster)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            BalancerError::InvalidRosterDocument {
                reason: e.to_string(),
            }
            .into()
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a document from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow::anyhow!("Failed to read roster file {}: {}", path.as_ref().display(), e)
        })?;
        Self::from_json(&content)
    }
}
