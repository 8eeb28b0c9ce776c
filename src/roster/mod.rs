//! Roster management
//!
//! This module holds the player roster, the lobby chat-log importer that drives
//! membership changes, and the persisted roster document.

pub mod chat_log;
pub mod collection;
pub mod document;

// Re-export commonly used types
pub use chat_log::{parse_chat_log, present_members, LobbyEvent};
pub use collection::{LogImportSummary, Roster};
pub use document::{RosterDocument, DOCUMENT_VERSION};
