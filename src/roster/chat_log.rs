//! Lobby chat-log parsing
//!
//! The game client prints one line per lobby membership change:
//!
//! ```text
//! Player1 #JP1がロビーに参加しました。
//! Player1 #JP1がロビーから退出しました。
//! ```
//!
//! Lines that do not match either form are ignored.

use once_cell::sync::Lazy;
use regex::Regex;

static LOBBY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>.+?)\s*#(?P<tag>.+?)がロビー(?:(?P<joined>に参加しました)|(?P<left>から退出しました))")
        .expect("lobby line pattern is valid")
});

/// One membership change read from the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobbyEvent {
    Joined { name: String, tag: String },
    Left { name: String, tag: String },
}

impl LobbyEvent {
    pub fn name(&self) -> &str {
        match self {
            LobbyEvent::Joined { name, .. } | LobbyEvent::Left { name, .. } => name,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            LobbyEvent::Joined { tag, .. } | LobbyEvent::Left { tag, .. } => tag,
        }
    }
}

/// Parse a single log line
pub fn parse_line(line: &str) -> Option<LobbyEvent> {
    let captures = LOBBY_LINE.captures(line.trim())?;
    let name = captures.name("name")?.as_str().trim().to_string();
    let tag = captures.name("tag")?.as_str().trim().to_string();
    if name.is_empty() {
        return None;
    }

    if captures.name("joined").is_some() {
        Some(LobbyEvent::Joined { name, tag })
    } else {
        Some(LobbyEvent::Left { name, tag })
    }
}

/// Parse every recognizable line, in order
pub fn parse_chat_log(text: &str) -> Vec<LobbyEvent> {
    text.lines().filter_map(parse_line).collect()
}

/// Net lobby membership after replaying the log: `(name, tag)` in join order
pub fn present_members(text: &str) -> Vec<(String, String)> {
    let mut members: Vec<(String, String)> = Vec::new();
    for event in parse_chat_log(text) {
        match event {
            LobbyEvent::Joined { name, tag } => {
                if !members.iter().any(|(existing, _)| *existing == name) {
                    members.push((name, tag));
                }
            }
            LobbyEvent::Left { name, .. } => {
                if let Some(position) = members.iter().position(|(existing, _)| *existing == name) {
                    members.remove(position);
                }
            }
        }
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join_lines() {
        let logs = "Player1 #JP1がロビーに参加しました。\nPlayer2 #meowがロビーに参加しました。\nひろし #123がロビーに参加しました。";
        let events = parse_chat_log(logs);
        assert_eq!(
            events,
            vec![
                LobbyEvent::Joined {
                    name: "Player1".to_string(),
                    tag: "JP1".to_string()
                },
                LobbyEvent::Joined {
                    name: "Player2".to_string(),
                    tag: "meow".to_string()
                },
                LobbyEvent::Joined {
                    name: "ひろし".to_string(),
                    tag: "123".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_leave_line() {
        let event = parse_line("  Player1 #JP1がロビーから退出しました。  ").unwrap();
        assert_eq!(
            event,
            LobbyEvent::Left {
                name: "Player1".to_string(),
                tag: "JP1".to_string()
            }
        );
        assert_eq!(event.name(), "Player1");
        assert_eq!(event.tag(), "JP1");
    }

    #[test]
    fn test_names_with_spaces() {
        let event = parse_line("The Big Cheese #EUWがロビーに参加しました。").unwrap();
        assert_eq!(event.name(), "The Big Cheese");
    }

    #[test]
    fn test_unparseable_lines_ignored() {
        let logs = "hello there\n#onlytagがロビーに参加しました。\nPlayer1 JP1がロビーに参加しました。\n\nPlayer3 #xがロビーに参加しました。";
        let events = parse_chat_log(logs);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "Player3");
    }

    #[test]
    fn test_present_members_applies_leaves_in_order() {
        let logs = "Player1 #JP1がロビーに参加しました。\nPlayer2 #meowがロビーに参加しました。\nPlayer1 #JP1がロビーから退出しました。\nひろし #123がロビーに参加しました。";
        assert_eq!(
            present_members(logs),
            vec![
                ("Player2".to_string(), "meow".to_string()),
                ("ひろし".to_string(), "123".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_log() {
        assert!(parse_chat_log("").is_empty());
        assert!(present_members("").is_empty());
    }
}
