//! Operator command parsing.
//!
//! Free-form text from any front-end (chat, web, terminal) is parsed once
//! at the boundary into a [`Command`] value; everything downstream matches
//! on the enum and never re-inspects strings.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ChestKind
// ---------------------------------------------------------------------------

/// Which of the three storage chests a command refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChestKind {
    /// Receives surplus seed items from farming.
    Seed,
    /// Receives harvested crop products.
    Product,
    /// Receives mined ore.
    Ore,
}

impl fmt::Display for ChestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Seed => "seed chest",
            Self::Product => "crop chest",
            Self::Ore => "ore chest",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// CommandSource
// ---------------------------------------------------------------------------

/// Which front-end a command arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandSource {
    /// In-world chat line.
    Chat,
    /// Observer HTTP endpoint.
    Web,
    /// Local terminal stdin.
    Terminal,
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A recognized operator command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Cancel the active task and go idle.
    Stop,
    /// Follow a named player, or the nearest player when no name given.
    Follow {
        /// Explicit target username, if one was supplied.
        target: Option<String>,
    },
    /// Start the farming cycle.
    Farm,
    /// Run the chest-assignment handshake for one chest.
    SetChest(ChestKind),
    /// Start the branch-mining cycle.
    BranchMine,
    /// List the available commands.
    Help,
}

impl Command {
    /// Parse one line of operator input.
    ///
    /// The verb is the first whitespace-separated token, matched
    /// case-insensitively. `follow` takes an optional username argument;
    /// every other verb ignores trailing tokens. Unrecognized input
    /// returns `None` so front-ends can drop it silently.
    pub fn parse(text: &str) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let verb = tokens.next()?.to_lowercase();
        match verb.as_str() {
            "stop" => Some(Self::Stop),
            "follow" => Some(Self::Follow {
                target: tokens.next().map(ToOwned::to_owned),
            }),
            "farm" => Some(Self::Farm),
            "setseedchest" => Some(Self::SetChest(ChestKind::Seed)),
            "setcropchest" => Some(Self::SetChest(ChestKind::Product)),
            "setorechest" => Some(Self::SetChest(ChestKind::Ore)),
            "branchmine" => Some(Self::BranchMine),
            "help" => Some(Self::Help),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_parse_case_insensitively() {
        assert_eq!(Command::parse("STOP"), Some(Command::Stop));
        assert_eq!(Command::parse("Farm"), Some(Command::Farm));
        assert_eq!(Command::parse("branchMine"), Some(Command::BranchMine));
        assert_eq!(Command::parse("HELP"), Some(Command::Help));
    }

    #[test]
    fn follow_captures_optional_target() {
        assert_eq!(
            Command::parse("follow Steve"),
            Some(Command::Follow {
                target: Some("Steve".to_owned())
            })
        );
        assert_eq!(Command::parse("follow"), Some(Command::Follow { target: None }));
    }

    #[test]
    fn follow_target_keeps_its_case() {
        assert_eq!(
            Command::parse("FOLLOW AlexTheGreat"),
            Some(Command::Follow {
                target: Some("AlexTheGreat".to_owned())
            })
        );
    }

    #[test]
    fn chest_commands_map_to_kinds() {
        assert_eq!(
            Command::parse("setseedchest"),
            Some(Command::SetChest(ChestKind::Seed))
        );
        assert_eq!(
            Command::parse("setcropchest"),
            Some(Command::SetChest(ChestKind::Product))
        );
        assert_eq!(
            Command::parse("setorechest"),
            Some(Command::SetChest(ChestKind::Ore))
        );
    }

    #[test]
    fn unrecognized_input_is_none() {
        assert_eq!(Command::parse("dance"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        assert_eq!(Command::parse("  stop  "), Some(Command::Stop));
    }
}
