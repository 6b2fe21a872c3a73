//! The exclusive task kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the agent is doing right now.
///
/// Exactly one kind is active at any instant; the task controller owns
/// the transition between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    /// No behavior running.
    #[default]
    Idle,
    /// Chasing a tracked player entity.
    Following,
    /// Running the harvest/replant/deposit cycle.
    Farming,
    /// Excavating the branch-tunnel comb.
    BranchMining,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Following => "following",
            Self::Farming => "farming",
            Self::BranchMining => "branch-mining",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(TaskKind::default(), TaskKind::Idle);
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&TaskKind::BranchMining).unwrap_or_default();
        assert_eq!(json, "\"branch-mining\"");
    }
}
