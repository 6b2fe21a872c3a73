//! Error types for world operations.
//!
//! All fallible world primitives return [`WorldError`]. Behavior cycles
//! catch these at the cycle boundary; only [`WorldError::Disconnected`]
//! is treated as unrecoverable.

use golem_types::BlockPos;

/// Errors reported by the world-interaction layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WorldError {
    /// Movement planning failed: no path to the goal, or the goal became
    /// unreachable mid-travel.
    #[error("no path to {goal}")]
    Unreachable {
        /// The movement goal that could not be reached.
        goal: BlockPos,
    },

    /// The world rejected a break, place, or equip action.
    #[error("{action} rejected: {reason}")]
    ActionFailed {
        /// Short name of the rejected action.
        action: String,
        /// World-provided reason for the rejection.
        reason: String,
    },

    /// No block present where one was required.
    #[error("no block at {0}")]
    BlockMissing(BlockPos),

    /// A player could not be resolved to a live entity.
    #[error("player not found: {0}")]
    EntityNotFound(String),

    /// The world session is gone. Nothing in the behavior layer can
    /// recover this; it propagates uncaught.
    #[error("world session disconnected")]
    Disconnected,
}

impl WorldError {
    /// Shorthand for an [`WorldError::ActionFailed`] value.
    pub fn action_failed(action: &str, reason: impl Into<String>) -> Self {
        Self::ActionFailed {
            action: action.to_owned(),
            reason: reason.into(),
        }
    }
}
