//! Error types for behavior cycles.
//!
//! Per-step failures inside a cycle surface as [`TaskError`] and are
//! caught at the cycle boundary: logged, sometimes chat-reported, and
//! followed by a reschedule. Only a lost world session is fatal to the
//! whole loop.

use golem_types::BlockPos;
use golem_world::WorldError;

/// Errors raised by behavior steps.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TaskError {
    /// None of the container's horizontal neighbors is passable, so there
    /// is nowhere to stand for the transaction.
    #[error("no open side to stand at next to {0}")]
    NoAccess(BlockPos),

    /// A container was registered at this cell but no block is there.
    #[error("no container at {0}")]
    ContainerMissing(BlockPos),

    /// An item the cycle needs is not carried (e.g. seed to replant).
    #[error("missing required item: {0}")]
    MissingResource(String),

    /// The world layer failed or rejected an operation.
    #[error(transparent)]
    World(#[from] WorldError),
}

impl TaskError {
    /// Whether this error ends the behavior loop rather than one cycle.
    ///
    /// Only a severed world session qualifies; everything else is retried
    /// on the next cycle.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::World(WorldError::Disconnected))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_disconnect_is_fatal() {
        assert!(TaskError::World(WorldError::Disconnected).is_fatal());
        assert!(!TaskError::NoAccess(BlockPos::new(0, 0, 0)).is_fatal());
        assert!(!TaskError::MissingResource("wheat_seeds".to_owned()).is_fatal());
        assert!(!TaskError::World(WorldError::Unreachable {
            goal: BlockPos::new(1, 2, 3)
        })
        .is_fatal());
    }
}
