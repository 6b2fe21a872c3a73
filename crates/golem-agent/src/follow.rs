//! Follow behavior: keep pace with a player.
//!
//! The loop re-resolves the target's entity on a fixed interval and
//! re-aims movement at the fresh handle, so a player who re-logs (new
//! entity id) or walks out of range is picked up again the moment they
//! reappear. An out-of-sight target is skipped, never an error.

use std::time::Duration;

use golem_world::{EntityHandle, World};

use crate::agent::Agent;
use crate::controller::TaskToken;
use crate::error::TaskError;

/// Resolve the entity a follow request points at.
///
/// A named request looks that player up; an open request picks whoever
/// is nearest. `None` means nobody suitable is visible right now.
pub async fn resolve_target(world: &dyn World, requested: Option<&str>) -> Option<EntityHandle> {
    match requested {
        Some(name) => world.entity_of_player(name).await,
        None => world.nearest_player().await,
    }
}

/// Follow `username` until the task is cancelled.
///
/// Each cycle aims at the player's current entity and then waits out the
/// re-aim interval. A severed world session ends the loop; anything else
/// is logged and retried next cycle.
pub async fn run(agent: Agent, token: TaskToken, username: String) {
    let interval = Duration::from_millis(agent.config.follow.reaim_interval_ms);
    loop {
        if !agent.tasks.is_current(token) {
            break;
        }
        if let Some(entity) = agent.world.entity_of_player(&username).await {
            if let Err(error) = agent
                .world
                .follow_entity(entity.id, agent.config.follow.distance)
                .await
            {
                let error = TaskError::from(error);
                if error.is_fatal() {
                    tracing::error!(%error, "follow halted");
                    break;
                }
                tracing::warn!(%error, target = %username, "re-aim failed");
            }
        } else {
            tracing::debug!(target = %username, "follow target out of sight");
        }
        tokio::time::sleep(interval).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
