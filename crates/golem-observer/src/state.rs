//! Shared application state for the observer server.
//!
//! Every handler receives an [`AppState`] clone wrapped in an [`Arc`]. The
//! state is deliberately thin: it holds the [`Agent`] handle (which is itself
//! a bundle of shared references) plus the session start timestamp, so
//! cloning it never copies world data.

use chrono::{DateTime, Utc};
use golem_agent::Agent;
use golem_world::ChatEvent;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Shared state handed to every observer handler.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the running agent: world access, task slot, registries.
    pub agent: Agent,
    /// Wall-clock time the session started, reported in status payloads.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create the observer state around a running agent.
    pub fn new(agent: Agent) -> Self {
        Self {
            agent,
            started_at: Utc::now(),
        }
    }

    /// Subscribe to the world's chat stream.
    ///
    /// Each `WebSocket` client gets its own receiver; slow clients lag and
    /// skip rather than stalling the world.
    pub fn subscribe_chat(&self) -> broadcast::Receiver<ChatEvent> {
        self.agent.world.chat_events()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use golem_agent::BehaviorConfig;
    use golem_world::SimWorld;
    use std::sync::Arc;

    #[tokio::test]
    async fn chat_subscription_sees_world_chat() {
        let sim = SimWorld::builder().agent_name("golem").build();
        let agent = Agent::new(Arc::new(sim.clone()), BehaviorConfig::default());
        let state = AppState::new(agent);

        let mut rx = state.subscribe_chat();
        sim.push_chat("steve", "hello there");

        let event = rx.recv().await.unwrap();
        assert_eq!(event.sender, "steve");
        assert_eq!(event.message, "hello there");
    }

    #[tokio::test]
    async fn started_at_is_in_the_past() {
        let sim = SimWorld::builder().build();
        let agent = Agent::new(Arc::new(sim), BehaviorConfig::default());
        let state = AppState::new(agent);
        assert!(state.started_at <= Utc::now());
    }
}
