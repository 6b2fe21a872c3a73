//! The shared agent handle.
//!
//! [`Agent`] bundles the world connection, configuration, item tables,
//! chest registry, and task controller behind cheap clones. Behaviors,
//! the command dispatcher, and the observer API all hold one.

use std::sync::Arc;

use tokio::sync::RwLock;

use golem_types::{CropRegistry, OreCatalog, TaskKind};
use golem_world::World;

use crate::config::BehaviorConfig;
use crate::controller::{TaskController, TaskToken};
use crate::storage::ChestRegistry;

/// Shared handle to everything a behavior needs.
///
/// Every clone sees the same world, registry, and task state.
#[derive(Clone)]
pub struct Agent {
    /// World connection used by every behavior.
    pub world: Arc<dyn World>,
    /// Behavior tuning knobs, fixed at startup.
    pub config: Arc<BehaviorConfig>,
    /// Crop maturity and product table.
    pub crops: Arc<CropRegistry>,
    /// Ore block catalog.
    pub ores: Arc<OreCatalog>,
    /// Registered storage chest locations.
    pub chests: Arc<RwLock<ChestRegistry>>,
    /// Exclusive-task controller.
    pub tasks: Arc<TaskController>,
}

impl Agent {
    /// Create an agent over `world` with the standard crop and ore tables.
    pub fn new(world: Arc<dyn World>, config: BehaviorConfig) -> Self {
        Self {
            world,
            config: Arc::new(config),
            crops: Arc::new(CropRegistry::standard()),
            ores: Arc::new(OreCatalog::standard()),
            chests: Arc::new(RwLock::new(ChestRegistry::new())),
            tasks: Arc::new(TaskController::new()),
        }
    }

    /// The task currently holding the agent.
    pub async fn current_task(&self) -> TaskKind {
        self.tasks.current().await
    }

    /// Cancel whatever is running and halt any in-flight movement.
    pub async fn stop(&self) {
        self.tasks.cancel_all().await;
        self.world.stop_movement().await;
    }

    /// Cancel the previous task and claim the agent for `kind`.
    ///
    /// The returned token must accompany the task's loop handle into
    /// [`TaskController::attach`]; the loop checks it before each cycle.
    pub async fn begin_task(&self, kind: TaskKind) -> TaskToken {
        let token = self.tasks.begin(kind).await;
        self.world.stop_movement().await;
        token
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use golem_world::{Movement, SimWorld};

    use super::*;

    fn test_agent(sim: &SimWorld) -> Agent {
        Agent::new(Arc::new(sim.clone()), BehaviorConfig::default())
    }

    #[tokio::test]
    async fn new_agent_is_idle() {
        let sim = SimWorld::builder().build();
        let agent = test_agent(&sim);
        assert_eq!(agent.current_task().await, TaskKind::Idle);
    }

    #[tokio::test]
    async fn begin_task_halts_movement_and_switches_kind() {
        let sim = SimWorld::builder().build();
        let agent = test_agent(&sim);

        agent.begin_task(TaskKind::Farming).await;

        assert_eq!(agent.current_task().await, TaskKind::Farming);
        assert_eq!(sim.movements().await, vec![Movement::Stop]);
    }

    #[tokio::test]
    async fn stop_returns_to_idle() {
        let sim = SimWorld::builder().build();
        let agent = test_agent(&sim);

        agent.begin_task(TaskKind::BranchMining).await;
        agent.stop().await;

        assert_eq!(agent.current_task().await, TaskKind::Idle);
    }
}
