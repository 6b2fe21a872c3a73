//! Command dispatch: one entry point for every operator front-end.
//!
//! Chat, terminal, and web input all funnel through [`handle_line`],
//! which parses the text once and hands the tagged command to
//! [`dispatch`]. Task commands cancel the previous task before checking
//! their own preconditions, so a rejected command always leaves the
//! agent idle rather than half-switched.

use golem_types::{ChestKind, Command, CommandSource, TaskKind};

use crate::agent::Agent;
use crate::storage::assign_chest;
use crate::{farm, follow, mine};

/// The reply to `help`.
pub const HELP_TEXT: &str = "Commands: stop, follow [player], farm, setseedchest, setcropchest, setorechest, branchmine, help";

/// Parse and dispatch one line of operator input.
///
/// `None` means the line is not a recognized command; front-ends drop
/// it silently.
pub async fn handle_line(agent: &Agent, line: &str, source: CommandSource) -> Option<String> {
    let command = Command::parse(line)?;
    Some(dispatch(agent, command, source).await)
}

/// Execute a parsed command and produce the operator-facing reply.
pub async fn dispatch(agent: &Agent, command: Command, source: CommandSource) -> String {
    tracing::info!(?command, ?source, "dispatching command");
    match command {
        Command::Stop => {
            agent.stop().await;
            "Stopped.".to_owned()
        }
        Command::Follow { target } => follow_command(agent, target.as_deref()).await,
        Command::Farm => farm_command(agent).await,
        Command::SetChest(kind) => set_chest_command(agent, kind).await,
        Command::BranchMine => branch_mine_command(agent).await,
        Command::Help => HELP_TEXT.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Per-command handlers
// ---------------------------------------------------------------------------

async fn follow_command(agent: &Agent, target: Option<&str>) -> String {
    agent.stop().await;
    let Some(entity) = follow::resolve_target(agent.world.as_ref(), target).await else {
        return match target {
            Some(name) => format!("I can't see a player named {name}."),
            None => "No players nearby to follow.".to_owned(),
        };
    };
    let token = agent.begin_task(TaskKind::Following).await;
    let username = entity.username;
    let handle = tokio::spawn(follow::run(agent.clone(), token, username.clone()));
    agent.tasks.attach(token, handle).await;
    format!("Following {username}.")
}

async fn farm_command(agent: &Agent) -> String {
    let token = agent.begin_task(TaskKind::Farming).await;
    let handle = tokio::spawn(farm::run(agent.clone(), token));
    agent.tasks.attach(token, handle).await;
    agent.world.say("Starting the farm rounds.").await;
    "Farming.".to_owned()
}

async fn set_chest_command(agent: &Agent, kind: ChestKind) -> String {
    let found = assign_chest(
        agent.world.as_ref(),
        &agent.config.chest,
        agent.chests.as_ref(),
        kind,
    )
    .await;
    match found {
        Some(cell) => format!("Registered the {kind} at {cell}."),
        None => format!(
            "No chest found within {} blocks; nothing registered.",
            agent.config.chest.scan_radius
        ),
    }
}

async fn branch_mine_command(agent: &Agent) -> String {
    agent.stop().await;
    if agent.chests.read().await.get(ChestKind::Ore).is_none() {
        return "Set an ore chest first (setorechest) so I can unload.".to_owned();
    }
    let token = agent.begin_task(TaskKind::BranchMining).await;
    let handle = tokio::spawn(mine::run(agent.clone(), token));
    agent.tasks.attach(token, handle).await;
    agent.world.say("Starting the branch mine.").await;
    "Branch mining.".to_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use golem_types::BlockPos;
    use golem_world::SimWorld;

    use crate::config::BehaviorConfig;

    use super::*;

    fn agent_over(sim: &SimWorld) -> Agent {
        Agent::new(Arc::new(sim.clone()), BehaviorConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn stop_replies_and_goes_idle() {
        let sim = SimWorld::builder().build();
        let agent = agent_over(&sim);
        agent.begin_task(TaskKind::Farming).await;

        let reply = handle_line(&agent, "stop", CommandSource::Terminal).await;

        assert_eq!(reply.as_deref(), Some("Stopped."));
        assert_eq!(agent.current_task().await, TaskKind::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_input_is_ignored() {
        let sim = SimWorld::builder().build();
        let agent = agent_over(&sim);

        let reply = handle_line(&agent, "dance", CommandSource::Chat).await;

        assert_eq!(reply, None);
        assert_eq!(agent.current_task().await, TaskKind::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn follow_with_unknown_target_rejects_and_stays_idle() {
        let sim = SimWorld::builder().build();
        let agent = agent_over(&sim);

        let reply = handle_line(&agent, "follow Steve", CommandSource::Chat)
            .await
            .unwrap();

        assert_eq!(reply, "I can't see a player named Steve.");
        assert_eq!(agent.current_task().await, TaskKind::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn follow_starts_the_loop_and_reports_the_target() {
        let sim = SimWorld::builder()
            .player("Steve", BlockPos::new(4, 64, 0))
            .build();
        let agent = agent_over(&sim);

        let reply = handle_line(&agent, "follow", CommandSource::Chat)
            .await
            .unwrap();

        assert_eq!(reply, "Following Steve.");
        assert_eq!(agent.current_task().await, TaskKind::Following);
        assert_eq!(agent.tasks.pending_work().await, 1);
        agent.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn branchmine_without_ore_chest_rejects_and_stays_idle() {
        let sim = SimWorld::builder().build();
        let agent = agent_over(&sim);

        let reply = handle_line(&agent, "branchmine", CommandSource::Web)
            .await
            .unwrap();

        assert_eq!(reply, "Set an ore chest first (setorechest) so I can unload.");
        assert_eq!(agent.current_task().await, TaskKind::Idle);
        assert_eq!(agent.tasks.pending_work().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn branchmine_with_chest_starts_and_announces() {
        let chest = BlockPos::new(6, 64, 0);
        let sim = SimWorld::builder().chest(chest).build();
        let agent = agent_over(&sim);
        agent.chests.write().await.set(ChestKind::Ore, chest);

        let reply = handle_line(&agent, "branchmine", CommandSource::Chat)
            .await
            .unwrap();

        assert_eq!(reply, "Branch mining.");
        assert_eq!(agent.current_task().await, TaskKind::BranchMining);
        agent.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn farm_supersedes_a_running_follow() {
        let sim = SimWorld::builder()
            .player("Steve", BlockPos::new(4, 64, 0))
            .build();
        let agent = agent_over(&sim);

        let first = handle_line(&agent, "follow Steve", CommandSource::Chat)
            .await
            .unwrap();
        assert_eq!(first, "Following Steve.");
        let reply = handle_line(&agent, "farm", CommandSource::Chat)
            .await
            .unwrap();

        assert_eq!(reply, "Farming.");
        assert_eq!(agent.current_task().await, TaskKind::Farming);
        // Only the farm loop remains attached.
        assert_eq!(agent.tasks.pending_work().await, 1);
        agent.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn setorechest_registers_a_nearby_chest() {
        let chest = BlockPos::new(3, 64, 0);
        let sim = SimWorld::builder().chest(chest).build();
        let agent = agent_over(&sim);

        let reply = handle_line(&agent, "setorechest", CommandSource::Chat)
            .await
            .unwrap();

        assert_eq!(reply, "Registered the ore chest at (3, 64, 0).");
        assert_eq!(
            agent.chests.read().await.get(ChestKind::Ore),
            Some(chest)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn setchest_without_a_chest_reports_the_radius() {
        let sim = SimWorld::builder().build();
        let agent = agent_over(&sim);

        let reply = handle_line(&agent, "setseedchest", CommandSource::Chat)
            .await
            .unwrap();

        assert_eq!(reply, "No chest found within 10 blocks; nothing registered.");
    }

    #[tokio::test(start_paused = true)]
    async fn help_lists_the_commands() {
        let sim = SimWorld::builder().build();
        let agent = agent_over(&sim);

        let reply = handle_line(&agent, "help", CommandSource::Terminal)
            .await
            .unwrap();

        assert!(reply.contains("stop"));
        assert!(reply.contains("follow [player]"));
        assert!(reply.contains("branchmine"));
    }
}
