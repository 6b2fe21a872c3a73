//! Branch-mining behavior: tunnel comb with threshold-driven drop-offs.
//!
//! The cursor tracks one tunnel at a time: origin snapshot, travel
//! direction, and the step count along the current branch. Each cycle
//! runs deposit-check, cross-section excavation, and a one-cell advance,
//! in that fixed order, so the worst-case ore overcarry is a single
//! cross-section. Finishing a branch rotates the cursor clockwise and
//! relocates through the old origin to the next tunnel mouth.

use std::time::Duration;

use golem_types::{BlockPos, ChestKind, Direction};
use golem_world::WorldError;

use crate::agent::Agent;
use crate::controller::TaskToken;
use crate::error::TaskError;
use crate::monitor::needs_deposit;
use crate::storage::deposit_at;

// ---------------------------------------------------------------------------
// MiningCursor
// ---------------------------------------------------------------------------

/// Where the comb stands: branch origin, travel direction, progress.
///
/// Reset to a fresh value every time branch-mining starts; mutated once
/// per advance and once per rotation, nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningCursor {
    origin: BlockPos,
    direction: Direction,
    steps: u32,
    ores_collected: u64,
}

impl MiningCursor {
    /// Start a comb at `origin`, heading north.
    pub const fn new(origin: BlockPos) -> Self {
        Self {
            origin,
            direction: Direction::North,
            steps: 0,
            ores_collected: 0,
        }
    }

    /// Travel direction of the current branch.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Steps advanced along the current branch.
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    /// Ore blocks broken since the task started.
    pub const fn ores_collected(&self) -> u64 {
        self.ores_collected
    }

    /// Record one step of forward progress.
    pub const fn advance(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    /// Whether the current branch has run its full length.
    pub const fn branch_complete(&self, branch_length: u32) -> bool {
        self.steps >= branch_length
    }

    /// Record one broken ore block.
    pub const fn record_ore(&mut self) {
        self.ores_collected = self.ores_collected.saturating_add(1);
    }

    /// Turn the comb onto its next branch: rotate clockwise, zero the
    /// step counter, and shift the origin `spacing` cells perpendicular
    /// to the branch just completed.
    ///
    /// Returns `(previous_origin, next_origin)` for the relocation moves.
    pub const fn rotate(&mut self, spacing: i64) -> (BlockPos, BlockPos) {
        let previous = self.origin;
        self.direction = self.direction.clockwise();
        self.steps = 0;
        self.origin = self.origin.step_n(self.direction, spacing);
        (previous, self.origin)
    }
}

/// The seven cells cleared per step: a three-high column at `floor`
/// plus two-high walls one cell to each side, sides taken perpendicular
/// to the travel direction.
pub const fn cross_section(floor: BlockPos, direction: Direction) -> [BlockPos; 7] {
    let left = floor.step(direction.left());
    let right = floor.step(direction.right());
    [
        floor,
        floor.up(),
        floor.up().up(),
        left,
        left.up(),
        right,
        right.up(),
    ]
}

// ---------------------------------------------------------------------------
// Cycle
// ---------------------------------------------------------------------------

/// What one mining cycle accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MineOutcome {
    /// Cleared a cross-section and advanced one cell.
    Advanced,
    /// Finished a branch and relocated to the next tunnel mouth.
    Rotated {
        /// Travel direction of the new branch.
        direction: Direction,
    },
}

/// Run one mining cycle: deposit check, excavate, advance, maybe rotate.
///
/// # Errors
///
/// Returns the first failed step; the loop treats every error as
/// retryable except a severed world session.
pub async fn mine_cycle(
    agent: &Agent,
    cursor: &mut MiningCursor,
) -> Result<MineOutcome, TaskError> {
    maybe_deposit(agent).await?;
    excavate(agent, cursor).await?;

    let ahead = agent.world.position().await.step(cursor.direction());
    agent.world.goto(ahead, 0).await?;
    cursor.advance();

    if cursor.branch_complete(agent.config.mine.branch_length) {
        let (previous, next) = cursor.rotate(agent.config.mine.branch_spacing);
        agent.world.goto(previous, 0).await?;
        agent.world.goto(next, 0).await?;
        return Ok(MineOutcome::Rotated {
            direction: cursor.direction(),
        });
    }
    Ok(MineOutcome::Advanced)
}

/// Offload every carried ore stack when the threshold monitor trips.
///
/// The mining-front position is snapshotted before walking to the chest
/// and restored afterwards so the comb resumes where it left off. A
/// tripped monitor with no ore chest registered announces and carries
/// on loaded rather than erroring.
async fn maybe_deposit(agent: &Agent) -> Result<(), TaskError> {
    let inventory = agent.world.inventory().await;
    let vitals = agent.world.vitals().await;
    let held = agent.world.held_item().await;
    let Some(reason) = needs_deposit(
        &agent.config.mine,
        &agent.ores,
        &inventory,
        vitals,
        held.as_ref(),
    ) else {
        return Ok(());
    };
    agent
        .world
        .say(&format!("Heading to the drop-off: {reason}."))
        .await;

    let chest = agent.chests.read().await.get(ChestKind::Ore);
    let Some(chest) = chest else {
        agent
            .world
            .say("No ore chest set; carrying on loaded.")
            .await;
        return Ok(());
    };

    let front = agent.world.position().await;
    let items: Vec<(String, u32)> = inventory
        .iter()
        .filter(|stack| agent.ores.is_ore(&stack.name))
        .map(|stack| (stack.name.clone(), stack.count))
        .collect();
    deposit_at(agent.world.as_ref(), &agent.config.chest, chest, &items).await?;
    agent.world.goto(front, 0).await?;
    Ok(())
}

/// Clear the cross-section at the agent's current cell.
///
/// Air, missing, and boundary blocks are skipped; a single block that
/// resists breaking is logged and skipped rather than aborting the
/// section. Newly broken ore is counted and announced.
async fn excavate(agent: &Agent, cursor: &mut MiningCursor) -> Result<(), TaskError> {
    let floor = agent.world.position().await;
    for cell in cross_section(floor, cursor.direction()) {
        let Some(block) = agent.world.block_at(cell).await else {
            continue;
        };
        if block.is_air() || block.is_unbreakable() {
            continue;
        }
        let is_ore = agent.ores.is_ore(&block.name);
        match agent.world.break_block(cell).await {
            Ok(()) => {
                if is_ore {
                    cursor.record_ore();
                    agent.world.say(&format!("Found {}!", block.name)).await;
                }
            }
            Err(error @ WorldError::Disconnected) => return Err(error.into()),
            Err(error) => {
                tracing::debug!(%error, cell = %cell, "cell resisted, moving on");
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Loop
// ---------------------------------------------------------------------------

/// Branch-mine until the task is cancelled.
///
/// The comb starts at the agent's position at spawn time. Cycle errors
/// are chat-reported and retried after the longer error delay; only a
/// severed world session ends the loop.
pub async fn run(agent: Agent, token: TaskToken) {
    let origin = agent.world.position().await;
    let mut cursor = MiningCursor::new(origin);
    loop {
        if !agent.tasks.is_current(token) {
            break;
        }
        let delay_ms = match mine_cycle(&agent, &mut cursor).await {
            Ok(outcome) => {
                tracing::debug!(
                    ?outcome,
                    steps = cursor.steps(),
                    ores = cursor.ores_collected(),
                    "mining cycle complete"
                );
                agent.config.mine.cycle_delay_ms
            }
            Err(error) if error.is_fatal() => {
                tracing::error!(%error, "branch mining halted");
                break;
            }
            Err(error) => {
                tracing::warn!(%error, "mining cycle failed");
                agent.world.say(&format!("Mining error: {error}.")).await;
                agent.config.mine.error_delay_ms
            }
        };
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use golem_types::TaskKind;
    use golem_world::{Movement, SimWorld, SimWorldBuilder, World};

    use crate::config::BehaviorConfig;

    use super::*;

    fn agent_over(sim: &SimWorld) -> Agent {
        Agent::new(Arc::new(sim.clone()), BehaviorConfig::default())
    }

    #[test]
    fn cursor_rotates_east_after_a_full_branch() {
        let mut cursor = MiningCursor::new(BlockPos::new(0, 12, 0));
        for _ in 0..16 {
            cursor.advance();
        }
        assert!(cursor.branch_complete(16));

        let (previous, next) = cursor.rotate(3);

        assert_eq!(cursor.direction(), Direction::East);
        assert_eq!(cursor.steps(), 0);
        assert_eq!(previous, BlockPos::new(0, 12, 0));
        assert_eq!(next, BlockPos::new(3, 12, 0));
    }

    #[test]
    fn four_branches_return_the_cursor_north() {
        let mut cursor = MiningCursor::new(BlockPos::new(0, 12, 0));
        for _ in 0..4 {
            for _ in 0..16 {
                cursor.advance();
            }
            cursor.rotate(3);
        }
        assert_eq!(cursor.direction(), Direction::North);
        assert_eq!(cursor.steps(), 0);
    }

    #[test]
    fn cross_section_spans_column_and_side_walls() {
        let floor = BlockPos::new(0, 12, 0);
        let cells = cross_section(floor, Direction::North);

        // Traveling north, left is west (-x) and right is east (+x).
        for expected in [
            BlockPos::new(0, 12, 0),
            BlockPos::new(0, 13, 0),
            BlockPos::new(0, 14, 0),
            BlockPos::new(-1, 12, 0),
            BlockPos::new(-1, 13, 0),
            BlockPos::new(1, 12, 0),
            BlockPos::new(1, 13, 0),
        ] {
            assert!(cells.contains(&expected), "missing {expected}");
        }
    }

    fn stone_section(mut builder: SimWorldBuilder, floor: BlockPos) -> SimWorldBuilder {
        for cell in cross_section(floor, Direction::North) {
            builder = builder.block("stone", cell);
        }
        builder
    }

    #[tokio::test(start_paused = true)]
    async fn cycle_clears_the_section_and_advances() {
        let floor = BlockPos::new(0, 12, 0);
        let sim = stone_section(SimWorld::builder().agent_at(floor), floor)
            .block("iron_ore", floor.offset(1, 0, 0))
            .build();
        let agent = agent_over(&sim);
        let mut cursor = MiningCursor::new(floor);

        let outcome = mine_cycle(&agent, &mut cursor).await.unwrap();

        assert_eq!(outcome, MineOutcome::Advanced);
        assert_eq!(cursor.steps(), 1);
        assert_eq!(cursor.ores_collected(), 1);
        for cell in cross_section(floor, Direction::North) {
            assert!(sim.block_at(cell).await.is_none(), "{cell} left standing");
        }
        assert_eq!(sim.position().await, floor.step(Direction::North));
        assert!(sim
            .chat_log()
            .await
            .iter()
            .any(|line| line == "Found iron_ore!"));
    }

    #[tokio::test(start_paused = true)]
    async fn boundary_blocks_are_left_standing() {
        let floor = BlockPos::new(0, 12, 0);
        let bedrock = floor.offset(-1, 0, 0);
        let sim = SimWorld::builder()
            .agent_at(floor)
            .block("bedrock", bedrock)
            .block("stone", floor.up())
            .build();
        let agent = agent_over(&sim);
        let mut cursor = MiningCursor::new(floor);

        mine_cycle(&agent, &mut cursor).await.unwrap();

        assert!(sim.block_at(bedrock).await.is_some());
        assert!(sim.block_at(floor.up()).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn resisting_cells_are_skipped_not_fatal() {
        let floor = BlockPos::new(0, 12, 0);
        let stuck = floor.up();
        let sim = SimWorld::builder()
            .agent_at(floor)
            .block("stone", stuck)
            .block("stone", floor.offset(1, 0, 0))
            .build();
        sim.fail_break(stuck).await;
        let agent = agent_over(&sim);
        let mut cursor = MiningCursor::new(floor);

        let outcome = mine_cycle(&agent, &mut cursor).await.unwrap();

        assert_eq!(outcome, MineOutcome::Advanced);
        assert!(sim.block_at(stuck).await.is_some());
        assert!(sim.block_at(floor.offset(1, 0, 0)).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn deposit_run_returns_to_the_mining_front() {
        let front = BlockPos::new(0, 12, 0);
        let chest = BlockPos::new(10, 12, 0);
        let sim = SimWorld::builder()
            .agent_at(front)
            .chest(chest)
            .passable_block("cave_air", chest.offset(1, 0, 0))
            .carrying("coal_ore", 70)
            .build();
        let agent = agent_over(&sim);
        agent.chests.write().await.set(ChestKind::Ore, chest);
        let mut cursor = MiningCursor::new(front);

        mine_cycle(&agent, &mut cursor).await.unwrap();

        assert_eq!(sim.deposited(chest).await.get("coal_ore"), Some(&70));
        assert_eq!(
            sim.movements().await,
            vec![
                Movement::Goto {
                    cell: chest.offset(1, 0, 0),
                    within: 0
                },
                Movement::Goto {
                    cell: front,
                    within: 0
                },
                Movement::Goto {
                    cell: front.step(Direction::North),
                    within: 0
                },
            ]
        );
        let log = sim.chat_log().await;
        assert!(log.iter().any(|line| line.contains("ore cap")));
    }

    #[tokio::test(start_paused = true)]
    async fn tripped_monitor_without_chest_carries_on() {
        let front = BlockPos::new(0, 12, 0);
        let sim = SimWorld::builder()
            .agent_at(front)
            .carrying("coal_ore", 70)
            .build();
        let agent = agent_over(&sim);
        let mut cursor = MiningCursor::new(front);

        let outcome = mine_cycle(&agent, &mut cursor).await.unwrap();

        assert_eq!(outcome, MineOutcome::Advanced);
        assert_eq!(sim.carried("coal_ore").await, 70);
        let log = sim.chat_log().await;
        assert!(log.iter().any(|line| line.contains("No ore chest set")));
    }

    #[tokio::test(start_paused = true)]
    async fn completed_branch_relocates_through_the_old_origin() {
        let origin = BlockPos::new(0, 12, 0);
        let sim = SimWorld::builder().agent_at(origin).build();
        let agent = agent_over(&sim);
        let mut cursor = MiningCursor::new(origin);
        for _ in 0..15 {
            cursor.advance();
        }

        let outcome = mine_cycle(&agent, &mut cursor).await.unwrap();

        assert_eq!(
            outcome,
            MineOutcome::Rotated {
                direction: Direction::East
            }
        );
        assert_eq!(cursor.steps(), 0);
        assert_eq!(
            sim.movements().await,
            vec![
                Movement::Goto {
                    cell: origin.step(Direction::North),
                    within: 0
                },
                Movement::Goto {
                    cell: origin,
                    within: 0
                },
                Movement::Goto {
                    cell: BlockPos::new(3, 12, 0),
                    within: 0
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn disconnect_is_fatal_to_the_cycle() {
        let sim = SimWorld::builder().build();
        sim.disconnect().await;
        let agent = agent_over(&sim);
        let mut cursor = MiningCursor::new(BlockPos::new(0, 12, 0));

        let error = mine_cycle(&agent, &mut cursor).await.unwrap_err();
        assert!(error.is_fatal());
    }

    #[tokio::test(start_paused = true)]
    async fn loop_reports_cycle_errors_in_chat() {
        let origin = BlockPos::new(0, 12, 0);
        let sim = SimWorld::builder().agent_at(origin).build();
        sim.fail_goto(origin.step(Direction::North)).await;
        let agent = agent_over(&sim);

        let token = agent.begin_task(TaskKind::BranchMining).await;
        let handle = tokio::spawn(run(agent.clone(), token));
        agent.tasks.attach(token, handle).await;

        tokio::time::sleep(Duration::from_millis(3000)).await;
        agent.stop().await;

        let log = sim.chat_log().await;
        assert!(log.iter().any(|line| line.contains("Mining error")));
    }
}
