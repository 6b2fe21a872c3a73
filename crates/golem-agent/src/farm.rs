//! Crop-farming behavior: scan, harvest, replant, offload surplus.
//!
//! One cycle handles at most one crop. The scan picks the nearest mature
//! crop within the configured radius; the approach is two-phase (broad,
//! then adjacent) so a long walk can be interrupted cleanly; replanting
//! places the species' seed on the soil under the harvested cell; the
//! deposit step keeps a working pool on hand and pushes the rest into
//! the registered chests. Cycle errors are logged and the loop carries
//! on, except a severed world session.

use std::time::Duration;

use golem_types::item::count_of;
use golem_types::{BlockFace, BlockPos, ChestKind, CropSpec};

use crate::agent::Agent;
use crate::controller::TaskToken;
use crate::error::TaskError;
use crate::storage::deposit_at;

/// Broad-phase approach stops this far from the crop.
const APPROACH_RADIUS: u32 = 3;
/// Ticks allowed for a broken crop's drop to reach the inventory.
const HARVEST_SETTLE_TICKS: u32 = 10;
/// Ticks between equipping the seed and placing it.
const EQUIP_SETTLE_TICKS: u32 = 2;
/// Working pool kept on hand when seed and product are one item.
const KEEP_ON_HAND: u64 = 16;
/// Seed count above which the surplus is offloaded.
const SEED_CARRY_CAP: u64 = 64;
/// Seed count kept back when offloading a seed surplus.
const SEED_KEEP: u64 = 16;

// ---------------------------------------------------------------------------
// Cycle
// ---------------------------------------------------------------------------

/// What one pass over the field accomplished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FarmOutcome {
    /// No mature crop within the scan radius.
    NothingMature,
    /// One crop was harvested, replanted, and its surplus offloaded.
    Harvested {
        /// Block name of the harvested crop.
        crop: String,
    },
}

/// Run one farm cycle: scan, approach, harvest, replant, deposit.
///
/// # Errors
///
/// Returns the first failed step; the loop treats every error as
/// retryable except a severed world session.
pub async fn farm_cycle(agent: &Agent) -> Result<FarmOutcome, TaskError> {
    let Some(target) = agent
        .world
        .find_nearest_block(
            &|block| agent.crops.is_mature(block),
            agent.config.farm.scan_radius,
        )
        .await
    else {
        return Ok(FarmOutcome::NothingMature);
    };
    // The maturity predicate only matches registered species.
    let Some(spec) = agent.crops.get(&target.name).cloned() else {
        return Ok(FarmOutcome::NothingMature);
    };
    let cell = target.position;

    agent.world.goto(cell, APPROACH_RADIUS).await?;
    agent.world.goto(cell, 0).await?;

    agent.world.break_block(cell).await?;
    agent.world.wait_ticks(HARVEST_SETTLE_TICKS).await;

    replant(agent, cell, &spec).await?;
    deposit_surplus(agent, &spec).await?;

    Ok(FarmOutcome::Harvested { crop: target.name })
}

async fn replant(agent: &Agent, cell: BlockPos, spec: &CropSpec) -> Result<(), TaskError> {
    let inventory = agent.world.inventory().await;
    if count_of(&inventory, &spec.seed_item) == 0 {
        return Err(TaskError::MissingResource(spec.seed_item.clone()));
    }
    agent.world.equip(&spec.seed_item).await?;
    agent.world.wait_ticks(EQUIP_SETTLE_TICKS).await;
    agent.world.place_block(cell.down(), BlockFace::Top).await?;
    Ok(())
}

/// Push harvest surplus into the registered chests.
///
/// Same-item species keep one pool of [`KEEP_ON_HAND`]; distinct-item
/// species deposit the product fully and touch the seed pool only past
/// [`SEED_CARRY_CAP`]. An unset chest silently skips its deposit.
async fn deposit_surplus(agent: &Agent, spec: &CropSpec) -> Result<(), TaskError> {
    let inventory = agent.world.inventory().await;
    let chests = *agent.chests.read().await;

    if spec.seed_is_product() {
        let surplus = count_of(&inventory, &spec.product_item).saturating_sub(KEEP_ON_HAND);
        if surplus > 0 {
            if let Some(chest) = chests.get(ChestKind::Product) {
                let items = [(spec.product_item.clone(), clamp_count(surplus))];
                deposit_at(agent.world.as_ref(), &agent.config.chest, chest, &items).await?;
            }
        }
        return Ok(());
    }

    let product = count_of(&inventory, &spec.product_item);
    if product > 0 {
        if let Some(chest) = chests.get(ChestKind::Product) {
            let items = [(spec.product_item.clone(), clamp_count(product))];
            deposit_at(agent.world.as_ref(), &agent.config.chest, chest, &items).await?;
        }
    }

    let seed = count_of(&inventory, &spec.seed_item);
    if seed > SEED_CARRY_CAP {
        if let Some(chest) = chests.get(ChestKind::Seed) {
            let surplus = seed.saturating_sub(SEED_KEEP);
            let items = [(spec.seed_item.clone(), clamp_count(surplus))];
            deposit_at(agent.world.as_ref(), &agent.config.chest, chest, &items).await?;
        }
    }
    Ok(())
}

fn clamp_count(count: u64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Loop
// ---------------------------------------------------------------------------

/// Farm until the task is cancelled.
///
/// A completed or failed cycle reschedules after the short delay; an
/// empty scan backs off longer. Errors are logged, never chat-reported.
pub async fn run(agent: Agent, token: TaskToken) {
    loop {
        if !agent.tasks.is_current(token) {
            break;
        }
        let delay_ms = match farm_cycle(&agent).await {
            Ok(FarmOutcome::Harvested { crop }) => {
                tracing::debug!(%crop, "harvest cycle complete");
                agent.config.farm.cycle_delay_ms
            }
            Ok(FarmOutcome::NothingMature) => agent.config.farm.backoff_delay_ms,
            Err(error) if error.is_fatal() => {
                tracing::error!(%error, "farming halted");
                break;
            }
            Err(error) => {
                tracing::warn!(%error, "farm cycle failed");
                agent.config.farm.cycle_delay_ms
            }
        };
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
