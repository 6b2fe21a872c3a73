//! Chest registry, deposit transactions, and the assignment handshake.
//!
//! All behaviors that offload items go through [`deposit_at`]: stand at a
//! passable neighbor of the container, open it, transfer, close, with the
//! world's per-action pacing pause after every container step. The three
//! chest locations are registered once each through the interactive
//! handshake and never auto-cleared.

use tokio::sync::RwLock;

use golem_types::{BlockPos, ChestKind};
use golem_world::World;

use crate::config::ChestConfig;
use crate::error::TaskError;

// ---------------------------------------------------------------------------
// ChestRegistry
// ---------------------------------------------------------------------------

/// The three optional storage chest locations.
///
/// Written only by the assignment handshake; read-shared by every
/// behavior. Locations persist until the process exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChestRegistry {
    seed: Option<BlockPos>,
    product: Option<BlockPos>,
    ore: Option<BlockPos>,
}

impl ChestRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            seed: None,
            product: None,
            ore: None,
        }
    }

    /// The registered location for `kind`, if any.
    pub const fn get(&self, kind: ChestKind) -> Option<BlockPos> {
        match kind {
            ChestKind::Seed => self.seed,
            ChestKind::Product => self.product,
            ChestKind::Ore => self.ore,
        }
    }

    /// Register (or re-register) the location for `kind`.
    pub const fn set(&mut self, kind: ChestKind, cell: BlockPos) {
        match kind {
            ChestKind::Seed => self.seed = Some(cell),
            ChestKind::Product => self.product = Some(cell),
            ChestKind::Ore => self.ore = Some(cell),
        }
    }
}

// ---------------------------------------------------------------------------
// Deposit transaction
// ---------------------------------------------------------------------------

/// Deposit the given item amounts into the container at `location`.
///
/// Steps, each aborting the whole call on failure:
/// 1. pick the first passable horizontal neighbor of `location` (scan
///    order east, west, south, north) -- none passable is
///    [`TaskError::NoAccess`];
/// 2. move there (one movement call);
/// 3. confirm a block still stands at `location` --
///    [`TaskError::ContainerMissing`] otherwise;
/// 4. open, deposit each entry, close, pausing
///    [`ChestConfig::pacing_ticks`] after every container action.
///
/// Entries with a zero count are skipped. The caller decides whether a
/// failure is retried, skipped, or reported.
pub async fn deposit_at(
    world: &dyn World,
    config: &ChestConfig,
    location: BlockPos,
    items: &[(String, u32)],
) -> Result<(), TaskError> {
    let mut stand = None;
    for neighbor in location.horizontal_neighbors() {
        if let Some(block) = world.block_at(neighbor).await {
            if block.is_passable() {
                stand = Some(neighbor);
                break;
            }
        }
    }
    let Some(stand) = stand else {
        return Err(TaskError::NoAccess(location));
    };

    world.goto(stand, 0).await?;

    if world.block_at(location).await.is_none() {
        return Err(TaskError::ContainerMissing(location));
    }

    let container = world.open_container(location).await?;
    world.wait_ticks(config.pacing_ticks).await;
    for (name, count) in items {
        if *count == 0 {
            continue;
        }
        container.deposit(name, *count).await?;
        world.wait_ticks(config.pacing_ticks).await;
    }
    container.close().await?;
    world.wait_ticks(config.pacing_ticks).await;
    Ok(())
}

// ---------------------------------------------------------------------------
// Assignment handshake
// ---------------------------------------------------------------------------

/// Run the interactive chest-assignment handshake for `kind`.
///
/// Announces the request in chat, waits a fixed window for the operator
/// to place the chest, then scans a bounded radius for the nearest
/// container block. On success the location is stored in the registry
/// and returned; `None` means nothing was found and nothing was stored.
pub async fn assign_chest(
    world: &dyn World,
    config: &ChestConfig,
    chests: &RwLock<ChestRegistry>,
    kind: ChestKind,
) -> Option<BlockPos> {
    world
        .say(&format!(
            "Place a chest near me and I'll register it as the {kind}."
        ))
        .await;
    world.wait_ticks(config.handshake_wait_ticks).await;

    let found = world
        .find_nearest_block(&|block| block.name == "chest", config.scan_radius)
        .await?;
    chests.write().await.set(kind, found.position);
    tracing::info!(kind = %kind, cell = %found.position, "chest registered");
    Some(found.position)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
