//! The [`World`] and [`Container`] traits: everything behaviors may ask
//! of the world.
//!
//! The trait is object-safe; behaviors hold an `Arc<dyn World>`. Every
//! method that can suspend on a world round trip is async. Query methods
//! return momentary snapshots -- callers must not hold one across their
//! own suspension points, since the world mutates underneath them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use golem_types::{BlockFace, BlockInfo, BlockPos, ItemStack, Vitals};

use crate::error::WorldError;

/// Predicate over block snapshots, used for bounded nearest-block scans.
pub type BlockPredicate<'a> = &'a (dyn Fn(&BlockInfo) -> bool + Send + Sync);

// ---------------------------------------------------------------------------
// EntityHandle
// ---------------------------------------------------------------------------

/// A live handle to a player entity.
///
/// Handles go stale when the player disconnects. Re-resolving by username
/// before each use is the caller's job, not the trait's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHandle {
    /// World-assigned entity id, unique per session.
    pub id: u64,
    /// The player's username.
    pub username: String,
    /// The entity's cell at snapshot time.
    pub position: BlockPos,
}

// ---------------------------------------------------------------------------
// ChatEvent
// ---------------------------------------------------------------------------

/// One line of world chat, from any speaker including the agent itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Username of the speaker.
    pub sender: String,
    /// The chat line as spoken.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// An open storage container transaction.
///
/// Obtained from [`World::open_container`]; dropped handles are considered
/// closed by the world, but callers should [`close`](Container::close)
/// explicitly so the world can pace the close action.
#[async_trait]
pub trait Container: Send + Sync {
    /// Move `count` items of `item_name` from the agent's inventory into
    /// the container.
    async fn deposit(&self, item_name: &str, count: u32) -> Result<(), WorldError>;

    /// Close the container.
    async fn close(&self) -> Result<(), WorldError>;
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// The complete world-interaction surface consumed by the agent.
#[async_trait]
pub trait World: Send + Sync {
    // ---- identity and events ----

    /// The agent's own username, for filtering self-authored chat.
    fn agent_name(&self) -> &str;

    /// Subscribe to the stream of world chat events.
    fn chat_events(&self) -> broadcast::Receiver<ChatEvent>;

    // ---- snapshot queries ----

    /// The agent's current cell.
    async fn position(&self) -> BlockPos;

    /// Current vital statistics.
    async fn vitals(&self) -> Vitals;

    /// Snapshot of all carried item stacks.
    async fn inventory(&self) -> Vec<ItemStack>;

    /// The currently held (main-hand) item, if any.
    async fn held_item(&self) -> Option<ItemStack>;

    /// Snapshot of the block at `cell`, or `None` outside the loaded world.
    async fn block_at(&self, cell: BlockPos) -> Option<BlockInfo>;

    /// The block matching `predicate` nearest to the agent, searching at
    /// most `max_distance` cells out (Chebyshev radius).
    async fn find_nearest_block(
        &self,
        predicate: BlockPredicate<'_>,
        max_distance: i64,
    ) -> Option<BlockInfo>;

    /// Resolve a username to its live entity, if connected.
    async fn entity_of_player(&self, username: &str) -> Option<EntityHandle>;

    /// The nearest player entity other than the agent itself.
    async fn nearest_player(&self) -> Option<EntityHandle>;

    // ---- movement ----

    /// Move to within `within` cells of `cell`. Resolves when the goal is
    /// reached; fails with [`WorldError::Unreachable`] when no path exists.
    async fn goto(&self, cell: BlockPos, within: u32) -> Result<(), WorldError>;

    /// Install a continuous follow goal on the entity with `entity_id`,
    /// keeping within `distance` cells. Non-blocking: the goal persists
    /// until replaced or cleared.
    async fn follow_entity(&self, entity_id: u64, distance: u32) -> Result<(), WorldError>;

    /// Clear any movement goal and held motion-control state.
    async fn stop_movement(&self);

    // ---- block interaction ----

    /// Break the block at `cell`. Fails if the cell is empty or the block
    /// cannot be broken.
    async fn break_block(&self, cell: BlockPos) -> Result<(), WorldError>;

    /// Place the held item as a block against `face` of the support block
    /// at `support`.
    async fn place_block(&self, support: BlockPos, face: BlockFace) -> Result<(), WorldError>;

    /// Move the named item from inventory to the main hand.
    async fn equip(&self, item_name: &str) -> Result<(), WorldError>;

    // ---- containers ----

    /// Open the container block at `cell` for a deposit transaction.
    async fn open_container(&self, cell: BlockPos) -> Result<Box<dyn Container>, WorldError>;

    // ---- chat and pacing ----

    /// Say a line in world chat. Fire-and-forget.
    async fn say(&self, text: &str);

    /// Pause for `ticks` world ticks (one tick is 50 ms).
    async fn wait_ticks(&self, ticks: u32);
}
