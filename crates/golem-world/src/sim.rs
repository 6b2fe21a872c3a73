//! In-memory simulated world.
//!
//! [`SimWorld`] implements [`World`] against a plain voxel map so the
//! behaviors can be exercised end-to-end without a live world session.
//! The runner binary boots on it and every behavior test drives it.
//!
//! Movement is teleport-style: a `goto` lands the agent exactly on the
//! requested cell unless the cell has been marked unreachable. Breaking a
//! block removes it from the map and adds its drops to the inventory.
//! Every movement call is appended to a log so tests can assert on the
//! exact sequence of moves a behavior issued.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tokio::time::Duration;

use golem_types::{
    BlockFace, BlockInfo, BlockPos, BoundingVolume, Durability, ItemStack, Vitals,
};

use crate::error::WorldError;
use crate::world::{BlockPredicate, ChatEvent, Container, EntityHandle, World};

/// Broadcast capacity for the chat event channel.
const CHAT_CHANNEL_CAPACITY: usize = 256;

/// Milliseconds per world tick.
const MILLIS_PER_TICK: u64 = 50;

// ---------------------------------------------------------------------------
// Movement log
// ---------------------------------------------------------------------------

/// One recorded movement call, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Movement {
    /// A `goto(cell, within)` call.
    Goto {
        /// The requested goal cell.
        cell: BlockPos,
        /// The requested stop radius.
        within: u32,
    },
    /// A `follow_entity(entity_id, distance)` call.
    Follow {
        /// The tracked entity.
        entity_id: u64,
        /// The requested follow distance.
        distance: u32,
    },
    /// A `stop_movement()` call.
    Stop,
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

/// A cell's contents, positionless; the map key carries the position.
#[derive(Debug, Clone)]
struct SimBlock {
    name: String,
    growth_stage: Option<u8>,
    bounding: BoundingVolume,
}

/// A connected player other than the agent.
#[derive(Debug, Clone)]
struct SimPlayer {
    id: u64,
    username: String,
    position: BlockPos,
}

#[derive(Debug)]
struct SimState {
    agent_pos: BlockPos,
    blocks: HashMap<BlockPos, SimBlock>,
    /// Cells that are container blocks, with their accumulated deposits.
    containers: HashMap<BlockPos, BTreeMap<String, u32>>,
    players: Vec<SimPlayer>,
    inventory: Vec<ItemStack>,
    held: Option<ItemStack>,
    vitals: Vitals,
    movement_log: Vec<Movement>,
    /// Goal cells that fail with `Unreachable`.
    unreachable: HashSet<BlockPos>,
    /// Cells whose break attempts fail with `ActionFailed`.
    break_failures: HashSet<BlockPos>,
    /// Drops for named blocks; blocks not listed drop one of themselves.
    drop_table: HashMap<String, Vec<(String, u32)>>,
    /// Item name to the block it plants as; unlisted items plant as a
    /// block of the same name.
    plant_map: HashMap<String, String>,
    /// Lines the agent has said, in order.
    said: Vec<String>,
    disconnected: bool,
}

impl SimState {
    fn block_info(&self, cell: BlockPos) -> Option<BlockInfo> {
        self.blocks.get(&cell).map(|block| BlockInfo {
            name: block.name.clone(),
            position: cell,
            growth_stage: block.growth_stage,
            bounding: block.bounding,
        })
    }

    /// Remove up to `count` items of `name` from the carried stacks.
    /// Returns the number actually removed.
    fn take_items(&mut self, name: &str, count: u32) -> u32 {
        let mut remaining = count;
        for stack in &mut self.inventory {
            if remaining == 0 {
                break;
            }
            if stack.name == name {
                let taken = stack.count.min(remaining);
                stack.count = stack.count.saturating_sub(taken);
                remaining = remaining.saturating_sub(taken);
            }
        }
        self.inventory.retain(|stack| stack.count > 0);
        count.saturating_sub(remaining)
    }

    fn add_items(&mut self, name: &str, count: u32) {
        if count == 0 {
            return;
        }
        if let Some(stack) = self.inventory.iter_mut().find(|stack| stack.name == name) {
            stack.count = stack.count.saturating_add(count);
        } else {
            self.inventory.push(ItemStack::new(name.to_owned(), count));
        }
    }

    fn guard_connected(&self) -> Result<(), WorldError> {
        if self.disconnected {
            Err(WorldError::Disconnected)
        } else {
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// SimWorld
// ---------------------------------------------------------------------------

/// An in-memory [`World`] backed by a voxel map.
///
/// Cloning is cheap and shares the underlying state, so tests keep one
/// clone for assertions while handing another to the code under test as
/// an `Arc<dyn World>`.
#[derive(Debug, Clone)]
pub struct SimWorld {
    agent_name: String,
    state: Arc<Mutex<SimState>>,
    chat_tx: broadcast::Sender<ChatEvent>,
}

impl SimWorld {
    /// Start building a simulated world.
    pub fn builder() -> SimWorldBuilder {
        SimWorldBuilder::default()
    }

    // ---- test and demo mutators ----

    /// Replace the block at `cell` with a solid block named `name`.
    pub async fn set_block(&self, cell: BlockPos, name: &str) {
        let mut state = self.state.lock().await;
        state.blocks.insert(
            cell,
            SimBlock {
                name: name.to_owned(),
                growth_stage: None,
                bounding: BoundingVolume::Solid,
            },
        );
    }

    /// Set the growth stage of the crop block at `cell`, if present.
    pub async fn set_growth_stage(&self, cell: BlockPos, stage: u8) {
        let mut state = self.state.lock().await;
        if let Some(block) = state.blocks.get_mut(&cell) {
            block.growth_stage = Some(stage);
        }
    }

    /// Overwrite the agent's vitals snapshot.
    pub async fn set_vitals(&self, vitals: Vitals) {
        self.state.lock().await.vitals = vitals;
    }

    /// Overwrite the held item.
    pub async fn set_held(&self, name: &str, count: u32, durability: Option<Durability>) {
        self.state.lock().await.held = Some(ItemStack {
            name: name.to_owned(),
            count,
            durability,
        });
    }

    /// Move a connected player to a new cell.
    pub async fn move_player(&self, username: &str, position: BlockPos) {
        let mut state = self.state.lock().await;
        if let Some(player) = state
            .players
            .iter_mut()
            .find(|player| player.username == username)
        {
            player.position = position;
        }
    }

    /// Disconnect a player, invalidating its entity handle.
    pub async fn remove_player(&self, username: &str) {
        let mut state = self.state.lock().await;
        state.players.retain(|player| player.username != username);
    }

    /// Mark a goal cell as unreachable for future `goto` calls.
    pub async fn fail_goto(&self, cell: BlockPos) {
        self.state.lock().await.unreachable.insert(cell);
    }

    /// Make break attempts at `cell` fail without removing the block.
    pub async fn fail_break(&self, cell: BlockPos) {
        self.state.lock().await.break_failures.insert(cell);
    }

    /// Sever the world session: every subsequent action fails with
    /// [`WorldError::Disconnected`].
    pub async fn disconnect(&self) {
        self.state.lock().await.disconnected = true;
    }

    /// Inject an incoming chat line from another speaker.
    pub fn push_chat(&self, sender: &str, message: &str) {
        let _ = self.chat_tx.send(ChatEvent {
            sender: sender.to_owned(),
            message: message.to_owned(),
        });
    }

    // ---- test and demo accessors ----

    /// Every movement call issued so far, in order.
    pub async fn movements(&self) -> Vec<Movement> {
        self.state.lock().await.movement_log.clone()
    }

    /// Items deposited into the container at `cell`, by name.
    pub async fn deposited(&self, cell: BlockPos) -> BTreeMap<String, u32> {
        self.state
            .lock()
            .await
            .containers
            .get(&cell)
            .cloned()
            .unwrap_or_default()
    }

    /// Every line the agent has said, in order.
    pub async fn chat_log(&self) -> Vec<String> {
        self.state.lock().await.said.clone()
    }

    /// The carried count of one item type.
    pub async fn carried(&self, name: &str) -> u64 {
        let state = self.state.lock().await;
        golem_types::item::count_of(&state.inventory, name)
    }
}

#[async_trait]
impl World for SimWorld {
    fn agent_name(&self) -> &str {
        &self.agent_name
    }

    fn chat_events(&self) -> broadcast::Receiver<ChatEvent> {
        self.chat_tx.subscribe()
    }

    async fn position(&self) -> BlockPos {
        self.state.lock().await.agent_pos
    }

    async fn vitals(&self) -> Vitals {
        self.state.lock().await.vitals
    }

    async fn inventory(&self) -> Vec<ItemStack> {
        self.state.lock().await.inventory.clone()
    }

    async fn held_item(&self) -> Option<ItemStack> {
        self.state.lock().await.held.clone()
    }

    async fn block_at(&self, cell: BlockPos) -> Option<BlockInfo> {
        self.state.lock().await.block_info(cell)
    }

    async fn find_nearest_block(
        &self,
        predicate: BlockPredicate<'_>,
        max_distance: i64,
    ) -> Option<BlockInfo> {
        let state = self.state.lock().await;
        let origin = state.agent_pos;
        state
            .blocks
            .keys()
            .filter(|cell| origin.chebyshev_distance(**cell) <= max_distance)
            .filter_map(|cell| state.block_info(*cell))
            .filter(|info| predicate(info))
            .min_by_key(|info| origin.distance_sq(info.position))
    }

    async fn entity_of_player(&self, username: &str) -> Option<EntityHandle> {
        let state = self.state.lock().await;
        state
            .players
            .iter()
            .find(|player| player.username == username)
            .map(|player| EntityHandle {
                id: player.id,
                username: player.username.clone(),
                position: player.position,
            })
    }

    async fn nearest_player(&self) -> Option<EntityHandle> {
        let state = self.state.lock().await;
        let origin = state.agent_pos;
        state
            .players
            .iter()
            .min_by_key(|player| origin.distance_sq(player.position))
            .map(|player| EntityHandle {
                id: player.id,
                username: player.username.clone(),
                position: player.position,
            })
    }

    async fn goto(&self, cell: BlockPos, within: u32) -> Result<(), WorldError> {
        let mut state = self.state.lock().await;
        state.guard_connected()?;
        state.movement_log.push(Movement::Goto { cell, within });
        if state.unreachable.contains(&cell) {
            return Err(WorldError::Unreachable { goal: cell });
        }
        // The simulated mover lands exactly on the goal even when a
        // positive radius would allow stopping early.
        state.agent_pos = cell;
        Ok(())
    }

    async fn follow_entity(&self, entity_id: u64, distance: u32) -> Result<(), WorldError> {
        let mut state = self.state.lock().await;
        state.guard_connected()?;
        state.movement_log.push(Movement::Follow {
            entity_id,
            distance,
        });
        Ok(())
    }

    async fn stop_movement(&self) {
        let mut state = self.state.lock().await;
        state.movement_log.push(Movement::Stop);
    }

    async fn break_block(&self, cell: BlockPos) -> Result<(), WorldError> {
        let mut state = self.state.lock().await;
        state.guard_connected()?;
        let Some(info) = state.block_info(cell) else {
            return Err(WorldError::BlockMissing(cell));
        };
        if info.is_unbreakable() || state.break_failures.contains(&cell) {
            return Err(WorldError::action_failed(
                "break",
                format!("{} at {cell} resisted", info.name),
            ));
        }
        state.blocks.remove(&cell);
        let drops = state
            .drop_table
            .get(&info.name)
            .cloned()
            .unwrap_or_else(|| vec![(info.name.clone(), 1)]);
        for (item, count) in drops {
            state.add_items(&item, count);
        }
        Ok(())
    }

    async fn place_block(&self, support: BlockPos, face: BlockFace) -> Result<(), WorldError> {
        let mut state = self.state.lock().await;
        state.guard_connected()?;
        if state.block_info(support).is_none() {
            return Err(WorldError::BlockMissing(support));
        }
        let Some(held) = state.held.clone() else {
            return Err(WorldError::action_failed("place", "nothing held"));
        };
        let (dx, dy, dz) = face.offset();
        let target = support.offset(dx, dy, dz);
        if state
            .block_info(target)
            .is_some_and(|block| !block.is_air())
        {
            return Err(WorldError::action_failed(
                "place",
                format!("{target} is occupied"),
            ));
        }
        let taken = state.take_items(&held.name, 1);
        if taken == 0 {
            return Err(WorldError::action_failed(
                "place",
                format!("no {} in inventory", held.name),
            ));
        }
        let planted = state
            .plant_map
            .get(&held.name)
            .cloned()
            .unwrap_or_else(|| held.name.clone());
        state.blocks.insert(
            target,
            SimBlock {
                name: planted,
                growth_stage: Some(0),
                bounding: BoundingVolume::Empty,
            },
        );
        if let Some(held) = &mut state.held {
            held.count = held.count.saturating_sub(1);
            if held.count == 0 {
                state.held = None;
            }
        }
        Ok(())
    }

    async fn equip(&self, item_name: &str) -> Result<(), WorldError> {
        let mut state = self.state.lock().await;
        state.guard_connected()?;
        let Some(stack) = state
            .inventory
            .iter()
            .find(|stack| stack.name == item_name)
            .cloned()
        else {
            return Err(WorldError::action_failed(
                "equip",
                format!("no {item_name} in inventory"),
            ));
        };
        state.held = Some(stack);
        Ok(())
    }

    async fn open_container(&self, cell: BlockPos) -> Result<Box<dyn Container>, WorldError> {
        let state = self.state.lock().await;
        state.guard_connected()?;
        if !state.containers.contains_key(&cell) {
            return Err(WorldError::BlockMissing(cell));
        }
        drop(state);
        Ok(Box::new(SimContainer {
            state: Arc::clone(&self.state),
            cell,
        }))
    }

    async fn say(&self, text: &str) {
        let mut state = self.state.lock().await;
        state.said.push(text.to_owned());
        drop(state);
        let _ = self.chat_tx.send(ChatEvent {
            sender: self.agent_name.clone(),
            message: text.to_owned(),
        });
    }

    async fn wait_ticks(&self, ticks: u32) {
        let millis = u64::from(ticks).saturating_mul(MILLIS_PER_TICK);
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

// ---------------------------------------------------------------------------
// SimContainer
// ---------------------------------------------------------------------------

/// An open transaction against a container cell in a [`SimWorld`].
struct SimContainer {
    state: Arc<Mutex<SimState>>,
    cell: BlockPos,
}

#[async_trait]
impl Container for SimContainer {
    async fn deposit(&self, item_name: &str, count: u32) -> Result<(), WorldError> {
        let mut state = self.state.lock().await;
        state.guard_connected()?;
        let taken = state.take_items(item_name, count);
        if taken < count {
            return Err(WorldError::action_failed(
                "deposit",
                format!("only {taken} of {count} {item_name} carried"),
            ));
        }
        let deposits = state.containers.entry(self.cell).or_default();
        let total = deposits.entry(item_name.to_owned()).or_insert(0);
        *total = total.saturating_add(count);
        Ok(())
    }

    async fn close(&self) -> Result<(), WorldError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SimWorldBuilder
// ---------------------------------------------------------------------------

/// Builder seeding a [`SimWorld`] with terrain, players, and inventory.
#[derive(Debug)]
pub struct SimWorldBuilder {
    agent_name: String,
    agent_pos: BlockPos,
    blocks: HashMap<BlockPos, SimBlock>,
    containers: HashMap<BlockPos, BTreeMap<String, u32>>,
    players: Vec<SimPlayer>,
    inventory: Vec<ItemStack>,
    held: Option<ItemStack>,
    vitals: Vitals,
    drop_table: HashMap<String, Vec<(String, u32)>>,
    plant_map: HashMap<String, String>,
    next_entity_id: u64,
}

impl Default for SimWorldBuilder {
    fn default() -> Self {
        Self {
            agent_name: "Golem".to_owned(),
            agent_pos: BlockPos::new(0, 64, 0),
            blocks: HashMap::new(),
            containers: HashMap::new(),
            players: Vec::new(),
            inventory: Vec::new(),
            held: None,
            vitals: Vitals::full(),
            drop_table: HashMap::new(),
            plant_map: HashMap::new(),
            next_entity_id: 1,
        }
    }
}

impl SimWorldBuilder {
    /// Set the agent's username.
    #[must_use]
    pub fn agent_name(mut self, name: &str) -> Self {
        self.agent_name = name.to_owned();
        self
    }

    /// Set the agent's starting cell.
    #[must_use]
    pub const fn agent_at(mut self, cell: BlockPos) -> Self {
        self.agent_pos = cell;
        self
    }

    /// Add a solid block.
    #[must_use]
    pub fn block(mut self, name: &str, cell: BlockPos) -> Self {
        self.blocks.insert(
            cell,
            SimBlock {
                name: name.to_owned(),
                growth_stage: None,
                bounding: BoundingVolume::Solid,
            },
        );
        self
    }

    /// Add a passable (empty-bounding) block such as tall grass.
    #[must_use]
    pub fn passable_block(mut self, name: &str, cell: BlockPos) -> Self {
        self.blocks.insert(
            cell,
            SimBlock {
                name: name.to_owned(),
                growth_stage: None,
                bounding: BoundingVolume::Empty,
            },
        );
        self
    }

    /// Add a crop block at a given growth stage.
    #[must_use]
    pub fn crop(mut self, name: &str, cell: BlockPos, stage: u8) -> Self {
        self.blocks.insert(
            cell,
            SimBlock {
                name: name.to_owned(),
                growth_stage: Some(stage),
                bounding: BoundingVolume::Empty,
            },
        );
        self
    }

    /// Add a chest block that can be opened as a container.
    #[must_use]
    pub fn chest(mut self, cell: BlockPos) -> Self {
        self.blocks.insert(
            cell,
            SimBlock {
                name: "chest".to_owned(),
                growth_stage: None,
                bounding: BoundingVolume::Solid,
            },
        );
        self.containers.insert(cell, BTreeMap::new());
        self
    }

    /// Add a connected player.
    #[must_use]
    pub fn player(mut self, username: &str, position: BlockPos) -> Self {
        let id = self.next_entity_id;
        self.next_entity_id = self.next_entity_id.saturating_add(1);
        self.players.push(SimPlayer {
            id,
            username: username.to_owned(),
            position,
        });
        self
    }

    /// Add a carried stack.
    #[must_use]
    pub fn carrying(mut self, name: &str, count: u32) -> Self {
        self.inventory.push(ItemStack::new(name.to_owned(), count));
        self
    }

    /// Set the held item with optional durability data.
    #[must_use]
    pub fn holding(mut self, name: &str, count: u32, durability: Option<Durability>) -> Self {
        self.held = Some(ItemStack {
            name: name.to_owned(),
            count,
            durability,
        });
        self
    }

    /// Set the starting vitals.
    #[must_use]
    pub const fn vitals(mut self, vitals: Vitals) -> Self {
        self.vitals = vitals;
        self
    }

    /// Register the drops for a block name (default: one of itself).
    #[must_use]
    pub fn drops(mut self, block_name: &str, drops: Vec<(String, u32)>) -> Self {
        self.drop_table.insert(block_name.to_owned(), drops);
        self
    }

    /// Register which block an item plants as (default: its own name).
    #[must_use]
    pub fn plants(mut self, item_name: &str, block_name: &str) -> Self {
        self.plant_map
            .insert(item_name.to_owned(), block_name.to_owned());
        self
    }

    /// Finish building.
    pub fn build(self) -> SimWorld {
        let (chat_tx, _) = broadcast::channel(CHAT_CHANNEL_CAPACITY);
        SimWorld {
            agent_name: self.agent_name,
            state: Arc::new(Mutex::new(SimState {
                agent_pos: self.agent_pos,
                blocks: self.blocks,
                containers: self.containers,
                players: self.players,
                inventory: self.inventory,
                held: self.held,
                vitals: self.vitals,
                movement_log: Vec::new(),
                unreachable: HashSet::new(),
                break_failures: HashSet::new(),
                drop_table: self.drop_table,
                plant_map: self.plant_map,
                said: Vec::new(),
                disconnected: false,
            })),
            chat_tx,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
