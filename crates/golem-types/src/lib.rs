//! Shared type definitions for the Golem agent.
//!
//! This crate is the single source of truth for the data model used across
//! the Golem workspace: world coordinates, block and item snapshots, the
//! crop and ore catalogs, task kinds, and parsed operator commands. It
//! contains no I/O and no async code.
//!
//! # Modules
//!
//! - [`pos`] -- Voxel coordinates and cardinal directions
//! - [`block`] -- Block snapshots and passability
//! - [`item`] -- Inventory stacks and tool durability
//! - [`vitals`] -- Health/food/experience snapshot
//! - [`crop`] -- Crop species registry (maturity, seed, product)
//! - [`ore`] -- Ore block-name catalog
//! - [`task`] -- The exclusive task kinds
//! - [`command`] -- Operator command parsing

pub mod block;
pub mod command;
pub mod crop;
pub mod item;
pub mod ore;
pub mod pos;
pub mod task;
pub mod vitals;

// Re-export all public types at crate root for convenience.
pub use block::{BlockFace, BlockInfo, BoundingVolume};
pub use command::{ChestKind, Command, CommandSource};
pub use crop::{CropRegistry, CropSpec};
pub use item::{Durability, ItemStack};
pub use ore::OreCatalog;
pub use pos::{BlockPos, Direction};
pub use task::TaskKind;
pub use vitals::{Vitals, MAX_HEALTH};
