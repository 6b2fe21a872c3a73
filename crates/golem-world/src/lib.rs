//! World-interaction boundary for the Golem agent.
//!
//! This crate defines the [`World`] trait -- the complete set of world
//! primitives the agent's behaviors are written against -- and ships
//! [`SimWorld`], an in-memory voxel world implementing it. The behaviors
//! in `golem-agent` hold an `Arc<dyn World>` and never know which
//! implementation is behind it; the runner binary and every behavior test
//! use [`SimWorld`].
//!
//! # Modules
//!
//! - [`error`] -- Error types for world operations.
//! - [`world`] -- The [`World`] and [`Container`] traits, entity handles,
//!   and chat events.
//! - [`sim`] -- [`SimWorld`] and its builder: voxel map, containers,
//!   players, movement log, failure injection.
//!
//! [`World`]: world::World
//! [`SimWorld`]: sim::SimWorld

pub mod error;
pub mod sim;
pub mod world;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use sim::{Movement, SimWorld, SimWorldBuilder};
pub use world::{BlockPredicate, ChatEvent, Container, EntityHandle, World};
