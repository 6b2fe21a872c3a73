//! Task orchestration and behaviors for the Golem agent.
//!
//! This crate is the logic layer between `golem-world` (which provides the
//! world primitives) and the runner/observer crates (which provide the
//! front-ends). It owns the single active task slot and the three behavior
//! loops that fill it.
//!
//! # Modules
//!
//! - [`agent`] -- The shared [`Agent`] handle passed to every behavior
//! - [`config`] -- Tunable behavior parameters loaded from YAML
//! - [`controller`] -- Exclusive task slot with generation-token guards
//! - [`dispatch`] -- Command handling for all front-ends
//! - [`error`] -- Error types for behavior cycles ([`TaskError`])
//! - [`farm`] -- Harvest/replant/deposit cycle
//! - [`follow`] -- Periodic re-aim chase loop
//! - [`mine`] -- Branch-tunnel excavation with deposit runs
//! - [`monitor`] -- Deposit-threshold decisions over inventory snapshots
//! - [`storage`] -- Chest registry, deposit transactions, assignment
//!   handshake
//!
//! # Task exclusivity
//!
//! At most one behavior loop is live at a time. Every task switch runs an
//! atomic cancel-then-start transition in the [`TaskController`], and every
//! loop re-checks its generation token at each cycle boundary so a
//! fired-but-not-yet-aborted cycle suppresses itself.
//!
//! [`Agent`]: agent::Agent
//! [`TaskController`]: controller::TaskController
//! [`TaskError`]: error::TaskError

pub mod agent;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod farm;
pub mod follow;
pub mod mine;
pub mod monitor;
pub mod storage;

// Re-export primary types at crate root for convenience.
pub use agent::Agent;
pub use config::{BehaviorConfig, ConfigError};
pub use controller::{TaskController, TaskToken};
pub use dispatch::{dispatch, handle_line};
pub use error::TaskError;
pub use monitor::{needs_deposit, DepositReason};
pub use storage::ChestRegistry;
