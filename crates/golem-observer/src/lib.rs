//! Status API server for the Golem agent.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws/chat`) for real-time chat streaming
//!   via [`tokio::sync::broadcast`]
//! - **REST endpoints** for the live agent snapshot (`GET /api/state`)
//!   and remote command dispatch (`POST /api/command`)
//! - **Minimal HTML dashboard** (`GET /`) showing the agent's task,
//!   vitals, position, and links to the API endpoints
//!
//! # Architecture
//!
//! The observer holds the same [`Agent`] handle the behavior loops use,
//! so every request reads live state and a command posted over HTTP goes
//! through exactly the same dispatcher as a chat or terminal command.
//! `WebSocket` clients receive chat lines via the world's broadcast
//! channel with automatic lag handling.
//!
//! [`Agent`]: golem_agent::Agent

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use startup::spawn_observer;
pub use state::AppState;
