//! Agent runtime entry point.
//!
//! Boots the demo world, creates the behavior agent and its observer
//! API server, wires the chat and terminal command front-ends, and runs
//! until Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `golem.yaml`
//! 3. Build the demo world
//! 4. Create the agent handle
//! 5. Start the observer API server
//! 6. Spawn the terminal command front-end
//! 7. Announce readiness in chat
//! 8. Serve chat commands until Ctrl-C

mod config;
mod demo;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use golem_agent::{handle_line, Agent};
use golem_observer::AppState;
use golem_types::CommandSource;

use crate::config::RunnerConfig;

/// Configuration file looked up in the working directory.
const CONFIG_PATH: &str = "golem.yaml";

/// Chat lines starting with this prefix are treated as commands.
const COMMAND_PREFIX: char = '\\';

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration parsing or observer startup fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("golem-runner starting");

    // 2. Load configuration.
    let config = RunnerConfig::load_or_default(Path::new(CONFIG_PATH))
        .context("failed to load golem.yaml")?;
    info!(
        agent_name = config.agent_name,
        observer_host = config.observer.host,
        observer_port = config.observer.port,
        "configuration loaded"
    );
    let RunnerConfig {
        agent_name,
        observer,
        behavior,
    } = config;

    // 3. Build the demo world.
    let world = demo::create_demo_world(&agent_name);
    info!(agent_name, "demo world created");

    // 4. Create the agent handle.
    let agent = Agent::new(Arc::new(world), behavior);

    // 5. Start the observer API server.
    let state = Arc::new(AppState::new(agent.clone()));
    let _observer_handle = golem_observer::spawn_observer(observer, state)
        .await
        .context("failed to start observer server")?;

    // 6. Spawn the terminal command front-end.
    spawn_terminal_frontend(agent.clone());

    // 7. Announce readiness in chat.
    agent
        .world
        .say("Ready. Say \\help for the command list.")
        .await;

    // 8. Serve chat commands until Ctrl-C.
    tokio::select! {
        () = chat_frontend(agent.clone()) => {
            info!("chat channel closed");
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!(error = %e, "Ctrl-C handler failed, shutting down anyway");
            }
            info!("shutdown requested");
        }
    }

    agent.stop().await;
    info!("golem-runner shutdown complete");
    Ok(())
}

/// Serve commands arriving as chat lines prefixed with `\`.
///
/// The agent's own lines are skipped so replies never re-enter the
/// dispatcher. Returns when the chat channel closes.
async fn chat_frontend(agent: Agent) {
    let mut chat = agent.world.chat_events();
    loop {
        match chat.recv().await {
            Ok(event) => {
                if event.sender == agent.world.agent_name() {
                    continue;
                }
                let Some(line) = event.message.strip_prefix(COMMAND_PREFIX) else {
                    continue;
                };
                if let Some(reply) = handle_line(&agent, line, CommandSource::Chat).await {
                    agent.world.say(&reply).await;
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(skipped = n, "chat front-end lagged, commands may have been missed");
            }
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}

/// Read command lines from stdin and print the dispatcher's replies.
///
/// Runs on a background task until stdin closes.
fn spawn_terminal_frontend(agent: Agent) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match handle_line(&agent, line, CommandSource::Terminal).await {
                        Some(reply) => println!("{reply}"),
                        None => println!("Unrecognized command. Try: help"),
                    }
                }
                Ok(None) => return,
                Err(e) => {
                    warn!(error = %e, "terminal front-end read failed");
                    return;
                }
            }
        }
    });
}
