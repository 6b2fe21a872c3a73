//! REST API endpoint handlers for the observer server.
//!
//! All handlers read live state through the shared [`Agent`] handle in
//! [`AppState`]; nothing is cached between requests.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/state` | Agent status snapshot |
//! | `POST` | `/api/command` | Dispatch one command line |
//!
//! [`Agent`]: golem_agent::Agent

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;

use golem_types::{BlockPos, CommandSource, ItemStack, TaskKind};

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request and response payloads
// ---------------------------------------------------------------------------

/// Body for the `POST /api/command` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct CommandRequest {
    /// One command line, exactly as it would be typed in chat.
    pub command: String,
}

/// Snapshot returned by `GET /api/state`.
#[derive(Debug, serde::Serialize)]
pub struct StateSnapshot {
    /// The agent's username.
    pub agent: String,
    /// The task currently holding the agent.
    pub task: TaskKind,
    /// Health points, 0 to 20.
    pub health: f32,
    /// Food saturation, 0 to 20.
    pub food: f32,
    /// Experience level.
    pub experience: u32,
    /// The agent's current cell.
    pub position: BlockPos,
    /// Currently equipped stack, if any.
    pub held: Option<ItemStack>,
    /// All carried stacks.
    pub inventory: Vec<ItemStack>,
    /// Wall-clock time the session started.
    pub started_at: chrono::DateTime<chrono::Utc>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing agent status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let agent_name = state.agent.world.agent_name().to_owned();
    let task = state.agent.current_task().await;
    let vitals = state.agent.world.vitals().await;
    let position = state.agent.world.position().await;
    let health = format!("{:.0}/20", vitals.health);
    let food = format!("{:.0}/20", vitals.food);

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Golem Observer</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        ul.get li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
        ul.post li::before {{ content: "POST "; color: #d2a8ff; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Golem Observer</h1>
    <p class="subtitle">Autonomous agent monitoring server</p>

    <p>Agent: <span class="status">{agent_name}</span></p>

    <div>
        <div class="metric">
            <div class="label">Task</div>
            <div class="value">{task}</div>
        </div>
        <div class="metric">
            <div class="label">Health</div>
            <div class="value">{health}</div>
        </div>
        <div class="metric">
            <div class="label">Food</div>
            <div class="value">{food}</div>
        </div>
        <div class="metric">
            <div class="label">Position</div>
            <div class="value">{position}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul class="get">
        <li><a href="/api/state">/api/state</a> -- Agent status snapshot</li>
    </ul>
    <ul class="post">
        <li><code>/api/command</code> -- Dispatch a command, body {{"command": "farm"}}</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/chat</code> -- Live chat stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/state -- agent status snapshot
// ---------------------------------------------------------------------------

/// Return the live agent snapshot: task, vitals, position, inventory.
pub async fn get_state(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let world = state.agent.world.as_ref();
    let vitals = world.vitals().await;

    let snapshot = StateSnapshot {
        agent: world.agent_name().to_owned(),
        task: state.agent.current_task().await,
        health: vitals.health,
        food: vitals.food,
        experience: vitals.experience,
        position: world.position().await,
        held: world.held_item().await,
        inventory: world.inventory().await,
        started_at: state.started_at,
    };

    Ok(Json(serde_json::to_value(&snapshot)?))
}

// ---------------------------------------------------------------------------
// POST /api/command -- dispatch one command line
// ---------------------------------------------------------------------------

/// Run one command line through the agent's dispatcher.
///
/// The reply mirrors what the dispatcher would say in chat; a line that
/// matches no command yields `"response": null`.
pub async fn post_command(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    if request.command.trim().is_empty() {
        return Err(ObserverError::EmptyCommand);
    }

    let response =
        golem_agent::handle_line(&state.agent, &request.command, CommandSource::Web).await;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "response": response,
    })))
}
