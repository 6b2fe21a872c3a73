//! Runner process configuration.
//!
//! One YAML file, `golem.yaml` at the working directory, configures the
//! whole process: the agent's username, the observer bind address, and
//! the behavior tuning sections (`farm`, `mine`, `follow`, `chest`) that
//! the behavior layer reads. Every field has a default, so a missing or
//! partial file still yields a working process.

use std::path::Path;

use serde::Deserialize;

use golem_agent::{BehaviorConfig, ConfigError};
use golem_observer::ServerConfig;

/// Full process configuration, as parsed from `golem.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunnerConfig {
    /// The agent's username in the demo world.
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    /// Observer server bind address.
    #[serde(default)]
    pub observer: ServerConfig,

    /// Behavior tuning; its sections sit at the top level of the file.
    #[serde(flatten)]
    pub behavior: BehaviorConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            agent_name: default_agent_name(),
            observer: ServerConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

fn default_agent_name() -> String {
    String::from("golem")
}

impl RunnerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Load from `path`, falling back to defaults when the file does not
    /// exist. A present-but-invalid file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
