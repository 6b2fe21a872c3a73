//! Tunable behavior parameters.
//!
//! The canonical configuration lives in `golem.yaml` at the project root.
//! Every field has a default matching the behavior design, so a missing
//! file or a partial file still yields a working agent.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level behavior configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BehaviorConfig {
    /// Farming cycle parameters.
    #[serde(default)]
    pub farm: FarmConfig,

    /// Branch-mining parameters, including deposit thresholds.
    #[serde(default)]
    pub mine: MineConfig,

    /// Follow behavior parameters.
    #[serde(default)]
    pub follow: FollowConfig,

    /// Chest handshake and transaction pacing parameters.
    #[serde(default)]
    pub chest: ChestConfig,
}

impl BehaviorConfig {
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

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Farming cycle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FarmConfig {
    /// How far out to scan for mature crops, in cells.
    #[serde(default = "default_farm_scan_radius")]
    pub scan_radius: i64,

    /// Delay between cycles after a harvest attempt, in milliseconds.
    #[serde(default = "default_farm_cycle_delay_ms")]
    pub cycle_delay_ms: u64,

    /// Back-off delay when no mature crop is in range, in milliseconds.
    #[serde(default = "default_farm_backoff_delay_ms")]
    pub backoff_delay_ms: u64,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            scan_radius: default_farm_scan_radius(),
            cycle_delay_ms: default_farm_cycle_delay_ms(),
            backoff_delay_ms: default_farm_backoff_delay_ms(),
        }
    }
}

/// Branch-mining configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MineConfig {
    /// Tunnel steps per branch before rotating.
    #[serde(default = "default_branch_length")]
    pub branch_length: u32,

    /// Cells between parallel branches.
    #[serde(default = "default_branch_spacing")]
    pub branch_spacing: i64,

    /// Delay between successful cycles, in milliseconds.
    #[serde(default = "default_mine_cycle_delay_ms")]
    pub cycle_delay_ms: u64,

    /// Back-off delay after a failed cycle, in milliseconds.
    #[serde(default = "default_mine_error_delay_ms")]
    pub error_delay_ms: u64,

    /// Carried ore count that triggers a deposit run.
    #[serde(default = "default_ore_cap")]
    pub ore_cap: u64,

    /// Health at or below which a deposit run is triggered.
    #[serde(default = "default_health_floor")]
    pub health_floor: f32,

    /// Remaining pickaxe durability at or below which a deposit run is
    /// triggered. Skipped entirely when the tool reports no durability.
    #[serde(default = "default_durability_floor")]
    pub durability_floor: u32,
}

impl Default for MineConfig {
    fn default() -> Self {
        Self {
            branch_length: default_branch_length(),
            branch_spacing: default_branch_spacing(),
            cycle_delay_ms: default_mine_cycle_delay_ms(),
            error_delay_ms: default_mine_error_delay_ms(),
            ore_cap: default_ore_cap(),
            health_floor: default_health_floor(),
            durability_floor: default_durability_floor(),
        }
    }
}

/// Follow behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FollowConfig {
    /// How often the chase goal is re-aimed, in milliseconds.
    #[serde(default = "default_reaim_interval_ms")]
    pub reaim_interval_ms: u64,

    /// How close to stay to the target, in cells.
    #[serde(default = "default_follow_distance")]
    pub distance: u32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            reaim_interval_ms: default_reaim_interval_ms(),
            distance: default_follow_distance(),
        }
    }
}

/// Chest handshake and transaction pacing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChestConfig {
    /// Ticks to wait after announcing a chest assignment before scanning.
    #[serde(default = "default_handshake_wait_ticks")]
    pub handshake_wait_ticks: u32,

    /// How far out to scan for the placed chest, in cells.
    #[serde(default = "default_chest_scan_radius")]
    pub scan_radius: i64,

    /// Ticks paused after each container open/deposit/close action.
    #[serde(default = "default_pacing_ticks")]
    pub pacing_ticks: u32,
}

impl Default for ChestConfig {
    fn default() -> Self {
        Self {
            handshake_wait_ticks: default_handshake_wait_ticks(),
            scan_radius: default_chest_scan_radius(),
            pacing_ticks: default_pacing_ticks(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_farm_scan_radius() -> i64 {
    32
}

const fn default_farm_cycle_delay_ms() -> u64 {
    1_500
}

const fn default_farm_backoff_delay_ms() -> u64 {
    2_000
}

const fn default_branch_length() -> u32 {
    16
}

const fn default_branch_spacing() -> i64 {
    3
}

const fn default_mine_cycle_delay_ms() -> u64 {
    500
}

const fn default_mine_error_delay_ms() -> u64 {
    2_000
}

const fn default_ore_cap() -> u64 {
    64
}

const fn default_health_floor() -> f32 {
    12.0
}

const fn default_durability_floor() -> u32 {
    10
}

const fn default_reaim_interval_ms() -> u64 {
    1_000
}

const fn default_follow_distance() -> u32 {
    1
}

const fn default_handshake_wait_ticks() -> u32 {
    40
}

const fn default_chest_scan_radius() -> i64 {
    10
}

const fn default_pacing_ticks() -> u32 {
    5
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
