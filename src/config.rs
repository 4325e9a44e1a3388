//! Session configuration
//!
//! Track layouts and session settings are authored as YAML:
//!
//! ```yaml
//! track:
//!   name: Harbour Loop
//!   checkpoints:
//!     - id: 0
//!     - id: 1
//!       respawn: { position: [12.0, 0.5, -4.0], rotation: [0.0, 0.7071, 0.0, 0.7071] }
//!     - id: 2
//! history_capacity: 3
//! respawn:
//!   use_checkpoints: true
//!   delay_ms: 500
//! ```
//!
//! Every field has a default except the checkpoint list, which must describe a
//! valid lap (see [`CheckpointRegistry::new`]).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::race::DEFAULT_HISTORY_CAPACITY;
use crate::track::CheckpointRegistry;
use crate::types::Checkpoint;
use crate::{RaceError, Result};

/// Track layout as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub name: String,
    /// Checkpoints in traversal order, start/finish first
    pub checkpoints: Vec<Checkpoint>,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self { name: "Unnamed Track".to_string(), checkpoints: Vec::new() }
    }
}

impl TrackConfig {
    /// Validate the checkpoint list into a registry
    pub fn registry(&self) -> Result<CheckpointRegistry> {
        CheckpointRegistry::new(self.checkpoints.clone())
    }
}

/// Respawn behaviour of the surrounding game layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnConfig {
    /// Respawn at the last checkpoint reached instead of the start position
    pub use_checkpoints: bool,
    /// Delay between a respawn request and repositioning the vehicle
    pub delay_ms: u64,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self { use_checkpoints: true, delay_ms: 500 }
    }
}

impl RespawnConfig {
    /// Respawn delay as a `Duration`
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Everything needed to build a [`RaceSession`](crate::RaceSession)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub track: TrackConfig,
    /// Completed laps kept in history
    pub history_capacity: usize,
    pub respawn: RespawnConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            track: TrackConfig::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            respawn: RespawnConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Config for a track given by bare checkpoint ids
    pub fn for_track(name: impl Into<String>, ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            track: TrackConfig {
                name: name.into(),
                checkpoints: ids.into_iter().map(Checkpoint::new).collect(),
            },
            ..Self::default()
        }
    }

    /// Parse and validate YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SessionConfig = serde_yaml_ng::from_str(yaml)
            .map_err(|e| RaceError::parse_error("session config", e.to_string()))?;
        config.validate()?;
        debug!(
            track = %config.track.name,
            checkpoints = config.track.checkpoints.len(),
            "Session config parsed"
        );
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| RaceError::file_error(path.to_path_buf(), e))?;
        Self::from_yaml(&yaml)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check every setting without building a session
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(RaceError::invalid_config("history_capacity", "must be at least 1"));
        }
        self.track.registry().map(|_| ())
    }
}
