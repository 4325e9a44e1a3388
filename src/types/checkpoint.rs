//! Checkpoint identity and respawn transforms

use serde::{Deserialize, Serialize};

/// Integer identifier of a checkpoint trigger, unique within a track
pub type CheckpointId = u32;

/// Reserved id of the start/finish line
pub const START_FINISH: CheckpointId = 0;

/// Where a vehicle is placed when it respawns at a checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default)]
pub struct RespawnPoint {
    /// World position (x, y, z)
    pub position: [f32; 3],
    /// Orientation quaternion (x, y, z, w)
    pub rotation: [f32; 4],
}

impl Default for RespawnPoint {
    fn default() -> Self {
        Self::at([0.0; 3])
    }
}

impl RespawnPoint {
    /// Respawn point with identity rotation
    pub fn at(position: [f32; 3]) -> Self {
        Self { position, rotation: [0.0, 0.0, 0.0, 1.0] }
    }
}

/// A checkpoint as authored on the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Checkpoint {
    /// Trigger id reported by the track-side volume
    pub id: CheckpointId,
    /// Optional respawn transform; respawns fall back to the start position without one
    #[serde(default)]
    pub respawn: Option<RespawnPoint>,
}

impl Checkpoint {
    /// Checkpoint without a respawn transform
    pub fn new(id: CheckpointId) -> Self {
        Self { id, respawn: None }
    }

    /// Checkpoint with a respawn transform
    pub fn with_respawn(id: CheckpointId, respawn: RespawnPoint) -> Self {
        Self { id, respawn: Some(respawn) }
    }

    /// Whether this is the start/finish line
    pub fn is_start_finish(&self) -> bool {
        self.id == START_FINISH
    }
}
