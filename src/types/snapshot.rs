//! Point-in-time view of a race session

use serde::{Deserialize, Serialize};

use super::{CheckpointId, LapRecord, ProgressPhase};

/// Everything a HUD needs to render one frame
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RaceSnapshot {
    pub phase: ProgressPhase,
    pub next_expected: usize,
    pub last_checkpoint: Option<CheckpointId>,
    pub elapsed_ms: u64,
    pub last_split_ms: u64,
    pub last_lap_ms: u64,
    /// Splits recorded so far in the running lap
    pub current_lap: LapRecord,
    pub best: Option<LapRecord>,
    /// Retained history, oldest first
    pub history: Vec<LapRecord>,
    pub completed_laps: u32,
    pub paused: bool,
}
