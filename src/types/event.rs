//! Stimuli flowing into and out of a race session

use serde::{Deserialize, Serialize};

use super::{CheckpointId, LapRecord};

/// Inbound stimulus from the host loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "snake_case")]
pub enum RaceInput {
    /// One simulation step of `delta_ms` milliseconds; negative deltas count as zero
    Tick(i64),
    /// The tracked vehicle entered a checkpoint trigger
    Crossing(CheckpointId),
}

/// A finished lap as handed to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapCompletion {
    /// 1-based number of the completed lap within the session
    pub lap: u32,
    /// Finalized record
    pub record: LapRecord,
    /// Whether this lap replaced the session best
    pub new_best: bool,
}

/// Outbound lap lifecycle signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum RaceEvent {
    /// A lap began; per-lap displays should reset
    LapStarted { lap: u32 },
    /// A checkpoint was crossed in order; `split_ms` is the segment just closed
    CheckpointReached { checkpoint: CheckpointId, split_ms: u64 },
    /// A lap was finalized and pushed to history
    LapCompleted(LapCompletion),
}
