//! Race progress as tracked by the checkpoint state machine

use serde::{Deserialize, Serialize};

use super::CheckpointId;

/// Lap lifecycle phase
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum ProgressPhase {
    /// Only a start/finish crossing has any effect
    #[default]
    WaitingForLapStart,
    /// A lap is running; crossings are validated against the expected checkpoint
    LapInProgress,
}

/// Where the car is within the current lap
///
/// Read-only outside the state machine; `next_expected` is always a valid
/// index into the checkpoint registry it was created for.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RaceProgressState {
    pub(crate) phase: ProgressPhase,
    pub(crate) next_expected: usize,
    pub(crate) last_checkpoint: Option<CheckpointId>,
}

impl RaceProgressState {
    /// Current lap phase
    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    /// Whether a lap is running
    pub fn lap_started(&self) -> bool {
        self.phase == ProgressPhase::LapInProgress
    }

    /// Registry index of the checkpoint that must be crossed next
    pub fn next_expected(&self) -> usize {
        self.next_expected
    }

    /// Last checkpoint accepted by the state machine
    pub fn last_checkpoint(&self) -> Option<CheckpointId> {
        self.last_checkpoint
    }
}
