//! Checkpoint ordering state machine
//!
//! Consumes checkpoint ids and decides what each crossing means for the lap.
//! The machine only owns [`RaceProgressState`]; the timer and record store
//! are driven by the caller from the returned [`Transition`].
//!
//! | Phase | Crossing | Result |
//! |---|---|---|
//! | waiting | start/finish | [`Transition::LapStarted`], expect index 1 |
//! | waiting | anything else | [`Rejection::LapNotStarted`] |
//! | running | expected, not start/finish | [`Transition::SplitReached`], advance cyclically |
//! | running | expected start/finish | [`Transition::LapCompleted`], expect index 1 |
//! | running | unexpected | [`Rejection::WrongCheckpoint`] |

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::track::CheckpointRegistry;
use crate::types::{CheckpointId, ProgressPhase, RaceProgressState, SplitSlot, START_FINISH};

/// Why a crossing was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// No lap is running and the crossing was not the start/finish line
    LapNotStarted { checkpoint: CheckpointId },
    /// The crossing skipped or repeated a checkpoint
    WrongCheckpoint { checkpoint: CheckpointId, expected: CheckpointId },
    /// The id is not part of this track
    UnknownCheckpoint { checkpoint: CheckpointId },
}

/// Outcome of a single crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// The start/finish line was crossed with no lap running
    LapStarted,
    /// An intermediate checkpoint was crossed in order
    SplitReached { checkpoint: CheckpointId, slot: SplitSlot },
    /// The start/finish line closed a running lap; the next lap starts immediately
    LapCompleted,
    /// Nothing changed
    Ignored(Rejection),
}

impl Transition {
    /// Whether the crossing changed progress
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Transition::Ignored(_))
    }
}

/// Validates checkpoint order against a registry
#[derive(Debug, Clone)]
pub struct CheckpointStateMachine {
    registry: CheckpointRegistry,
    progress: RaceProgressState,
}

impl CheckpointStateMachine {
    /// New machine waiting for the first start/finish crossing
    pub fn new(registry: CheckpointRegistry) -> Self {
        Self { registry, progress: RaceProgressState::default() }
    }

    /// Feed one crossing
    pub fn on_crossing(&mut self, checkpoint: CheckpointId) -> Transition {
        match self.progress.phase {
            ProgressPhase::WaitingForLapStart => self.while_waiting(checkpoint),
            ProgressPhase::LapInProgress => self.while_running(checkpoint),
        }
    }

    fn while_waiting(&mut self, checkpoint: CheckpointId) -> Transition {
        if checkpoint != START_FINISH {
            if !self.registry.contains(checkpoint) {
                warn!(checkpoint, "Crossing reported for a checkpoint not on this track");
                return Transition::Ignored(Rejection::UnknownCheckpoint { checkpoint });
            }
            debug!(checkpoint, "Lap not started, ignoring crossing");
            return Transition::Ignored(Rejection::LapNotStarted { checkpoint });
        }

        self.progress.phase = ProgressPhase::LapInProgress;
        self.progress.next_expected = self.registry.next_index(0);
        self.progress.last_checkpoint = Some(checkpoint);
        info!("Lap started");
        Transition::LapStarted
    }

    fn while_running(&mut self, checkpoint: CheckpointId) -> Transition {
        let index = self.progress.next_expected;
        let expected = self.registry.id_at(index).unwrap_or(START_FINISH);

        if checkpoint != expected {
            if !self.registry.contains(checkpoint) {
                warn!(checkpoint, "Crossing reported for a checkpoint not on this track");
                return Transition::Ignored(Rejection::UnknownCheckpoint { checkpoint });
            }
            debug!(checkpoint, expected, "Wrong checkpoint");
            return Transition::Ignored(Rejection::WrongCheckpoint { checkpoint, expected });
        }

        self.progress.last_checkpoint = Some(checkpoint);
        self.progress.next_expected = self.registry.next_index(index);

        if index == 0 {
            info!("Lap completed");
            return Transition::LapCompleted;
        }

        // Registry validation caps the length at the slot count
        let slot = SplitSlot::for_checkpoint_index(index).unwrap_or(SplitSlot::Final);
        debug!(checkpoint, slot = slot.label(), "Checkpoint reached");
        Transition::SplitReached { checkpoint, slot }
    }

    /// Back to waiting for the start/finish line
    pub fn reset(&mut self) {
        self.progress = RaceProgressState::default();
    }

    /// Current progress
    pub fn progress(&self) -> &RaceProgressState {
        &self.progress
    }

    /// Id that must be crossed next while a lap is running
    pub fn expected_checkpoint(&self) -> Option<CheckpointId> {
        match self.progress.phase {
            ProgressPhase::WaitingForLapStart => Some(START_FINISH),
            ProgressPhase::LapInProgress => self.registry.id_at(self.progress.next_expected),
        }
    }

    /// Last checkpoint accepted; read-only input to respawn selection
    pub fn last_checkpoint(&self) -> Option<CheckpointId> {
        self.progress.last_checkpoint
    }

    /// Track layout this machine validates against
    pub fn registry(&self) -> &CheckpointRegistry {
        &self.registry
    }
}
