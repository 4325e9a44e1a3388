//! Free-running lap stopwatch with split capture
//!
//! The timer has no clock of its own: the host loop feeds it elapsed time via
//! [`LapTimer::tick`] once per simulation step. The total and split
//! accumulators grow by the same deltas, so after [`LapTimer::mark_split`] the
//! splits captured since [`LapTimer::start`] always add up to the elapsed time.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Internal timer state, exposed read-only for snapshots
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct TimerState {
    pub running: bool,
    pub elapsed_ms: u64,
    pub split_ms: u64,
    pub last_lap_ms: u64,
    pub last_split_ms: u64,
}

/// Millisecond stopwatch driven by frame deltas
#[derive(Default, Debug, Clone)]
pub struct LapTimer {
    state: TimerState,
}

impl LapTimer {
    /// Create a stopped timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero both accumulators and start running
    pub fn start(&mut self) {
        self.state.elapsed_ms = 0;
        self.state.split_ms = 0;
        self.state.running = true;
        debug!("Lap timer started");
    }

    /// Advance by `delta_ms`; negative deltas are clamped to zero
    pub fn tick(&mut self, delta_ms: i64) {
        if !self.state.running {
            return;
        }
        let delta = delta_ms.max(0) as u64;
        self.state.elapsed_ms = self.state.elapsed_ms.saturating_add(delta);
        self.state.split_ms = self.state.split_ms.saturating_add(delta);
        trace!(delta, elapsed = self.state.elapsed_ms, "Lap timer tick");
    }

    /// Advance by a `Duration`, truncated to whole milliseconds
    pub fn advance(&mut self, delta: Duration) {
        self.tick(i64::try_from(delta.as_millis()).unwrap_or(i64::MAX));
    }

    /// Capture the running split and restart split accumulation
    pub fn mark_split(&mut self) {
        self.state.last_split_ms = self.state.split_ms;
        self.state.split_ms = 0;
        debug!(split_ms = self.state.last_split_ms, "Split captured");
    }

    /// Stop and remember the elapsed time as the last lap total
    pub fn stop(&mut self) {
        self.state.running = false;
        self.state.last_lap_ms = self.state.elapsed_ms;
        debug!(lap_ms = self.state.last_lap_ms, "Lap timer stopped");
    }

    /// Stop and clear everything, including the last lap and split
    pub fn reset(&mut self) {
        self.state = TimerState::default();
    }

    /// Whether ticks currently accumulate
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Time since the last `start()`
    pub fn elapsed_ms(&self) -> u64 {
        self.state.elapsed_ms
    }

    /// Time accumulated since the last split boundary
    pub fn current_split_ms(&self) -> u64 {
        self.state.split_ms
    }

    /// Value captured by the last `mark_split()`
    pub fn last_split_ms(&self) -> u64 {
        self.state.last_split_ms
    }

    /// Value captured by the last `stop()`
    pub fn last_lap_ms(&self) -> u64 {
        self.state.last_lap_ms
    }

    /// Copy of the full timer state
    pub fn state(&self) -> TimerState {
        self.state
    }
}
