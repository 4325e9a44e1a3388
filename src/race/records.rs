//! Lap record accumulation, bounded history and best-lap tracking

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::types::{LapCompletion, LapRecord, SplitSlot};
use crate::{RaceError, Result};

/// History length used when the config does not set one
pub const DEFAULT_HISTORY_CAPACITY: usize = 3;

/// Current lap plus the most recent completed laps of a session
#[derive(Debug, Clone)]
pub struct LapRecordStore {
    current: LapRecord,
    history: VecDeque<LapRecord>,
    capacity: usize,
    best: Option<LapRecord>,
    completed: u32,
}

impl Default for LapRecordStore {
    fn default() -> Self {
        Self {
            current: LapRecord::new(),
            history: VecDeque::with_capacity(DEFAULT_HISTORY_CAPACITY),
            capacity: DEFAULT_HISTORY_CAPACITY,
            best: None,
            completed: 0,
        }
    }
}

impl LapRecordStore {
    /// Store retaining `capacity` completed laps
    ///
    /// # Errors
    ///
    /// Returns [`RaceError::InvalidConfig`] for a zero capacity.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(RaceError::invalid_config("history_capacity", "must be at least 1"));
        }
        Ok(Self { capacity, history: VecDeque::with_capacity(capacity), ..Self::default() })
    }

    /// Replace the current record with a zeroed one
    pub fn begin_lap(&mut self) {
        self.current = LapRecord::new();
        debug!("New lap record armed");
    }

    /// Write a split by raw slot index; out-of-range slots are logged and ignored
    ///
    /// Sessions never hit the out-of-range branch: registries longer than the
    /// slot count are rejected when the track is built.
    pub fn record_split(&mut self, slot_index: usize, value_ms: u64) -> bool {
        match SplitSlot::from_index(slot_index) {
            Some(slot) => {
                self.record_slot(slot, value_ms);
                true
            }
            None => {
                warn!(slot_index, value_ms, "No split slot for this index, split dropped");
                false
            }
        }
    }

    /// Write a split into the current record
    pub fn record_slot(&mut self, slot: SplitSlot, value_ms: u64) {
        self.current.set_split(slot, value_ms);
        debug!(slot = slot.label(), value_ms, "Split recorded");
    }

    /// Finalize the current lap, push it to history and arm the next record
    ///
    /// `total_ms` is the timer's measurement of the lap; the stored total is
    /// always the split sum, and a disagreement is logged.
    pub fn complete_lap(&mut self, total_ms: u64) -> LapCompletion {
        let record = self.current;
        if record.total_ms() != total_ms {
            warn!(
                timer_ms = total_ms,
                splits_ms = record.total_ms(),
                "Timer lap total disagrees with split sum"
            );
        }

        self.history.push_back(record);
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }

        // Ties keep the lap that set the time first
        let new_best = match &self.best {
            Some(best) => record.total_ms() < best.total_ms(),
            None => true,
        };
        if new_best {
            self.best = Some(record);
        }

        self.completed += 1;
        info!(lap = self.completed, total_ms = record.total_ms(), new_best, "Lap finalized");

        self.begin_lap();
        LapCompletion { lap: self.completed, record, new_best }
    }

    /// Record at recency slot `index` (0 = oldest retained)
    pub fn history(&self, index: usize) -> Option<&LapRecord> {
        self.history.get(index)
    }

    /// Retained laps, oldest first
    pub fn history_iter(&self) -> impl Iterator<Item = &LapRecord> {
        self.history.iter()
    }

    /// Most recently completed lap
    pub fn latest(&self) -> Option<&LapRecord> {
        self.history.back()
    }

    /// Fastest lap of the session
    pub fn best(&self) -> Option<&LapRecord> {
        self.best.as_ref()
    }

    /// Lap being recorded
    pub fn current(&self) -> &LapRecord {
        &self.current
    }

    /// Laps completed this session, including those evicted from history
    pub fn completed_laps(&self) -> u32 {
        self.completed
    }

    /// Maximum retained history length
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget all laps, best included
    pub fn clear(&mut self) {
        self.history.clear();
        self.best = None;
        self.completed = 0;
        self.begin_lap();
    }
}
