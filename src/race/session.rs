//! Race session: one vehicle's state machine, timer and lap records
//!
//! The session is the only object the host talks to. It owns every component,
//! so there is no window in which a crossing can arrive before the timer or
//! record store exists. Multi-vehicle games create one session per vehicle.

use std::fmt;

use tracing::{debug, info, trace};

use super::observer::RaceObserver;
use super::records::LapRecordStore;
use super::state_machine::{CheckpointStateMachine, Transition};
use crate::config::{RespawnConfig, SessionConfig};
use crate::respawn::RespawnTarget;
use crate::timing::LapTimer;
use crate::track::CheckpointRegistry;
use crate::types::{
    CheckpointId, LapRecord, RaceEvent, RaceInput, RaceProgressState, RaceSnapshot, SplitSlot,
};
use crate::Result;

/// Checkpoint progression and lap timing for a single vehicle
pub struct RaceSession {
    machine: CheckpointStateMachine,
    timer: LapTimer,
    records: LapRecordStore,
    observers: Vec<Box<dyn RaceObserver>>,
    respawn: RespawnConfig,
    paused: bool,
}

impl fmt::Debug for RaceSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RaceSession")
            .field("machine", &self.machine)
            .field("timer", &self.timer)
            .field("records", &self.records)
            .field("observers", &self.observers.len())
            .field("respawn", &self.respawn)
            .field("paused", &self.paused)
            .finish()
    }
}

impl RaceSession {
    /// Session over `registry` keeping `history_capacity` completed laps
    pub fn new(registry: CheckpointRegistry, history_capacity: usize) -> Result<Self> {
        Ok(Self {
            machine: CheckpointStateMachine::new(registry),
            timer: LapTimer::new(),
            records: LapRecordStore::new(history_capacity)?,
            observers: Vec::new(),
            respawn: RespawnConfig::default(),
            paused: false,
        })
    }

    /// Validate `config` and build a session from it
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let registry = config.track.registry()?;
        let mut session = Self::new(registry, config.history_capacity)?;
        session.respawn = config.respawn;
        info!(
            track = %config.track.name,
            checkpoints = session.registry().len(),
            "Race session created"
        );
        Ok(session)
    }

    /// Attach an observer for the lifetime of the session
    pub fn add_observer(&mut self, observer: impl RaceObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Detach every observer
    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    /// Apply one inbound stimulus
    pub fn apply(&mut self, input: RaceInput) {
        match input {
            RaceInput::Tick(delta_ms) => self.tick(delta_ms),
            RaceInput::Crossing(checkpoint) => {
                self.on_checkpoint_crossed(checkpoint);
            }
        }
    }

    /// Advance the lap timer by one frame; ignored while paused
    pub fn tick(&mut self, delta_ms: i64) {
        if self.paused {
            trace!(delta_ms, "Session paused, tick ignored");
            return;
        }
        self.timer.tick(delta_ms);
    }

    /// Handle a checkpoint trigger; never fails, rejected crossings are logged
    pub fn on_checkpoint_crossed(&mut self, checkpoint: CheckpointId) -> Transition {
        let transition = self.machine.on_crossing(checkpoint);
        match transition {
            Transition::LapStarted => {
                self.records.begin_lap();
                self.timer.start();
                self.emit(RaceEvent::LapStarted { lap: self.records.completed_laps() + 1 });
            }
            Transition::SplitReached { checkpoint, slot } => {
                let split_ms = self.close_split(slot);
                self.emit(RaceEvent::CheckpointReached { checkpoint, split_ms });
            }
            Transition::LapCompleted => {
                let split_ms = self.close_split(SplitSlot::Final);
                self.emit(RaceEvent::CheckpointReached { checkpoint, split_ms });

                self.timer.stop();
                let completion = self.records.complete_lap(self.timer.last_lap_ms());
                self.emit(RaceEvent::LapCompleted(completion));

                self.timer.start();
                self.emit(RaceEvent::LapStarted { lap: completion.lap + 1 });
            }
            Transition::Ignored(reason) => {
                debug!(?reason, "Crossing ignored");
            }
        }
        transition
    }

    fn close_split(&mut self, slot: SplitSlot) -> u64 {
        self.timer.mark_split();
        let split_ms = self.timer.last_split_ms();
        self.records.record_slot(slot, split_ms);
        split_ms
    }

    fn emit(&mut self, event: RaceEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    /// Abandon the running lap and wait for the start/finish line again
    ///
    /// Completed laps and the session best are kept.
    pub fn restart(&mut self) {
        self.machine.reset();
        self.timer.reset();
        self.records.begin_lap();
        self.paused = false;
        info!("Race session restarted");
    }

    /// Freeze or unfreeze the lap timer
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, "Session pause toggled");
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Where a respawn requested now should place the vehicle
    ///
    /// Read-only: selecting a target never changes race progress.
    pub fn respawn_target(&self) -> RespawnTarget {
        if !self.respawn.use_checkpoints {
            return RespawnTarget::StartPosition;
        }
        self.last_checkpoint()
            .and_then(|id| self.registry().find(id))
            .and_then(|checkpoint| {
                let id = checkpoint.id;
                checkpoint.respawn.map(|point| RespawnTarget::Checkpoint { id, point })
            })
            .unwrap_or(RespawnTarget::StartPosition)
    }

    /// Respawn settings this session was built with
    pub fn respawn_config(&self) -> &RespawnConfig {
        &self.respawn
    }

    pub fn last_checkpoint(&self) -> Option<CheckpointId> {
        self.machine.last_checkpoint()
    }

    pub fn best(&self) -> Option<&LapRecord> {
        self.records.best()
    }

    /// Completed lap at recency slot `index` (0 = oldest retained)
    pub fn history(&self, index: usize) -> Option<&LapRecord> {
        self.records.history(index)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.timer.elapsed_ms()
    }

    pub fn last_split_ms(&self) -> u64 {
        self.timer.last_split_ms()
    }

    pub fn last_lap_ms(&self) -> u64 {
        self.timer.last_lap_ms()
    }

    pub fn progress(&self) -> &RaceProgressState {
        self.machine.progress()
    }

    pub fn registry(&self) -> &CheckpointRegistry {
        self.machine.registry()
    }

    pub fn records(&self) -> &LapRecordStore {
        &self.records
    }

    pub fn timer(&self) -> &LapTimer {
        &self.timer
    }

    /// Capture the full query surface
    pub fn snapshot(&self) -> RaceSnapshot {
        let progress = self.progress();
        RaceSnapshot {
            phase: progress.phase(),
            next_expected: progress.next_expected(),
            last_checkpoint: progress.last_checkpoint(),
            elapsed_ms: self.timer.elapsed_ms(),
            last_split_ms: self.timer.last_split_ms(),
            last_lap_ms: self.timer.last_lap_ms(),
            current_lap: *self.records.current(),
            best: self.records.best().copied(),
            history: self.records.history_iter().copied().collect(),
            completed_laps: self.records.completed_laps(),
            paused: self.paused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::state_machine::Rejection;
    use crate::test_utils::{drive, five_checkpoint_session};
    use crate::types::{Checkpoint, LapCompletion, ProgressPhase, RespawnPoint};
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    fn recorded(session: &mut RaceSession) -> Arc<Mutex<Vec<RaceEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        session.add_observer(move |event: &RaceEvent| sink.lock().unwrap().push(*event));
        events
    }

    #[test]
    fn one_clean_lap() {
        let mut session = five_checkpoint_session();
        drive(&mut session, &[0, 1, 2, 3, 4, 0], 1_000);

        let lap = session.history(0).copied().unwrap();
        assert_eq!(lap.total_ms(), 5_000);
        assert_eq!(lap.splits(), &[1_000; 5]);
        assert_eq!(session.history(1), None);
        assert_eq!(session.best(), Some(&lap));
        assert_eq!(session.last_lap_ms(), 5_000);
        assert_eq!(session.elapsed_ms(), 0);
        assert_eq!(session.progress().next_expected(), 1);
    }

    #[test]
    fn skipped_checkpoint_records_nothing() {
        let mut session = five_checkpoint_session();
        session.on_checkpoint_crossed(0);
        session.tick(1_000);
        let transition = session.on_checkpoint_crossed(2);

        assert_eq!(
            transition,
            Transition::Ignored(Rejection::WrongCheckpoint { checkpoint: 2, expected: 1 })
        );
        assert_eq!(session.progress().next_expected(), 1);
        assert_eq!(*session.records().current(), LapRecord::new());
        assert_eq!(session.last_split_ms(), 0);
    }

    #[test]
    fn events_follow_lap_lifecycle() {
        let mut session = five_checkpoint_session();
        let events = recorded(&mut session);
        drive(&mut session, &[3, 0, 1, 2, 3, 4, 0], 500);

        let events = events.lock().unwrap().clone();
        let lap = LapRecord::from_splits([500; 5]);
        assert_eq!(
            events,
            [
                RaceEvent::LapStarted { lap: 1 },
                RaceEvent::CheckpointReached { checkpoint: 1, split_ms: 500 },
                RaceEvent::CheckpointReached { checkpoint: 2, split_ms: 500 },
                RaceEvent::CheckpointReached { checkpoint: 3, split_ms: 500 },
                RaceEvent::CheckpointReached { checkpoint: 4, split_ms: 500 },
                RaceEvent::CheckpointReached { checkpoint: 0, split_ms: 500 },
                RaceEvent::LapCompleted(LapCompletion { lap: 1, record: lap, new_best: true }),
                RaceEvent::LapStarted { lap: 2 },
            ]
        );
    }

    #[test]
    fn time_before_lap_start_is_not_counted() {
        let mut session = five_checkpoint_session();
        session.tick(10_000);
        drive(&mut session, &[0, 1, 2, 3, 4, 0], 100);
        assert_eq!(session.best().map(|r| r.total_ms()), Some(500));
    }

    #[test]
    fn huge_ticks_saturate_lap_total() {
        let mut session = RaceSession::new(CheckpointRegistry::from_ids([0, 1, 2]).unwrap(), 3)
            .unwrap();
        session.on_checkpoint_crossed(0);
        for id in [1, 2, 0] {
            session.tick(i64::MAX);
            session.on_checkpoint_crossed(id);
        }

        let lap = session.best().copied().unwrap();
        assert_eq!(lap.split(SplitSlot::A), i64::MAX as u64);
        assert_eq!(lap.total_ms(), u64::MAX);
        assert_eq!(session.last_lap_ms(), u64::MAX);
        assert_eq!(session.records().completed_laps(), 1);
    }

    #[test]
    fn pause_freezes_timer() {
        let mut session = five_checkpoint_session();
        session.on_checkpoint_crossed(0);
        session.tick(200);
        session.set_paused(true);
        session.tick(5_000);
        session.set_paused(false);
        session.tick(300);
        assert_eq!(session.elapsed_ms(), 500);
    }

    #[test]
    fn restart_keeps_completed_laps() {
        let mut session = five_checkpoint_session();
        drive(&mut session, &[0, 1, 2, 3, 4, 0, 1, 2], 700);
        session.restart();

        assert_eq!(session.progress().phase(), ProgressPhase::WaitingForLapStart);
        assert_eq!(session.elapsed_ms(), 0);
        assert_eq!(*session.records().current(), LapRecord::new());
        assert_eq!(session.records().completed_laps(), 1);
        assert!(session.best().is_some());
    }

    #[test]
    fn respawn_prefers_last_checkpoint_transform() {
        let point = RespawnPoint::at([4.0, 0.0, -2.0]);
        let registry = CheckpointRegistry::new(vec![
            Checkpoint::new(0),
            Checkpoint::with_respawn(1, point),
            Checkpoint::new(2),
        ])
        .unwrap();
        let mut session = RaceSession::new(registry, 3).unwrap();

        assert_eq!(session.respawn_target(), RespawnTarget::StartPosition);
        session.on_checkpoint_crossed(0);
        assert_eq!(session.respawn_target(), RespawnTarget::StartPosition);
        session.on_checkpoint_crossed(1);
        assert_eq!(session.respawn_target(), RespawnTarget::Checkpoint { id: 1, point });

        let before = *session.progress();
        let _ = session.respawn_target();
        assert_eq!(*session.progress(), before);
    }

    #[test]
    fn respawn_can_be_pinned_to_start() {
        let mut config = SessionConfig::default();
        config.track.checkpoints =
            vec![Checkpoint::new(0), Checkpoint::with_respawn(1, RespawnPoint::default())];
        config.respawn.use_checkpoints = false;
        let mut session = RaceSession::from_config(&config).unwrap();
        session.on_checkpoint_crossed(0);
        session.on_checkpoint_crossed(1);
        assert_eq!(session.respawn_target(), RespawnTarget::StartPosition);
    }

    #[test]
    fn snapshot_mirrors_queries() {
        let mut session = five_checkpoint_session();
        drive(&mut session, &[0, 1, 2, 3, 4, 0, 1], 250);
        session.tick(40);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, ProgressPhase::LapInProgress);
        assert_eq!(snapshot.next_expected, 2);
        assert_eq!(snapshot.last_checkpoint, Some(1));
        assert_eq!(snapshot.elapsed_ms, 290);
        assert_eq!(snapshot.last_split_ms, 250);
        assert_eq!(snapshot.current_lap.split(SplitSlot::A), 250);
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.completed_laps, 1);
    }

    proptest! {
        #[test]
        fn completed_laps_total_their_splits(
            inputs in prop::collection::vec(
                prop_oneof![
                    (0i64..3_000).prop_map(RaceInput::Tick),
                    (0u32..6).prop_map(RaceInput::Crossing),
                ],
                0..200,
            )
        ) {
            let mut session = five_checkpoint_session();
            let completions = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&completions);
            session.add_observer(move |event: &RaceEvent| {
                if let RaceEvent::LapCompleted(done) = event {
                    sink.lock().unwrap().push(*done);
                }
            });

            for input in inputs {
                match input {
                    RaceInput::Crossing(id) => {
                        let before = *session.records().current();
                        let next_before = session.progress().next_expected();
                        if !session.on_checkpoint_crossed(id).is_accepted() {
                            prop_assert_eq!(*session.records().current(), before);
                            prop_assert_eq!(session.progress().next_expected(), next_before);
                        }
                    }
                    tick => session.apply(tick),
                }
            }

            let completions = completions.lock().unwrap();
            let mut best = u64::MAX;
            for done in completions.iter() {
                prop_assert_eq!(done.new_best, done.record.total_ms() < best);
                best = best.min(done.record.total_ms());
            }
            prop_assert_eq!(session.records().completed_laps() as usize, completions.len());
            if let Some(recorded_best) = session.best() {
                prop_assert_eq!(recorded_best.total_ms(), best);
            }
        }
    }
}
