//! Test utilities: track fixtures and input helpers
//!
//! Shared by unit tests and the benchmarks so that every test drives the
//! same canonical layouts.

#![cfg(any(test, feature = "benchmark"))]

use crate::config::SessionConfig;
use crate::race::RaceSession;
use crate::types::{CheckpointId, RaceInput};

/// The canonical five checkpoint layout: start/finish plus four sectors
pub const FIVE_CHECKPOINTS: [CheckpointId; 5] = [0, 1, 2, 3, 4];

/// YAML for a three checkpoint track with one respawn transform
pub const HARBOUR_LOOP_YAML: &str = r#"
track:
  name: Harbour Loop
  checkpoints:
    - id: 0
    - id: 1
      respawn:
        position: [12.0, 0.5, -4.0]
    - id: 2
history_capacity: 3
respawn:
  use_checkpoints: true
  delay_ms: 500
"#;

/// Session over [`FIVE_CHECKPOINTS`] with the default history length
pub fn five_checkpoint_session() -> RaceSession {
    let config = SessionConfig::for_track("Five Sector Test Track", FIVE_CHECKPOINTS);
    RaceSession::from_config(&config).expect("fixture track is valid")
}

/// Inputs crossing `ids` in order with `delta_ms` of ticks between consecutive crossings
pub fn crossing_inputs(ids: &[CheckpointId], delta_ms: i64) -> Vec<RaceInput> {
    let mut inputs = Vec::with_capacity(ids.len() * 2);
    for (n, id) in ids.iter().enumerate() {
        if n > 0 {
            inputs.push(RaceInput::Tick(delta_ms));
        }
        inputs.push(RaceInput::Crossing(*id));
    }
    inputs
}

/// Inputs for `laps` clean laps of [`FIVE_CHECKPOINTS`], each split lasting `split_ms`
pub fn clean_laps(laps: usize, split_ms: i64) -> Vec<RaceInput> {
    let mut ids = vec![0];
    for _ in 0..laps {
        ids.extend_from_slice(&FIVE_CHECKPOINTS[1..]);
        ids.push(0);
    }
    crossing_inputs(&ids, split_ms)
}

/// Apply [`crossing_inputs`] to a session
pub fn drive(session: &mut RaceSession, ids: &[CheckpointId], delta_ms: i64) {
    for input in crossing_inputs(ids, delta_ms) {
        session.apply(input);
    }
}
