//! End-to-end lap scenarios through the public session API
//!
//! Each test builds a session from YAML or bare ids the way a game would and
//! feeds it the crossings a driver produces on track.

use checkered::{
    CheckpointId, LapRecord, Pace, ProgressPhase, RaceEvent, RaceSession, Rejection,
    RespawnTarget, SessionConfig, SplitSlot, Transition, classify_pace, format_race_time,
    format_split_time,
};
use std::sync::{Arc, Mutex};

const COASTAL_SPRINT: &str = r#"
track:
  name: Coastal Sprint
  checkpoints:
    - id: 0
    - id: 11
      respawn:
        position: [120.0, 2.0, 40.0]
        rotation: [0.0, 0.3827, 0.0, 0.9239]
    - id: 12
    - id: 13
      respawn:
        position: [-30.0, 1.5, 210.0]
history_capacity: 3
"#;

fn session(ids: &[CheckpointId]) -> RaceSession {
    let config = SessionConfig::for_track("Test Oval", ids.iter().copied());
    RaceSession::from_config(&config).expect("valid track")
}

fn lap(session: &mut RaceSession, ids: &[CheckpointId], split_ms: &[i64]) {
    for (id, delta) in ids.iter().zip(split_ms) {
        session.tick(*delta);
        session.on_checkpoint_crossed(*id);
    }
}

#[test]
fn five_checkpoint_reference_lap() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut session = session(&[0, 1, 2, 3, 4]);
    session.on_checkpoint_crossed(0);
    lap(&mut session, &[1, 2, 3, 4, 0], &[1_000; 5]);

    let recorded = session.history(0).copied().expect("one lap in history");
    assert_eq!(recorded.total_ms(), 5_000);
    for slot in SplitSlot::ALL {
        assert_eq!(recorded.split(slot), 1_000);
    }
    assert_eq!(session.history(1), None);
    assert_eq!(session.best(), Some(&recorded));
    assert_eq!(format_race_time(recorded.total_ms() as i64), "0:05.000");
}

#[test]
fn shortcut_is_not_a_lap() {
    let mut session = session(&[0, 1, 2, 3, 4]);
    session.on_checkpoint_crossed(0);
    session.tick(900);

    assert!(!session.on_checkpoint_crossed(2).is_accepted());
    assert!(!session.on_checkpoint_crossed(0).is_accepted());
    assert_eq!(session.progress().next_expected(), 1);
    assert_eq!(session.last_split_ms(), 0);
    assert_eq!(session.elapsed_ms(), 900);
    assert_eq!(session.records().completed_laps(), 0);
}

#[test]
fn two_checkpoint_track_alternates() {
    let mut session = session(&[0, 1]);
    session.on_checkpoint_crossed(0);
    lap(&mut session, &[1, 0, 1, 0], &[400, 600, 300, 500]);

    assert_eq!(session.records().completed_laps(), 2);
    assert_eq!(session.history(0).map(LapRecord::total_ms), Some(1_000));
    assert_eq!(session.history(1).map(LapRecord::total_ms), Some(800));
    let best = session.best().copied().expect("best lap");
    assert_eq!(best.split(SplitSlot::A), 300);
    assert_eq!(best.split(SplitSlot::Final), 500);
}

#[test]
fn history_keeps_most_recent_laps() {
    let mut session = session(&[0, 1, 2]);
    session.on_checkpoint_crossed(0);
    for split in [100, 200, 300, 400, 500] {
        lap(&mut session, &[1, 2, 0], &[split; 3]);
    }

    let totals: Vec<_> = (0..3).filter_map(|i| session.history(i)).map(|r| r.total_ms()).collect();
    assert_eq!(totals, [900, 1_200, 1_500]);
    assert_eq!(session.history(3), None);
    assert_eq!(session.best().map(|r| r.total_ms()), Some(300));
}

#[test]
fn tied_lap_keeps_first_best() {
    let mut session = session(&[0, 1]);
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    session.add_observer(move |event: &RaceEvent| {
        if let RaceEvent::LapCompleted(done) = event {
            sink.lock().unwrap().push(done.new_best);
        }
    });

    session.on_checkpoint_crossed(0);
    lap(&mut session, &[1, 0], &[500, 500]);
    lap(&mut session, &[1, 0], &[300, 700]);

    assert_eq!(*events.lock().unwrap(), [true, false]);
    assert_eq!(session.best().map(|r| r.split(SplitSlot::A)), Some(500));
}

#[test]
fn yaml_track_with_respawn_points() {
    let config = SessionConfig::from_yaml(COASTAL_SPRINT).expect("config parses");
    let mut session = RaceSession::from_config(&config).expect("valid track");

    session.on_checkpoint_crossed(0);
    assert_eq!(session.respawn_target(), RespawnTarget::StartPosition);

    session.tick(8_000);
    session.on_checkpoint_crossed(11);
    match session.respawn_target() {
        RespawnTarget::Checkpoint { id, point } => {
            assert_eq!(id, 11);
            assert_eq!(point.position, [120.0, 2.0, 40.0]);
        }
        other => panic!("expected checkpoint respawn, got {:?}", other),
    }

    session.tick(6_000);
    session.on_checkpoint_crossed(12);
    assert_eq!(session.respawn_target(), RespawnTarget::StartPosition);
    assert_eq!(session.last_checkpoint(), Some(12));
}

#[test]
fn restart_mid_lap() {
    let mut session = session(&[0, 1, 2]);
    session.on_checkpoint_crossed(0);
    lap(&mut session, &[1, 2, 0], &[1_000; 3]);
    lap(&mut session, &[1], &[2_000]);

    session.restart();
    assert_eq!(session.progress().phase(), ProgressPhase::WaitingForLapStart);
    assert_eq!(
        session.on_checkpoint_crossed(1),
        Transition::Ignored(Rejection::LapNotStarted { checkpoint: 1 })
    );

    session.on_checkpoint_crossed(0);
    lap(&mut session, &[1, 2, 0], &[900; 3]);
    assert_eq!(session.records().completed_laps(), 2);
    assert_eq!(session.best().map(|r| r.total_ms()), Some(2_700));
}

#[test]
fn split_display_against_best() {
    let mut session = session(&[0, 1]);
    session.on_checkpoint_crossed(0);
    lap(&mut session, &[1, 0], &[20_000, 40_000]);

    let best = session.best().map(|r| r.total_ms() as i64).unwrap_or(0);
    assert_eq!(format_race_time(best), "1:00.000");
    assert_eq!(format_split_time(session.last_split_ms() as i64), "40.000");

    assert_eq!(classify_pace(59_000, best), Some(Pace::Faster));
    assert_eq!(classify_pace(62_000, best), Some(Pace::Close));
    assert_eq!(classify_pace(64_000, best), Some(Pace::Slower));
    assert_eq!(classify_pace(64_000, 0), None);
}

#[test]
fn invalid_tracks_are_rejected_up_front() {
    assert!(SessionConfig::for_track("Empty", []).validate().is_err());
    assert!(SessionConfig::for_track("No Start", [1, 0]).validate().is_err());
    assert!(SessionConfig::for_track("Twice", [0, 1, 1]).validate().is_err());
    assert!(SessionConfig::for_track("Too Long", 0..6).validate().is_err());
    assert!(SessionConfig::for_track("Five", 0..5).validate().is_ok());
}
