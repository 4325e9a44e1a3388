//! Race progression: checkpoint ordering, lap records and the session that ties them together
//!
//! ## Flow
//!
//! 1. The host reports a crossing to [`RaceSession::on_checkpoint_crossed`]
//! 2. [`CheckpointStateMachine`] validates it against the registry order
//! 3. On an accepted crossing the session captures a split from the
//!    [`LapTimer`](crate::LapTimer) and writes it into the [`LapRecordStore`]
//! 4. Crossing the start/finish line closes the lap, updates history and best,
//!    and immediately starts the next lap
//! 5. Every step is published to the session's [`RaceObserver`]s
//!
//! ```rust
//! use checkered::{CheckpointRegistry, RaceSession};
//!
//! let registry = CheckpointRegistry::from_ids([0, 1, 2])?;
//! let mut session = RaceSession::new(registry, 3)?;
//!
//! for id in [0, 1, 2, 0] {
//!     session.tick(1_000);
//!     session.on_checkpoint_crossed(id);
//! }
//! assert_eq!(session.best().map(|lap| lap.total_ms()), Some(3_000));
//! # Ok::<(), checkered::RaceError>(())
//! ```

mod observer;
mod records;
mod session;
mod state_machine;

pub use observer::{DEFAULT_EVENT_CAPACITY, EventBus, RaceObserver};
pub use records::{DEFAULT_HISTORY_CAPACITY, LapRecordStore};
pub use session::RaceSession;
pub use state_machine::{CheckpointStateMachine, Rejection, Transition};
