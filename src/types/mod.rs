//! Core value types shared by the timing, track and race layers.
//!
//! ## Overview
//!
//! - [`Checkpoint`] / [`CheckpointId`] identify trigger regions on the track
//! - [`LapRecord`] holds the split times of one lap in the [`SplitSlot`] layout
//! - [`RaceProgressState`] is the state machine's view of where the car is in the lap
//! - [`RaceEvent`] / [`RaceInput`] are the outbound and inbound stimuli of a session
//! - [`RaceSnapshot`] captures the full query surface for UI consumers
//! - [`UpdateRate`] controls how often snapshot streams emit
//!
//! All times are integer milliseconds.
//!
//! ```rust
//! use checkered::types::{LapRecord, SplitSlot};
//!
//! let lap = LapRecord::new();
//! assert_eq!(lap.total_ms(), 0);
//! assert_eq!(SplitSlot::for_checkpoint_index(0), Some(SplitSlot::Final));
//! assert_eq!(SplitSlot::for_checkpoint_index(1), Some(SplitSlot::A));
//! ```

mod checkpoint;
mod event;
mod lap_record;
mod progress;
mod snapshot;
mod update_rate;

pub use checkpoint::{Checkpoint, CheckpointId, RespawnPoint, START_FINISH};
pub use event::{LapCompletion, RaceEvent, RaceInput};
pub use lap_record::{LapRecord, SPLIT_SLOTS, SplitSlot};
pub use progress::{ProgressPhase, RaceProgressState};
pub use snapshot::RaceSnapshot;
pub use update_rate::UpdateRate;
