//! Checkpoint progression and lap timing for arcade racing games.
//!
//! Checkered turns two per-frame stimuli, a time delta and "the car entered
//! checkpoint N", into validated lap progress, split times, a bounded lap
//! history and a session best lap.
//!
//! # Features
//!
//! - **Ordered checkpoints**: skipped or repeated checkpoints are ignored, so
//!   shortcuts never count
//! - **Split timing**: up to five splits per lap, with `M:SS.mmm` / `SS.mmm`
//!   display formatting and pace classification against the best lap
//! - **Lap history**: the most recent laps in FIFO order plus the session best
//! - **Async plumbing**: run a session on a tokio task and stream its events
//!   and snapshots to any number of consumers
//!
//! # Quick Start
//!
//! ```rust
//! use checkered::{RaceSession, SessionConfig, format_race_time};
//!
//! let config = SessionConfig::for_track("Harbour Loop", [0, 1, 2]);
//! let mut session = RaceSession::from_config(&config)?;
//!
//! session.on_checkpoint_crossed(0);
//! for id in [1, 2, 0] {
//!     session.tick(21_000);
//!     session.on_checkpoint_crossed(id);
//! }
//!
//! let best = session.best().map(|lap| lap.total_ms() as i64).unwrap_or(0);
//! assert_eq!(format_race_time(best), "1:03.000");
//! # Ok::<(), checkered::RaceError>(())
//! ```
//!
//! ## Example (driven session)
//!
//! ```rust,no_run
//! use checkered::{ChannelProvider, RaceHandle, SessionConfig, UpdateRate};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> checkered::Result<()> {
//!     let config = SessionConfig::from_file("tracks/harbour_loop.yaml")?;
//!     let (inputs, provider) = ChannelProvider::new(256);
//!     let handle = RaceHandle::from_config(&config, provider)?;
//!
//!     let mut snapshots = handle.snapshots(UpdateRate::Max(30));
//!     tokio::spawn(async move {
//!         while let Some(snapshot) = snapshots.next().await {
//!             println!("lap time {}", snapshot.elapsed_ms);
//!         }
//!     });
//!
//!     inputs.cross(0).await?;
//!     inputs.tick(16).await?;
//!     drop(inputs);
//!
//!     let session = handle.finish().await?;
//!     println!("{} laps", session.records().completed_laps());
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod config;
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Race logic
pub mod race;
pub mod respawn;
pub mod timing;
pub mod track;

// Async session plumbing
pub mod driver;
pub mod handle;
pub mod provider;
pub mod providers;
pub mod stream;

// Core exports
pub use error::*;
pub use types::*;

pub use config::{RespawnConfig, SessionConfig, TrackConfig};
pub use race::{
    CheckpointStateMachine, EventBus, LapRecordStore, RaceObserver, RaceSession, Rejection,
    Transition,
};
pub use respawn::{RespawnScheduler, RespawnTarget};
pub use timing::{
    LapTimer, Pace, TimerState, classify_pace, format_race_time, format_split_time,
};
pub use track::CheckpointRegistry;

// Main API exports
pub use driver::Driver;
pub use handle::RaceHandle;
pub use provider::InputProvider;
pub use providers::{ChannelProvider, InputSender, ScriptedProvider};
