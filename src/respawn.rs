//! Respawn target selection and delayed respawn scheduling
//!
//! The game layer waits a short moment before putting a crashed vehicle back
//! on track. That wait runs as its own task so the race session keeps
//! ticking through it; only the vehicle placement is delayed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::RespawnConfig;
use crate::types::{CheckpointId, RespawnPoint};

/// Where a respawning vehicle is placed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum RespawnTarget {
    /// The respawn transform of the last checkpoint reached
    Checkpoint { id: CheckpointId, point: RespawnPoint },
    /// The vehicle's start position, owned by the game layer
    StartPosition,
}

/// One-shot delayed respawn; a new request supersedes a pending one
///
/// Requests spawn onto the current tokio runtime. Dropping the scheduler
/// cancels whatever is pending.
#[derive(Debug)]
pub struct RespawnScheduler {
    delay: Duration,
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    cancel: CancellationToken,
    task: JoinHandle<bool>,
}

impl RespawnScheduler {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn from_config(config: &RespawnConfig) -> Self {
        Self::new(config.delay())
    }

    /// Delay applied to each request
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `on_respawn` with `target` once the delay has passed
    pub fn request<F>(&mut self, target: RespawnTarget, on_respawn: F)
    where
        F: FnOnce(RespawnTarget) + Send + 'static,
    {
        if self.cancel() {
            debug!("Pending respawn superseded by a new request");
        }

        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let delay = self.delay;

        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = task_cancel.cancelled() => false,
                _ = tokio::time::sleep(delay) => {
                    info!(?target, "Respawning vehicle");
                    on_respawn(target);
                    true
                }
            }
        });

        debug!(delay_ms = delay.as_millis() as u64, "Respawn scheduled");
        self.pending = Some(Pending { cancel, task });
    }

    /// Cancel the pending respawn; returns whether one was still waiting
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) if !pending.task.is_finished() => {
                pending.cancel.cancel();
                true
            }
            _ => false,
        }
    }

    /// Whether a respawn is waiting for its delay to pass
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.cancel.is_cancelled() && !p.task.is_finished())
    }

    /// Wait for the pending request; `true` when its callback ran
    pub async fn settle(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        match pending.task.await {
            Ok(fired) => fired,
            Err(e) => {
                warn!("Respawn task failed: {}", e);
                false
            }
        }
    }
}

impl Drop for RespawnScheduler {
    fn drop(&mut self) {
        if let Some(pending) = &self.pending {
            pending.cancel.cancel();
        }
    }
}
