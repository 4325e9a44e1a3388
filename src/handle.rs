//! Async handle over a running race session

use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::driver::{Driver, DriverChannels};
use crate::provider::InputProvider;
use crate::race::{EventBus, RaceSession};
use crate::stream::ThrottleExt;
use crate::types::{RaceEvent, RaceSnapshot, UpdateRate};
use crate::{RaceError, Result};

/// Race session running on its own task
///
/// Consumers subscribe to lap events and snapshots here while the provider
/// feeds the session. Dropping the handle cancels the task.
pub struct RaceHandle {
    events: EventBus,
    snapshots: watch::Receiver<Arc<RaceSnapshot>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<RaceSession>>,
}

impl RaceHandle {
    /// Start driving `session` from `provider`
    pub fn spawn<P: InputProvider>(session: RaceSession, provider: P) -> Self {
        let DriverChannels { events, snapshots, cancel, task } = Driver::spawn(session, provider);
        Self { events, snapshots, cancel, task: Some(task) }
    }

    /// Build a session from `config` and start driving it
    pub fn from_config<P: InputProvider>(config: &SessionConfig, provider: P) -> Result<Self> {
        let session = RaceSession::from_config(config)?;
        info!(track = %config.track.name, "Race handle started");
        Ok(Self::spawn(session, provider))
    }

    /// Lap lifecycle events published from now on
    ///
    /// The stream ends when the session task ends and the handle is gone.
    pub fn events(&self) -> impl Stream<Item = RaceEvent> + 'static {
        self.events.stream()
    }

    /// Session snapshots, starting with the current one
    pub fn snapshots(&self, rate: UpdateRate) -> impl Stream<Item = Arc<RaceSnapshot>> + 'static {
        let snapshots = WatchStream::new(self.snapshots.clone());

        match rate.throttle_interval() {
            None => snapshots.boxed(),
            Some(interval) => snapshots.throttle(interval).boxed(),
        }
    }

    /// Latest published snapshot
    pub fn current(&self) -> Arc<RaceSnapshot> {
        Arc::clone(&self.snapshots.borrow())
    }

    /// Whether the session task has ended
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Ask the session task to stop after the current input
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the provider to run out and take the session back
    pub async fn finish(mut self) -> Result<RaceSession> {
        let task = self
            .task
            .take()
            .ok_or_else(|| RaceError::Driver { reason: "session already taken".to_string() })?;
        task.await.map_err(|e| RaceError::Driver { reason: e.to_string() })
    }

    /// Cancel the task and take the session back
    pub async fn stop(self) -> Result<RaceSession> {
        self.cancel();
        self.finish().await
    }
}

impl Drop for RaceHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            debug!("Dropping race handle, cancelling session task");
            self.cancel.cancel();
        }
    }
}
