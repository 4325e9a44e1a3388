//! Driver spawns and manages the race session task

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use crate::provider::InputProvider;
use crate::race::{DEFAULT_EVENT_CAPACITY, EventBus, RaceSession};
use crate::types::RaceSnapshot;

/// Result of spawning the driver task
pub struct DriverChannels {
    /// Lap lifecycle events published by the session
    pub events: EventBus,
    /// Latest session snapshot, replaced after every processed input
    pub snapshots: watch::Receiver<Arc<RaceSnapshot>>,
    /// Cancellation token for graceful shutdown
    pub cancel: CancellationToken,
    /// Resolves to the session once the task ends
    pub task: JoinHandle<RaceSession>,
}

/// Driver runs a [`RaceSession`] against an [`InputProvider`] on its own task
///
/// The task owns both. Crossings and ticks are applied strictly in the order
/// the provider yields them, so the single-threaded session guarantees hold
/// no matter how many consumers watch the outputs.
pub struct Driver;

impl Driver {
    /// Spawn the session task with the default event buffer
    pub fn spawn<P>(session: RaceSession, provider: P) -> DriverChannels
    where
        P: InputProvider,
    {
        Self::spawn_with_capacity(session, provider, DEFAULT_EVENT_CAPACITY)
    }

    /// Spawn the session task, buffering up to `event_capacity` events per receiver
    pub fn spawn_with_capacity<P>(
        mut session: RaceSession,
        provider: P,
        event_capacity: usize,
    ) -> DriverChannels
    where
        P: InputProvider,
    {
        let events = EventBus::new(event_capacity);
        session.add_observer(events.clone());

        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(session.snapshot()));
        let cancel = CancellationToken::new();
        let cancel_task = cancel.clone();

        let task = tokio::spawn(async move {
            Self::session_task(session, provider, snapshot_tx, cancel_task).await
        });

        DriverChannels { events, snapshots: snapshot_rx, cancel, task }
    }

    /// Session task - pulls inputs and publishes snapshots until the provider ends
    async fn session_task<P>(
        mut session: RaceSession,
        mut provider: P,
        snapshot_tx: watch::Sender<Arc<RaceSnapshot>>,
        cancel: CancellationToken,
    ) -> RaceSession
    where
        P: InputProvider,
    {
        info!("Race session task started ({} provider)", provider.name());
        let mut input_count = 0u64;
        let mut error_count = 0u32;
        const MAX_ERRORS: u32 = 10;

        loop {
            if cancel.is_cancelled() {
                info!("Race session task cancelled");
                break;
            }

            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Race session task cancelled while waiting for input");
                    break;
                }
                result = provider.next_input() => result,
            };

            match result {
                Ok(Some(input)) => {
                    input_count += 1;
                    error_count = 0;
                    trace!("Input {}: {:?}", input_count, input);

                    session.apply(input);

                    if snapshot_tx.send(Arc::new(session.snapshot())).is_err() {
                        debug!("Snapshot receivers dropped, shutting down");
                        break;
                    }
                }
                Ok(None) => {
                    info!("Input provider ended after {} inputs", input_count);
                    break;
                }
                Err(e) => {
                    error_count += 1;
                    error!("Input provider error ({}/{}): {}", error_count, MAX_ERRORS, e);

                    if error_count >= MAX_ERRORS {
                        error!("Too many provider errors, shutting down");
                        break;
                    }

                    // Exponential backoff: 50ms, 100ms, 200ms, ...
                    let backoff = std::time::Duration::from_millis(50 * (1 << error_count.min(5)));
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        // Drop the bus sender so event streams end with the task
        session.clear_observers();
        info!("Race session task ended (processed {} inputs)", input_count);
        session
    }
}
