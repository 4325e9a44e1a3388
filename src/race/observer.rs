//! Lap lifecycle observers
//!
//! Observers are owned by the session they watch, so their lifetime ends with
//! it and there is no separate unsubscribe step. Async consumers attach an
//! [`EventBus`] and drop their receiver when they lose interest.

use futures::{Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::{trace, warn};

use crate::types::RaceEvent;

/// Receives every lap lifecycle event of a session, in order
pub trait RaceObserver: Send {
    fn on_event(&mut self, event: &RaceEvent);
}

impl<F> RaceObserver for F
where
    F: FnMut(&RaceEvent) + Send,
{
    fn on_event(&mut self, event: &RaceEvent) {
        self(event)
    }
}

/// Default number of events buffered per receiver
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Fans session events out over a broadcast channel
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<RaceEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventBus {
    /// Bus buffering up to `capacity` events per lagging receiver
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Raw receiver for events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<RaceEvent> {
        self.sender.subscribe()
    }

    /// Event stream; a receiver that falls behind skips the lost events
    pub fn stream(&self) -> impl Stream<Item = RaceEvent> + 'static {
        BroadcastStream::new(self.subscribe()).filter_map(|item| async move {
            match item {
                Ok(event) => Some(event),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Race event receiver lagged");
                    None
                }
            }
        })
    }

    /// Number of live receivers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl RaceObserver for EventBus {
    fn on_event(&mut self, event: &RaceEvent) {
        // Sending only fails when nobody is listening
        if self.sender.send(*event).is_err() {
            trace!("Race event dropped, no receivers");
        }
    }
}
