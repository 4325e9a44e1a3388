//! Channel provider fed by the host game loop

use tokio::sync::mpsc;
use tracing::debug;

use crate::provider::InputProvider;
use crate::types::{CheckpointId, RaceInput};
use crate::{RaceError, Result};

/// Default number of inputs buffered between the game loop and the driver
pub const DEFAULT_INPUT_BUFFER: usize = 256;

/// Sending half held by the game loop
///
/// Cloneable so trigger volumes and the frame loop can report independently.
/// The provider ends once every sender is dropped.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: mpsc::Sender<RaceInput>,
}

impl InputSender {
    /// Queue an input, waiting for buffer space
    pub async fn send(&self, input: RaceInput) -> Result<()> {
        self.tx
            .send(input)
            .await
            .map_err(|e| RaceError::provider_failed_with_source("race driver stopped", Box::new(e)))
    }

    /// Queue an input without waiting; fails when the buffer is full or the driver stopped
    pub fn try_send(&self, input: RaceInput) -> Result<()> {
        self.tx.try_send(input).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                RaceError::provider_failed("input buffer full, driver is falling behind")
            }
            mpsc::error::TrySendError::Closed(_) => {
                RaceError::provider_failed("race driver stopped")
            }
        })
    }

    pub async fn tick(&self, delta_ms: i64) -> Result<()> {
        self.send(RaceInput::Tick(delta_ms)).await
    }

    pub async fn cross(&self, checkpoint: CheckpointId) -> Result<()> {
        self.send(RaceInput::Crossing(checkpoint)).await
    }

    /// Whether the driver side is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Provider receiving live inputs over a bounded mpsc channel
#[derive(Debug)]
pub struct ChannelProvider {
    rx: mpsc::Receiver<RaceInput>,
}

impl ChannelProvider {
    /// Provider plus the sender that feeds it
    pub fn new(buffer: usize) -> (InputSender, Self) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (InputSender { tx }, Self { rx })
    }
}

#[async_trait::async_trait]
impl InputProvider for ChannelProvider {
    async fn next_input(&mut self) -> Result<Option<RaceInput>> {
        let input = self.rx.recv().await;
        if input.is_none() {
            debug!("All input senders dropped");
        }
        Ok(input)
    }

    fn name(&self) -> &'static str {
        "channel"
    }
}
