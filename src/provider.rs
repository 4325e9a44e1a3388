//! Provider trait for race input sources

use crate::Result;
use crate::types::RaceInput;

/// Source of per-frame race inputs
///
/// Providers abstract over where ticks and checkpoint crossings come from
/// (a game loop, a recorded script, a test) and handle their own pacing.
#[async_trait::async_trait]
pub trait InputProvider: Send + 'static {
    /// Get the next input
    ///
    /// Returns:
    /// - `Ok(Some(input))` - Next tick or crossing
    /// - `Ok(None)` - Source ended (normal termination)
    /// - `Err(e)` - Error occurred; the driver retries with backoff
    async fn next_input(&mut self) -> Result<Option<RaceInput>>;

    /// Short label used in logs
    fn name(&self) -> &'static str {
        "input"
    }
}
