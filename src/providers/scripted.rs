//! Scripted provider replaying recorded inputs
//!
//! Scripts are YAML step lists. Each step is either a tick or a crossing,
//! optionally repeated:
//!
//! ```yaml
//! steps:
//!   - cross: 0
//!   - tick: 16
//!     repeat: 60
//!   - cross: 1
//! ```

use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::provider::InputProvider;
use crate::types::{CheckpointId, RaceInput};
use crate::{RaceError, Result};

/// One line of an input script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptStep {
    /// Advance the timer by this many milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick: Option<i64>,
    /// Cross this checkpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross: Option<CheckpointId>,
    /// Emit the step this many times; zero or absent means once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<u32>,
}

impl ScriptStep {
    fn input(&self, index: usize) -> Result<RaceInput> {
        match (self.tick, self.cross) {
            (Some(delta_ms), None) => Ok(RaceInput::Tick(delta_ms)),
            (None, Some(id)) => Ok(RaceInput::Crossing(id)),
            _ => Err(RaceError::parse_error(
                "input script",
                format!("step {} must have exactly one of `tick` or `cross`", index),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Script {
    steps: Vec<ScriptStep>,
}

/// Replays a fixed list of inputs, instantly or paced by their tick deltas
#[derive(Debug)]
pub struct ScriptedProvider {
    inputs: VecDeque<RaceInput>,
    total: usize,

    /// Playback speed when paced (1.0 = real time)
    speed: Option<f64>,
}

impl ScriptedProvider {
    /// Provider yielding `inputs` in order, as fast as they are pulled
    pub fn new(inputs: impl IntoIterator<Item = RaceInput>) -> Self {
        let inputs: VecDeque<_> = inputs.into_iter().collect();
        let total = inputs.len();
        Self { inputs, total, speed: None }
    }

    /// Parse a YAML step script
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let script: Script = serde_yaml_ng::from_str(yaml)
            .map_err(|e| RaceError::parse_error("input script", e.to_string()))?;

        let mut inputs = Vec::with_capacity(script.steps.len());
        for (index, step) in script.steps.iter().enumerate() {
            let input = step.input(index)?;
            let count = step.repeat.unwrap_or(1).max(1);
            inputs.extend(std::iter::repeat_n(input, count as usize));
        }

        debug!("Parsed input script: {} steps, {} inputs", script.steps.len(), inputs.len());
        Ok(Self::new(inputs))
    }

    /// Read and parse a YAML step script
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| RaceError::file_error(path.to_path_buf(), e))?;
        let provider = Self::from_yaml(&yaml)?;
        info!("Opened input script {}: {} inputs", path.display(), provider.total);
        Ok(provider)
    }

    /// Sleep for each tick's delta before yielding it
    ///
    /// `speed` scales playback (2.0 = double speed) and is clamped to 0.1..=10.0.
    pub fn paced(mut self, speed: f64) -> Self {
        let speed = speed.clamp(0.1, 10.0);
        debug!("Playback speed set to {}x", speed);
        self.speed = Some(speed);
        self
    }

    /// Inputs not yet yielded
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    /// Inputs in the whole script
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[async_trait::async_trait]
impl InputProvider for ScriptedProvider {
    async fn next_input(&mut self) -> Result<Option<RaceInput>> {
        let Some(input) = self.inputs.pop_front() else {
            debug!("Reached end of input script");
            return Ok(None);
        };

        if let (Some(speed), RaceInput::Tick(delta_ms)) = (self.speed, input) {
            if delta_ms > 0 {
                let wait = Duration::from_secs_f64(delta_ms as f64 / 1_000.0 / speed);
                tokio::time::sleep(wait).await;
            }
        }

        trace!("Input {}/{}: {:?}", self.total - self.inputs.len(), self.total, input);
        Ok(Some(input))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
steps:
  - cross: 0
  - tick: 250
    repeat: 4
  - cross: 1
"#;

    #[tokio::test]
    async fn yields_inputs_then_ends() {
        let mut provider = ScriptedProvider::new([RaceInput::Crossing(0), RaceInput::Tick(10)]);
        assert_eq!(provider.next_input().await.unwrap(), Some(RaceInput::Crossing(0)));
        assert_eq!(provider.next_input().await.unwrap(), Some(RaceInput::Tick(10)));
        assert_eq!(provider.next_input().await.unwrap(), None);
        assert_eq!(provider.next_input().await.unwrap(), None);
    }

    #[test]
    fn yaml_repeat_expands_steps() {
        let provider = ScriptedProvider::from_yaml(SCRIPT).unwrap();
        assert_eq!(provider.len(), 6);
        assert_eq!(provider.inputs[0], RaceInput::Crossing(0));
        assert!(provider.inputs.range(1..5).all(|i| *i == RaceInput::Tick(250)));
        assert_eq!(provider.inputs[5], RaceInput::Crossing(1));
    }

    #[test]
    fn ambiguous_step_is_rejected() {
        let err = ScriptedProvider::from_yaml("steps: [ { tick: 1, cross: 2 } ]").unwrap_err();
        assert!(matches!(err, RaceError::Parse { .. }));

        let err = ScriptedProvider::from_yaml("steps: [ {} ]").unwrap_err();
        assert!(err.to_string().contains("step 0"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(ScriptedProvider::from_yaml("steps: [ { jump: 1 } ]").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn paced_playback_waits_for_ticks() {
        let mut provider =
            ScriptedProvider::new([RaceInput::Tick(1_000), RaceInput::Crossing(0)]).paced(2.0);

        let start = tokio::time::Instant::now();
        provider.next_input().await.unwrap();
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(500) && waited < Duration::from_millis(510));

        provider.next_input().await.unwrap();
        assert_eq!(start.elapsed(), waited);
    }
}
