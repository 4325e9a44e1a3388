//! Emission rate control for snapshot streams

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How often a snapshot stream emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum UpdateRate {
    /// Every snapshot the session publishes (once per processed input)
    Native,

    /// At most this many snapshots per second, latest wins
    /// A rate of zero is treated as Native
    Max(u32),
}

impl UpdateRate {
    /// Collapse degenerate rates to `Native`
    pub fn normalize(self) -> Self {
        match self {
            UpdateRate::Max(0) => UpdateRate::Native,
            other => other,
        }
    }

    /// Throttle interval, `None` when every snapshot passes through
    pub fn throttle_interval(self) -> Option<Duration> {
        match self.normalize() {
            UpdateRate::Native => None,
            UpdateRate::Max(hz) => Some(Duration::from_secs_f64(1.0 / hz as f64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_is_native() {
        assert_eq!(UpdateRate::Max(0).normalize(), UpdateRate::Native);
        assert_eq!(UpdateRate::Max(0).throttle_interval(), None);
    }

    #[test]
    fn max_rate_yields_interval() {
        assert_eq!(UpdateRate::Max(10).throttle_interval(), Some(Duration::from_millis(100)));
        assert_eq!(UpdateRate::Native.throttle_interval(), None);
    }
}
