//! Millisecond to display string conversion

use serde::{Deserialize, Serialize};

/// Shown by [`format_race_time`] when there is no time to display
pub const RACE_TIME_PLACEHOLDER: &str = "--:--.---";

/// Shown by [`format_split_time`] when there is no time to display
pub const SPLIT_TIME_PLACEHOLDER: &str = "--.---";

/// Laps more than this fraction slower than the best count as [`Pace::Slower`]
const CLOSE_MARGIN: f64 = 0.05;

/// Format as `M:SS.mmm`; non-positive input yields the placeholder
///
/// ```rust
/// use checkered::format_race_time;
///
/// assert_eq!(format_race_time(65_432), "1:05.432");
/// assert_eq!(format_race_time(0), "--:--.---");
/// ```
pub fn format_race_time(ms: i64) -> String {
    if ms <= 0 {
        return RACE_TIME_PLACEHOLDER.to_string();
    }
    let minutes = ms / 60_000;
    let seconds = (ms / 1_000) % 60;
    let millis = ms % 1_000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}

/// Format as `SS.mmm` with whole seconds not wrapped at a minute
pub fn format_split_time(ms: i64) -> String {
    if ms <= 0 {
        return SPLIT_TIME_PLACEHOLDER.to_string();
    }
    let seconds = ms / 1_000;
    let millis = ms % 1_000;
    format!("{seconds:02}.{millis:03}")
}

/// How a running or finished time compares to the session best
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum Pace {
    /// Quicker than the best
    Faster,
    /// Not quicker, but within five percent of the best
    Close,
    /// More than five percent off the best
    Slower,
}

/// Compare `current_ms` to `best_ms`; `None` when either has no value
pub fn classify_pace(current_ms: i64, best_ms: i64) -> Option<Pace> {
    if current_ms <= 0 || best_ms <= 0 {
        return None;
    }
    if current_ms < best_ms {
        Some(Pace::Faster)
    } else if current_ms as f64 > best_ms as f64 * (1.0 + CLOSE_MARGIN) {
        Some(Pace::Slower)
    } else {
        Some(Pace::Close)
    }
}
