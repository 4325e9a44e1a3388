//! Lap stopwatch and time display helpers

mod format;
mod timer;

pub use format::{
    Pace, RACE_TIME_PLACEHOLDER, SPLIT_TIME_PLACEHOLDER, classify_pace, format_race_time,
    format_split_time,
};
pub use timer::{LapTimer, TimerState};
