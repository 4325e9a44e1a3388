//! Stream combinators for snapshot consumers

mod throttle;

pub use throttle::{Throttle, ThrottleExt};
