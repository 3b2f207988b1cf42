//! Time control: per-player countdown clocks with Fischer increment.

pub mod control;
pub mod time_source;

pub use control::{TimeControl, TimeControlConfig, TimeControlState};
pub use time_source::{ManualClock, MonotonicClock, TimeSource};
