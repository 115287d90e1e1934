//! Pure timing logic library with no platform dependencies.
//! Testable on host; every operation takes the current clock reading
//! as an argument, so callers decide where time comes from.

mod alert;
mod clock;
mod countdown;
mod format;
mod stopwatch;

pub use alert::{AlertError, AlertSink, NoopAlerts};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use countdown::{
    CountdownEngine, COMPLETE_BODY, COMPLETE_TITLE, MAX_HOURS, MAX_MINUTES, MAX_SECONDS,
};
pub use format::{format_countdown, format_elapsed, format_lap};
pub use stopwatch::StopwatchEngine;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
    Expired,
}
