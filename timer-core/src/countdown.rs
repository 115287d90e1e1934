use crate::alert::AlertSink;
use crate::TimerState;

pub const MAX_HOURS: i64 = 99;
pub const MAX_MINUTES: i64 = 59;
pub const MAX_SECONDS: i64 = 59;

pub const COMPLETE_TITLE: &str = "Timer Complete!";
pub const COMPLETE_BODY: &str = "Your countdown timer has finished.";

/// Count-down timer with a configurable duration and a one-shot completion alert.
///
/// While running, the remaining time is recomputed from a fixed deadline on
/// every tick, so late or skipped ticks never stretch the countdown.
pub struct CountdownEngine<S: AlertSink> {
    state: TimerState,
    hours: u8,
    minutes: u8,
    seconds: u8,
    total_ms: u64,
    remaining_ms: u64,
    deadline_ms: u64,
    sink: S,
}

impl<S: AlertSink> CountdownEngine<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: TimerState::Stopped,
            hours: 0,
            minutes: 0,
            seconds: 0,
            total_ms: 0,
            remaining_ms: 0,
            deadline_ms: 0,
            sink,
        }
    }

    /// Sets the target duration. Each field is clamped into range first
    /// (hours 0-99, minutes and seconds 0-59). Ignored while running.
    pub fn configure(&mut self, hours: i64, minutes: i64, seconds: i64) {
        if self.state == TimerState::Running {
            log::debug!("countdown configure ignored while running");
            return;
        }
        self.hours = hours.clamp(0, MAX_HOURS) as u8;
        self.minutes = minutes.clamp(0, MAX_MINUTES) as u8;
        self.seconds = seconds.clamp(0, MAX_SECONDS) as u8;

        let total_secs =
            self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64;
        self.total_ms = total_secs * 1000;
        self.remaining_ms = self.total_ms;
        self.state = TimerState::Stopped;
        log::debug!("countdown configured to {} ms", self.total_ms);
    }

    pub fn start(&mut self, now_ms: u64) {
        if !self.can_start() {
            return;
        }
        self.deadline_ms = now_ms.saturating_add(self.remaining_ms);
        self.state = TimerState::Running;
        log::debug!("countdown started, deadline {}", self.deadline_ms);
    }

    /// Freezes the remaining time. A pause at or past the deadline completes instead.
    pub fn pause(&mut self, now_ms: u64) {
        if self.state != TimerState::Running {
            return;
        }
        if self.tick(now_ms) {
            return;
        }
        self.state = TimerState::Paused;
        log::debug!("countdown paused with {} ms left", self.remaining_ms);
    }

    pub fn reset(&mut self) {
        self.remaining_ms = self.total_ms;
        self.deadline_ms = 0;
        self.state = TimerState::Stopped;
        log::debug!("countdown reset");
    }

    /// Refreshes the remaining time. Returns `true` only on the tick that
    /// reaches zero; the alert fires exactly then.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.remaining_ms = self.deadline_ms.saturating_sub(now_ms);
        if self.remaining_ms > 0 {
            return false;
        }
        self.state = TimerState::Expired;
        log::info!("countdown of {} ms complete", self.total_ms);
        self.fire_alert();
        true
    }

    fn fire_alert(&mut self) {
        if let Err(e) = self.sink.play_alert() {
            log::warn!("could not play alert sound: {}", e);
        }
        if let Err(e) = self.sink.notify(COMPLETE_TITLE, COMPLETE_BODY) {
            log::warn!("could not show notification: {}", e);
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_completed(&self) -> bool {
        self.state == TimerState::Expired
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    /// Clamped `(hours, minutes, seconds)` from the last `configure`.
    pub fn configured(&self) -> (u8, u8, u8) {
        (self.hours, self.minutes, self.seconds)
    }

    /// False while running, after completion, or with nothing configured.
    pub fn can_start(&self) -> bool {
        self.state != TimerState::Running
            && self.state != TimerState::Expired
            && self.total_ms > 0
            && self.remaining_ms > 0
    }

    /// Duration inputs are frozen while counting.
    pub fn inputs_locked(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Fraction of the configured duration already consumed, in `[0, 1]`.
    pub fn progress_fraction(&self) -> f32 {
        if self.total_ms == 0 {
            return 0.0;
        }
        let done = self.total_ms - self.remaining_ms;
        let frac = done as f32 / self.total_ms as f32;
        if frac > 1.0 { 1.0 } else { frac }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
