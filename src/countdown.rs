use std::io::Write;

use timer_core::CountdownEngine;

use crate::alerts::TerminalAlerts;

/// The countdown as the screen sees it: the engine plus the "complete"
/// marker that stays up until the user resets or reconfigures.
pub struct CountdownState<W: Write> {
    pub engine: CountdownEngine<TerminalAlerts<W>>,
    pub complete_visible: bool,
}

impl<W: Write> CountdownState<W> {
    pub fn new(alerts: TerminalAlerts<W>) -> Self {
        Self {
            engine: CountdownEngine::new(alerts),
            complete_visible: false,
        }
    }

    pub fn configure(&mut self, hours: i64, minutes: i64, seconds: i64) -> bool {
        if self.engine.inputs_locked() {
            return false;
        }
        self.engine.configure(hours, minutes, seconds);
        self.complete_visible = false;
        true
    }

    pub fn start(&mut self, now_ms: u64) -> bool {
        if !self.engine.can_start() {
            return false;
        }
        self.engine.start(now_ms);
        self.complete_visible = false;
        true
    }

    pub fn pause(&mut self, now_ms: u64) {
        self.engine.pause(now_ms);
        if self.engine.is_completed() {
            self.complete_visible = true;
        }
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.complete_visible = false;
    }

    /// True on the tick that completes the countdown.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let completed = self.engine.tick(now_ms);
        if completed {
            self.complete_visible = true;
        }
        completed
    }
}
