use crate::TimerState;

/// Count-up accumulator with pause/resume and lap capture.
///
/// Elapsed time is always derived from clock deltas, never counted per tick,
/// so the value stays correct however irregularly the caller refreshes it.
#[derive(Debug, Clone)]
pub struct StopwatchEngine {
    state: TimerState,
    accumulated_ms: u64,
    segment_start_ms: u64,
    laps: Vec<u64>,
}

impl StopwatchEngine {
    pub fn new() -> Self {
        Self {
            state: TimerState::Stopped,
            accumulated_ms: 0,
            segment_start_ms: 0,
            laps: Vec::new(),
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.state == TimerState::Running {
            return;
        }
        self.segment_start_ms = now_ms;
        self.state = TimerState::Running;
        log::debug!("stopwatch started at {} with {} ms banked", now_ms, self.accumulated_ms);
    }

    pub fn pause(&mut self, now_ms: u64) {
        if self.state != TimerState::Running {
            return;
        }
        self.accumulated_ms = self.elapsed_ms(now_ms);
        self.state = TimerState::Paused;
        log::debug!("stopwatch paused at {} ms", self.accumulated_ms);
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
        self.segment_start_ms = 0;
        self.laps.clear();
        self.state = TimerState::Stopped;
        log::debug!("stopwatch reset");
    }

    /// Records the current elapsed value. Returns it, or `None` when not running.
    pub fn lap(&mut self, now_ms: u64) -> Option<u64> {
        if self.state != TimerState::Running {
            return None;
        }
        let elapsed = self.elapsed_ms(now_ms);
        self.laps.push(elapsed);
        log::debug!("lap {} at {} ms", self.laps.len(), elapsed);
        Some(elapsed)
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.state {
            TimerState::Running => {
                self.accumulated_ms + now_ms.saturating_sub(self.segment_start_ms)
            }
            _ => self.accumulated_ms,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Lap values in capture order.
    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    /// `(lap number, elapsed)` pairs, newest first. Lap numbers start at 1.
    pub fn laps_newest_first(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.laps
            .iter()
            .enumerate()
            .rev()
            .map(|(i, &ms)| (i + 1, ms))
    }

    /// Time between consecutive laps, in capture order.
    pub fn splits(&self) -> Vec<u64> {
        let mut prev = 0;
        self.laps
            .iter()
            .map(|&ms| {
                let split = ms.saturating_sub(prev);
                prev = ms;
                split
            })
            .collect()
    }
}

impl Default for StopwatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format_elapsed;

    #[test]
    fn test_laps_across_pause() {
        let mut sw = StopwatchEngine::new();
        sw.start(200);
        assert_eq!(sw.lap(1200), Some(1000));

        sw.pause(2000);
        assert_eq!(sw.state(), TimerState::Paused);
        assert_eq!(sw.lap(2500), None);

        // The gap while paused is not counted in later laps
        sw.start(9000);
        assert_eq!(sw.lap(9500), Some(2300));
        assert_eq!(sw.laps(), &[1000, 2300]);
        assert_eq!(sw.splits(), vec![1000, 1300]);
    }

    #[test]
    fn test_start_then_query() {
        let mut sw = StopwatchEngine::new();
        sw.start(0);
        assert_eq!(sw.elapsed_ms(1500), 1500);
        assert_eq!(format_elapsed(sw.elapsed_ms(1500)), "00:00:01:50");
    }

    #[test]
    fn test_resume_does_not_jump() {
        let mut sw = StopwatchEngine::new();
        sw.start(0);
        sw.pause(1500);
        assert_eq!(sw.elapsed_ms(1500), 1500);
        sw.start(3000);
        assert_eq!(sw.elapsed_ms(4000), 2500);
        assert_eq!(format_elapsed(sw.elapsed_ms(4000)), "00:00:02:50");
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut sw = StopwatchEngine::new();
        sw.start(100);
        sw.start(900);
        assert_eq!(sw.elapsed_ms(1100), 1000);
    }

    #[test]
    fn test_pause_while_stopped_is_noop() {
        let mut sw = StopwatchEngine::new();
        sw.pause(500);
        assert_eq!(sw.state(), TimerState::Stopped);
        assert_eq!(sw.elapsed_ms(500), 0);
    }

    #[test]
    fn test_laps() {
        let mut sw = StopwatchEngine::new();
        sw.start(0);
        assert_eq!(sw.lap(2300), Some(2300));
        assert_eq!(sw.lap(4800), Some(4800));

        assert_eq!(sw.laps(), &[2300, 4800]);
        let newest: Vec<_> = sw.laps_newest_first().collect();
        assert_eq!(newest, vec![(2, 4800), (1, 2300)]);
        assert_eq!(sw.splits(), vec![2300, 2500]);

        // Laps do not disturb the running total
        assert_eq!(sw.elapsed_ms(6000), 6000);
    }

    #[test]
    fn test_lap_while_paused_is_noop() {
        let mut sw = StopwatchEngine::new();
        assert_eq!(sw.lap(100), None);
        sw.start(0);
        sw.pause(1000);
        assert_eq!(sw.lap(2000), None);
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn test_reset_clears_laps() {
        let mut sw = StopwatchEngine::new();
        sw.start(0);
        sw.lap(1000);
        sw.reset();
        assert!(sw.laps().is_empty());
        assert!(!sw.is_running());
    }

    #[test]
    fn test_clock_behind_segment_start() {
        let mut sw = StopwatchEngine::new();
        sw.start(1000);
        assert_eq!(sw.elapsed_ms(900), 0);
    }
}
