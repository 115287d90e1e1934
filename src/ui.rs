use std::io::Write;

use timer_core::{format_countdown, format_elapsed, format_lap, StopwatchEngine, TimerState};

use crate::countdown::CountdownState;

const BAR_WIDTH: usize = 20;

pub const HELP_TEXT: &str = "\
Commands
  sw | cd          show stopwatch / countdown
  start | s        start or resume
  pause | p        pause
  reset | r        reset (clears laps)
  lap | l          record a lap (stopwatch)
  laps             list laps, newest first
  set H M S        set countdown (also HH:MM:SS, MM:SS, SS)
  help | quit";

fn state_label(state: TimerState) -> &'static str {
    match state {
        TimerState::Stopped => "stopped",
        TimerState::Running => "running",
        TimerState::Paused => "paused",
        TimerState::Expired => "done",
    }
}

pub fn stopwatch_line(sw: &StopwatchEngine, now_ms: u64) -> String {
    let mut line = format!(
        "STOPWATCH  {}  [{}]",
        format_elapsed(sw.elapsed_ms(now_ms)),
        state_label(sw.state())
    );
    if let Some((number, ms)) = sw.laps_newest_first().next() {
        line.push_str(&format!("  last: {}", format_lap(number, ms)));
    }
    line
}

pub fn countdown_line<W: Write>(cd: &CountdownState<W>) -> String {
    let engine = &cd.engine;
    let filled = (BAR_WIDTH as f32 * engine.progress_fraction()) as usize;
    let mut line = format!(
        "COUNTDOWN  {}  [{}{}]  [{}]",
        format_countdown(engine.remaining_ms()),
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        state_label(engine.state())
    );
    if cd.complete_visible {
        line.push_str("  TIMER COMPLETE");
    }
    line
}

/// Lap rows, newest first.
pub fn lap_list(sw: &StopwatchEngine) -> Vec<String> {
    sw.laps_newest_first()
        .map(|(number, ms)| format_lap(number, ms))
        .collect()
}
