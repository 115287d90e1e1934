use thiserror::Error;

use crate::AppMode;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Mode(AppMode),
    Start,
    Pause,
    Reset,
    Lap,
    Set { hours: i64, minutes: i64, seconds: i64 },
    Laps,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("can't read duration '{0}': use H M S, HH:MM:SS, MM:SS or SS")]
    BadDuration(String),
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
    let rest: Vec<&str> = words.collect();

    let cmd = match verb.as_str() {
        "sw" | "stopwatch" => Command::Mode(AppMode::Stopwatch),
        "cd" | "countdown" | "timer" => Command::Mode(AppMode::Countdown),
        "s" | "start" => Command::Start,
        "p" | "pause" => Command::Pause,
        "r" | "reset" => Command::Reset,
        "l" | "lap" => Command::Lap,
        "laps" => Command::Laps,
        "set" => parse_duration(&rest)?,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(verb)),
    };
    Ok(cmd)
}

/// Accepts "H M S", "HH:MM:SS", "MM:SS" or "SS".
fn parse_duration(args: &[&str]) -> Result<Command, CommandError> {
    let parts: Vec<&str> = match args {
        [single] => single.split(':').collect(),
        [_, _, _] => args.to_vec(),
        _ => return Err(CommandError::BadDuration(args.join(" "))),
    };
    let (hours, minutes, seconds) = match parts.as_slice() {
        [s] => (0, 0, field(s)),
        [m, s] => (0, field(m), field(s)),
        [h, m, s] => (field(h), field(m), field(s)),
        _ => return Err(CommandError::BadDuration(args.join(" "))),
    };
    Ok(Command::Set { hours, minutes, seconds })
}

/// Unreadable fields count as zero; range clamping happens in the engine.
fn field(s: &str) -> i64 {
    s.trim().parse::<i64>().unwrap_or(0)
}
