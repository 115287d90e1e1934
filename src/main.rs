mod alerts;
mod cli;
mod commands;
mod countdown;
mod ui;

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use num_traits::{FromPrimitive, ToPrimitive};
use timer_core::{Clock, MonotonicClock, StopwatchEngine};

use crate::alerts::TerminalAlerts;
use crate::cli::{Cli, StartMode};
use crate::commands::Command;
use crate::countdown::CountdownState;

#[derive(Debug, num_derive::FromPrimitive, num_derive::ToPrimitive)]
enum AppOp {
    Pump = 0,
    Line,
    Quit,
}

/// Message delivered to the main loop. `body` carries input text for `Line`.
struct Envelope {
    id: usize,
    body: Option<String>,
}

impl Envelope {
    fn new(op: AppOp, body: Option<String>) -> Self {
        Self {
            id: op.to_usize().unwrap_or(usize::MAX),
            body,
        }
    }
}

#[derive(Debug, PartialEq)]
enum PumpCtl {
    Start(u64),
    Stop,
    Quit,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppMode {
    Stopwatch,
    Countdown,
}

// DEC save cursor, up one row, clear it; restore afterwards
const STATUS_ROW: &str = "\x1b7\x1b[1A\r\x1b[2K";
const RESTORE_CURSOR: &str = "\x1b8";

/// Screen layout: the status line sits one row above the input row, so
/// periodic redraws never touch what the user is typing.
struct TimersApp<W: Write, C: Clock> {
    clock: C,
    out: W,
    mode: AppMode,
    stopwatch: StopwatchEngine,
    countdown: CountdownState<W>,

    pump: Sender<PumpCtl>,
    pump_interval: Option<u64>,
    stopwatch_interval_ms: u64,
    countdown_interval_ms: u64,
}

impl<W: Write, C: Clock> TimersApp<W, C> {
    fn new(cli: &Cli, pump: Sender<PumpCtl>, clock: C, out: W, alert_out: W) -> Self {
        let mut alerts = TerminalAlerts::new(cli.alert_config(), alert_out);
        let permission = alerts.request_permission();
        log::info!("notification permission {:?}", permission);

        let mut countdown = CountdownState::new(alerts);
        countdown.configure(cli.hours, cli.minutes, cli.seconds);

        let mode = match cli.mode {
            StartMode::Stopwatch => AppMode::Stopwatch,
            StartMode::Countdown => AppMode::Countdown,
        };

        Self {
            clock,
            out,
            mode,
            stopwatch: StopwatchEngine::new(),
            countdown,
            pump,
            pump_interval: None,
            stopwatch_interval_ms: cli.stopwatch_interval_ms,
            countdown_interval_ms: cli.countdown_interval_ms,
        }
    }

    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn status_line(&self) -> String {
        match self.mode {
            AppMode::Stopwatch => ui::stopwatch_line(&self.stopwatch, self.now_ms()),
            AppMode::Countdown => ui::countdown_line(&self.countdown),
        }
    }

    /// Rewrites the status row in place, leaving the input row alone.
    fn redraw(&mut self) {
        let line = self.status_line();
        write!(self.out, "{}{}{}", STATUS_ROW, line, RESTORE_CURSOR).ok();
        self.out.flush().ok();
    }

    /// Starts a fresh status row with an empty input row below it.
    fn show_status(&mut self) {
        let line = self.status_line();
        writeln!(self.out, "{}", line).ok();
        self.out.flush().ok();
    }

    /// Prints a message on the current row. Callers follow up with `show_status`.
    fn say(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }

    /// Keeps the pump at the cadence the visible, running engines need.
    fn update_pump(&mut self) {
        let wanted = if self.mode == AppMode::Stopwatch && self.stopwatch.is_running() {
            Some(self.stopwatch_interval_ms)
        } else if self.countdown.engine.is_running() {
            Some(self.countdown_interval_ms)
        } else {
            None
        };
        if wanted == self.pump_interval {
            return;
        }
        let msg = match wanted {
            Some(interval) => PumpCtl::Start(interval),
            None => PumpCtl::Stop,
        };
        if self.pump.send(msg).is_err() {
            log::error!("pump thread is gone");
        }
        self.pump_interval = wanted;
    }

    fn handle_pump(&mut self) {
        let now = self.now_ms();
        // Ticked in either mode so completion is never missed
        let completed = self.countdown.tick(now);
        self.update_pump();
        if completed {
            if self.mode != AppMode::Countdown {
                self.say("countdown finished (type 'cd' to view)");
            }
            self.show_status();
        } else {
            self.redraw();
        }
    }

    /// Returns false when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        let cmd = match commands::parse(line) {
            Ok(cmd) => cmd,
            Err(commands::CommandError::Empty) => {
                self.show_status();
                return true;
            }
            Err(e) => {
                self.say(&e.to_string());
                self.show_status();
                return true;
            }
        };
        log::debug!("command {:?}", cmd);

        let now = self.now_ms();
        match cmd {
            Command::Quit => return false,
            Command::Mode(mode) => self.mode = mode,
            Command::Help => self.say(ui::HELP_TEXT),
            Command::Start => match self.mode {
                AppMode::Stopwatch => self.stopwatch.start(now),
                AppMode::Countdown => {
                    if !self.countdown.start(now) {
                        self.say("nothing to start (set a duration or reset)");
                    }
                }
            },
            Command::Pause => match self.mode {
                AppMode::Stopwatch => self.stopwatch.pause(now),
                AppMode::Countdown => self.countdown.pause(now),
            },
            Command::Reset => match self.mode {
                AppMode::Stopwatch => self.stopwatch.reset(),
                AppMode::Countdown => self.countdown.reset(),
            },
            Command::Lap => match self.stopwatch.lap(now) {
                Some(ms) => {
                    let number = self.stopwatch.laps().len();
                    self.say(&timer_core::format_lap(number, ms));
                }
                None => self.say("stopwatch is not running"),
            },
            Command::Laps => {
                let rows = ui::lap_list(&self.stopwatch);
                if rows.is_empty() {
                    self.say("no laps");
                }
                for row in rows {
                    self.say(&row);
                }
            }
            Command::Set { hours, minutes, seconds } => {
                if !self.countdown.configure(hours, minutes, seconds) {
                    self.say("pause or reset the countdown before changing it");
                }
            }
        }
        self.update_pump();
        self.show_status();
        true
    }

    fn shutdown(&mut self) {
        self.pump.send(PumpCtl::Quit).ok();
        self.out.flush().ok();
    }
}

fn pump_thread(ctl: Receiver<PumpCtl>, main: Sender<Envelope>) {
    let mut interval_ms = 100u64;
    let mut running = false;

    loop {
        // Wait out the interval while running, otherwise block for control
        let msg = if running {
            match ctl.recv_timeout(Duration::from_millis(interval_ms)) {
                Ok(msg) => Some(msg),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match ctl.recv() {
                Ok(msg) => Some(msg),
                Err(_) => break,
            }
        };

        match msg {
            None => {
                if main.send(Envelope::new(AppOp::Pump, None)).is_err() {
                    break;
                }
            }
            Some(PumpCtl::Start(ms)) => {
                interval_ms = ms.max(1);
                running = true;
            }
            Some(PumpCtl::Stop) => running = false,
            Some(PumpCtl::Quit) => break,
        }
    }
    log::debug!("pump thread exiting");
}

fn input_thread(main: Sender<Envelope>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(line) => {
                if main.send(Envelope::new(AppOp::Line, Some(line))).is_err() {
                    return;
                }
            }
            Err(e) => {
                log::error!("can't read input: {}", e);
                break;
            }
        }
    }
    main.send(Envelope::new(AppOp::Quit, None)).ok();
}

fn init_logging(filter: Option<&str>) {
    let mut builder = env_logger::Builder::new();
    if let Some(filter) = filter {
        builder.parse_filters(filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());
    log::info!("stopwatch-timer PID is {}", std::process::id());

    let (main_tx, main_rx) = mpsc::channel::<Envelope>();
    let (pump_tx, pump_rx) = mpsc::channel::<PumpCtl>();

    let pump_main = main_tx.clone();
    let pump = thread::Builder::new()
        .name("pump".into())
        .spawn(move || pump_thread(pump_rx, pump_main))
        .context("can't start pump thread")?;
    thread::Builder::new()
        .name("input".into())
        .spawn(move || input_thread(main_tx))
        .context("can't start input thread")?;

    let mut app = TimersApp::new(
        &cli,
        pump_tx,
        MonotonicClock::new(),
        io::stdout(),
        io::stdout(),
    );
    app.say(ui::HELP_TEXT);
    app.show_status();

    while let Ok(msg) = main_rx.recv() {
        match FromPrimitive::from_usize(msg.id) {
            Some(AppOp::Pump) => app.handle_pump(),
            Some(AppOp::Line) => {
                let line = msg.body.unwrap_or_default();
                if !app.handle_line(&line) {
                    break;
                }
            }
            Some(AppOp::Quit) => break,
            None => log::error!("unknown opcode: {}", msg.id),
        }
    }

    app.shutdown();
    if pump.join().is_err() {
        log::error!("pump thread panicked");
    }
    log::info!("stopwatch-timer exiting");
    Ok(())
}
