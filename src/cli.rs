//! Command-line configuration.

use clap::{Parser, ValueEnum};

use crate::alerts::AlertConfig;

#[derive(Clone, Copy, PartialEq, Debug, ValueEnum)]
pub enum StartMode {
    Stopwatch,
    Countdown,
}

/// Terminal stopwatch with laps and a countdown timer.
#[derive(Parser, Debug)]
#[command(name = "stopwatch-timer")]
#[command(version)]
#[command(about = "Stopwatch with laps and a countdown timer with alerts")]
pub struct Cli {
    /// Which timer is shown at startup
    #[arg(long, value_enum, default_value_t = StartMode::Stopwatch)]
    pub mode: StartMode,

    /// Initial countdown hours (clamped to 0-99)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub hours: i64,

    /// Initial countdown minutes (clamped to 0-59)
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    pub minutes: i64,

    /// Initial countdown seconds (clamped to 0-59)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub seconds: i64,

    /// Display refresh interval while the stopwatch runs
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub stopwatch_interval_ms: u64,

    /// Tick interval while the countdown runs
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub countdown_interval_ms: u64,

    /// Do not ring the terminal bell on completion
    #[arg(long)]
    pub no_bell: bool,

    /// Do not print completion notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,
}

impl Cli {
    pub fn alert_config(&self) -> AlertConfig {
        AlertConfig {
            audio: !self.no_bell,
            notification: !self.no_notify,
        }
    }
}
