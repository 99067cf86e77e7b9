//! Command line arguments.

use anyhow::{Result, ensure};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use clap::Parser;
use log::LevelFilter;
use watchface_common::{BatteryState, FaceConfig};

use crate::runtime::RuntimeOptions;

#[derive(Debug, Parser)]
#[command(name = "simulator")]
#[command(about = "Analog watch face simulator and host runtime")]
pub struct Cli {
    /// Start time as HH:MM:SS (default: local time)
    #[arg(long)]
    pub at: Option<NaiveTime>,

    /// Start date as YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Virtual clock multiplier in window mode
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,

    /// Initial battery charge in percent
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub battery: u8,

    /// Start with the charger connected
    #[arg(long)]
    pub plugged: bool,

    /// Lose 1% of charge per virtual minute
    #[arg(long)]
    pub drain: bool,

    /// Start with bluetooth disconnected
    #[arg(long)]
    pub disconnected: bool,

    /// Platform without per-second ticks (no second hand)
    #[arg(long)]
    pub no_seconds: bool,

    /// Virtual seconds to run in headless mode
    #[arg(long, default_value_t = 90)]
    pub duration: u64,

    /// Also print the debug page in headless mode
    #[arg(long)]
    pub debug_page: bool,

    /// Open an interactive window (requires the `sdl` feature)
    #[arg(long)]
    pub window: bool,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

impl Cli {
    /// Virtual start instant, truncated to whole seconds.
    pub fn start_time(&self) -> NaiveDateTime {
        let local = Local::now().naive_local();
        let date = self.date.unwrap_or(local.date());
        let time = self.at.unwrap_or(local.time());
        let time = time.with_nanosecond(0).unwrap_or(time);
        date.and_time(time)
    }

    pub fn runtime_options(&self) -> Result<RuntimeOptions> {
        ensure!(self.speed > 0.0, "--speed must be positive, got {}", self.speed);

        Ok(RuntimeOptions {
            config: FaceConfig { seconds_supported: !self.no_seconds, ..FaceConfig::default() },
            start: self.start_time(),
            battery: BatteryState::new(self.battery, self.plugged),
            bluetooth: !self.disconnected,
            drain: self.drain,
        })
    }
}
