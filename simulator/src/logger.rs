//! Timestamped stderr logger for the `log` facade.
//!
//! Lines look like `[  12.345]  INFO - message`, timestamped with real time since
//! the logger was installed.

use std::sync::LazyLock;
use std::time::Instant;

use anyhow::{Result, anyhow};
use log::{LevelFilter, Log, Metadata, Record};

pub struct SimLogger {
    start: Instant,
}

static LOGGER: LazyLock<SimLogger> = LazyLock::new(|| SimLogger { start: Instant::now() });

/// Install the logger at `level`.
pub fn init(level: LevelFilter) -> Result<()> {
    log::set_logger(&*LOGGER).map_err(|_| anyhow!("a logger is already installed"))?;
    log::set_max_level(level);
    Ok(())
}

impl Log for SimLogger {
    fn enabled(
        &self,
        metadata: &Metadata,
    ) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(
        &self,
        record: &Record,
    ) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let ms = self.start.elapsed().as_millis();
        let secs = ms / 1000;
        let millis = ms % 1000;

        eprintln!("[{secs:>4}.{millis:03}] {:>5} - {}", record.level(), record.args());
    }

    fn flush(&self) {}
}
