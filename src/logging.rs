//! Support for logging via the [log](https://docs.rs/log/*/log/) crate.

#![cfg(feature = "logging")]
#![cfg_attr(docsrs, doc(cfg(feature = "logging")))]

use ansi_rgb::*;
use log::{
    info, set_logger, set_max_level, Level, LevelFilter, Log, Metadata, Record, SetLoggerError,
};
use rgb::RGB8;
use spin::Once;
use std::io::Write;

use crate::rtos::time_since_start;

static LOGGER: Once<StderrLogger> = Once::new();

/// A console logger writing colored, timestamped records to stderr.
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    /// Installs the logger at `level`. Later calls are no-ops.
    pub fn init_stderr(level: LevelFilter) -> Result<(), SetLoggerError> {
        if LOGGER.is_completed() {
            return Ok(());
        }
        set_logger(LOGGER.call_once(|| Self { level }))?;
        set_max_level(level);
        info!("Initialized logging at level {}", level);
        Ok(())
    }
}

fn level_color(level: Level) -> RGB8 {
    match level {
        Level::Error => red(),
        Level::Warn => orange(),
        Level::Info => cyan(),
        Level::Debug => RGB8::new(255 / 2, 255 / 2, 255 / 2),
        Level::Trace => black(),
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}][{}:{}]{}: {}\n",
            record.level().as_str().fg(level_color(record.level())),
            record.file().unwrap_or("?"),
            record
                .line()
                .map(|val| val.to_string())
                .unwrap_or_else(|| "?".to_string()),
            time_since_start(),
            record.args(),
        );
        // A failed write to stderr has nowhere to be reported.
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
