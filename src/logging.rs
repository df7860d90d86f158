//! Diagnostics on stderr through the `log` facade.
//!
//! Messages are formatted as "[LEVEL] message" so they stay apart from
//! the directory listing on stdout.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub static LOGGER: StderrLogger = StderrLogger;

pub struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Warnings and errors only by default, each `-v` one level more.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(verbosity: u8) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level_for_verbosity(verbosity));
    Ok(())
}
