use std::{
    io::Write,
    sync::{
        OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

static LOGGER: Logger = Logger {
    stderr_level: OnceLock::new(),
    counter: Counter::new(),
};

/// Number of entries per level since the start of the process.
#[derive(Debug)]
struct Counter {
    levels: [AtomicUsize; 5],
}

impl Counter {
    #[must_use]
    const fn new() -> Self {
        Self {
            levels: [const { AtomicUsize::new(0) }; 5],
        }
    }

    fn record(&self, level: Level) {
        self.levels[level as usize - 1].fetch_add(1, Ordering::Relaxed);
    }

    /// Number of entries at the given level or more severe.
    #[must_use]
    fn count(&self, level: Level) -> usize {
        self.levels[..level as usize]
            .iter()
            .map(|count| count.load(Ordering::Relaxed))
            .sum()
    }
}

/// Installs the logger. Entries up to `level` are written to stderr, warnings and errors are
/// always counted.
///
/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let _ = LOGGER.stderr_level.set(level);
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level.max(LevelFilter::Warn)))
}

/// Number of entries logged so far at the given level or more severe.
#[must_use]
pub fn count(level: Level) -> usize {
    LOGGER.counter.count(level)
}

struct Logger {
    stderr_level: OnceLock<LevelFilter>,
    counter: Counter,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        self.counter.record(record.level());

        if record.level() > self.stderr_level.get().copied().unwrap_or(LevelFilter::Warn) {
            return;
        }

        let _ = writeln!(
            std::io::stderr().lock(),
            "{} {:<5} {}",
            Local::now().format("%b %d %H:%M:%S"),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_counter() {
        let counter = Counter::new();

        for _ in 0..150 {
            counter.record(Level::Warn);
        }
        for _ in 0..200 {
            counter.record(Level::Debug);
        }
        counter.record(Level::Error);

        assert_eq!(counter.count(Level::Error), 1);
        assert_eq!(counter.count(Level::Warn), 151);
        assert_eq!(counter.count(Level::Info), 151);
        assert_eq!(counter.count(Level::Trace), 351);
    }
}
