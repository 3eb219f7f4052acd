//! Stderr logger behind the `log` facade

use std::io::Write;

use anyhow::Result;
use log::{LevelFilter, Log, Metadata, Record};

/// Verbosity levels accepted on the command line and in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Nothing = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug = 4,
    All = 5,
}

impl LogLevel {
    /// Create a LogLevel from an integer; out-of-range values clamp
    pub fn from_i32(level: i32) -> Self {
        match level {
            i32::MIN..=0 => LogLevel::Nothing,
            1 => LogLevel::Error,
            2 => LogLevel::Warning,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => LogLevel::All,
        }
    }

    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Parse a level name or number
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(level) = s.parse::<i32>() {
            return Ok(Self::from_i32(level));
        }
        match s.to_lowercase().as_str() {
            "nothing" | "off" | "none" => Ok(LogLevel::Nothing),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "all" | "trace" => Ok(LogLevel::All),
            _ => anyhow::bail!(
                "Invalid log level: {}. Valid options: nothing, error, warning, info, debug, all",
                s
            ),
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Nothing => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::All => LevelFilter::Trace,
        }
    }
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = std::io::stderr().lock();
        // nowhere left to report a failed stderr write
        let _ = writeln!(err, "[{}] {}: {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Install the stderr logger and set the maximum level
///
/// Safe to call more than once; later calls only change the level.
pub fn init(level: LogLevel) -> Result<()> {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("Logger already installed; updating level to {:?}", level);
    }
    log::set_max_level(level.to_level_filter());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_from_i32_clamps() {
        assert_eq!(LogLevel::from_i32(-3), LogLevel::Nothing);
        assert_eq!(LogLevel::from_i32(2), LogLevel::Warning);
        assert_eq!(LogLevel::from_i32(99), LogLevel::All);
        assert_eq!(LogLevel::Debug.as_i32(), 4);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(LogLevel::parse("warn").unwrap(), LogLevel::Warning);
        assert_eq!(LogLevel::parse("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::parse("1").unwrap(), LogLevel::Error);
        assert!(LogLevel::parse("loud").is_err());
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(LogLevel::Nothing.to_level_filter(), LevelFilter::Off);
        assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::All.to_level_filter(), LevelFilter::Trace);
    }

    #[test]
    #[serial]
    fn test_init_twice() {
        init(LogLevel::Warning).unwrap();
        init(LogLevel::Debug).unwrap();
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
