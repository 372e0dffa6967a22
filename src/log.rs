//! Injectable logging capability.
//!
//! The engine and state keep a `Logger` handle instead of writing to a
//! process-global sink. The default sink discards everything; the stderr
//! sink filters by a minimum level. Stdout is reserved for protocol
//! responses, so diagnostics always go through this channel.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Log severity, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        };
        f.write_str(s)
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            _ => Err(()),
        }
    }
}

/// Destination for log messages.
pub trait LogSink {
    /// Writes one message at the given level.
    fn write(&self, level: Level, message: &str);

    /// Reports whether messages at `level` would be written at all.
    /// Callers use this to skip formatting for disabled levels.
    fn enabled(&self, level: Level) -> bool;
}

/// Sink that discards every message. The default.
pub struct Null;

impl LogSink for Null {
    fn write(&self, _level: Level, _message: &str) {}

    fn enabled(&self, _level: Level) -> bool {
        false
    }
}

/// Sink that writes to stderr, dropping messages below `min_level`.
pub struct Stderr {
    pub min_level: Level,
}

impl LogSink for Stderr {
    fn write(&self, level: Level, message: &str) {
        if level >= self.min_level {
            eprintln!("[{}] {}", level, message);
        }
    }

    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }
}

/// Cheaply cloneable handle to a shared sink.
///
/// Configured once before the read loop starts and read-only afterward.
/// The crate is single-threaded, so `Rc` suffices.
#[derive(Clone)]
pub struct Logger {
    sink: Rc<dyn LogSink>,
}

impl Logger {
    /// A logger that discards everything.
    pub fn null() -> Self {
        Logger { sink: Rc::new(Null) }
    }

    /// A logger that writes to stderr at or above `min_level`.
    pub fn stderr(min_level: Level) -> Self {
        Logger {
            sink: Rc::new(Stderr { min_level }),
        }
    }

    /// A logger backed by a caller-provided sink.
    pub fn with_sink(sink: Rc<dyn LogSink>) -> Self {
        Logger { sink }
    }

    /// True when debug messages would actually be written. Chatty call
    /// sites guard with this to avoid formatting for a null sink.
    pub fn is_debug(&self) -> bool {
        self.sink.enabled(Level::Debug)
    }

    pub fn debug(&self, message: &str) {
        self.sink.write(Level::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.sink.write(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.sink.write(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.sink.write(Level::Error, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::null()
    }
}
