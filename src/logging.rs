/// Structured logging for the underwriting risk tool
///
/// Each entry carries a severity, the component that produced it, and an
/// optional location context (usually the coordinate being assessed).
/// Console output goes to stderr so stdout stays usable for report text and
/// JSON; an optional log file receives every entry with a timestamp.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::model::ElevationError;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub const fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// One step more verbose, saturating at `Debug`.
    pub fn more_verbose(self) -> Self {
        match self {
            LogLevel::Error => LogLevel::Warning,
            LogLevel::Warning => LogLevel::Info,
            LogLevel::Info | LogLevel::Debug => LogLevel::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Elevation,
    Zones,
    Stations,
    Report,
    Config,
    System,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Component::Elevation => "ELEV",
            Component::Zones => "ZONE",
            Component::Stations => "FIRE",
            Component::Report => "RPT",
            Component::Config => "CFG",
            Component::System => "SYS",
        };
        f.write_str(tag)
    }
}

/// How worrying an elevation failure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The run asked for no lookups.
    Expected,
    /// Points at the service itself: 5xx, or a body we cannot read.
    ServiceFault,
    /// Could be the network, the point, or the service.
    Indeterminate,
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureClass::Expected => "expected",
            FailureClass::ServiceFault => "service fault",
            FailureClass::Indeterminate => "indeterminate",
        })
    }
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

/// Locks `mutex`, taking the data even if a panicking holder poisoned it.
/// The logger state is replaced wholesale, never left half-written.
fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Logger {
    threshold: LogLevel,
    file: Option<PathBuf>,
    /// Prefix console lines with a timestamp (file lines always have one).
    stamp_console: bool,
}

impl Logger {
    fn write(&self, level: LogLevel, component: Component, context: Option<&str>, message: &str) {
        if level < self.threshold {
            return;
        }

        let ctx = match context {
            Some(c) => format!(" [{}]", c),
            None => String::new(),
        };
        let stamped = format!(
            "{} {:<5} {}{}: {}",
            Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
            level,
            component,
            ctx,
            message
        );

        if self.stamp_console {
            eprintln!("{}", stamped);
        } else {
            let marker = match level {
                LogLevel::Error => "✗",
                LogLevel::Warning => "⚠",
                LogLevel::Info => "·",
                LogLevel::Debug => "…",
            };
            eprintln!("   {} {}{}: {}", marker, component, ctx, message);
        }

        if let Some(path) = &self.file {
            let appended = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut f| writeln!(f, "{}", stamped));
            if let Err(e) = appended {
                eprintln!("Failed to write to log file {}: {}", path.display(), e);
            }
        }
    }
}

/// Installs the process-wide logger, replacing any earlier one.
///
/// Until this is called every logging function is a no-op, which keeps
/// library users and unit tests quiet.
pub fn init_logger(threshold: LogLevel, file: Option<&str>, stamp_console: bool) {
    let logger = Logger {
        threshold,
        file: file.map(PathBuf::from),
        stamp_console,
    };
    *lock_recovering(&LOGGER) = Some(logger);
}

fn emit(level: LogLevel, component: Component, context: Option<&str>, message: &str) {
    if let Some(logger) = lock_recovering(&LOGGER).as_ref() {
        logger.write(level, component, context, message);
    }
}

pub fn debug(component: Component, context: Option<&str>, message: &str) {
    emit(LogLevel::Debug, component, context, message);
}

pub fn info(component: Component, context: Option<&str>, message: &str) {
    emit(LogLevel::Info, component, context, message);
}

pub fn warn(component: Component, context: Option<&str>, message: &str) {
    emit(LogLevel::Warning, component, context, message);
}

pub fn error(component: Component, context: Option<&str>, message: &str) {
    emit(LogLevel::Error, component, context, message);
}

// ---------------------------------------------------------------------------
// Domain helpers
// ---------------------------------------------------------------------------

pub fn classify_elevation_failure(err: &ElevationError) -> FailureClass {
    match err {
        ElevationError::Disabled => FailureClass::Expected,
        ElevationError::HttpStatus(code) if *code >= 500 => FailureClass::ServiceFault,
        ElevationError::Parse(_) => FailureClass::ServiceFault,
        ElevationError::HttpStatus(_) | ElevationError::Request(_) | ElevationError::NoResult => {
            FailureClass::Indeterminate
        }
    }
}

/// Logs an elevation failure at a level matching its class: debug when
/// expected, error for service faults, warn otherwise.
pub fn log_elevation_failure(location: &str, operation: &str, err: &ElevationError) {
    let class = classify_elevation_failure(err);
    let message = format!("{} failed ({}): {}", operation, class, err);

    let level = match class {
        FailureClass::Expected => LogLevel::Debug,
        FailureClass::ServiceFault => LogLevel::Error,
        FailureClass::Indeterminate => LogLevel::Warning,
    };
    emit(level, Component::Elevation, Some(location), &message);
}

/// One-line outcome of a batch of checks; severity follows the failure count.
pub fn log_batch_summary(component: Component, total: usize, successful: usize, failed: usize) {
    let message = format!("{} of {} checks answered, {} failed", successful, total, failed);
    let level = match (successful, failed) {
        (_, 0) => LogLevel::Info,
        (0, _) => LogLevel::Error,
        _ => LogLevel::Warning,
    };
    emit(level, component, None, &message);
}
