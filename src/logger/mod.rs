//! Logging setup for the CLI
//!
//! The library only emits `tracing` events. The binary calls [`init`] once
//! to install a stderr subscriber and, optionally, a plain-text file layer.

use std::error::Error;
use std::fmt;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{
    fmt as tracing_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Logging levels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Error-level messages
    Error = 1,
    /// Warning-level messages
    #[default]
    Warn = 2,
    /// Info-level messages
    Info = 3,
    /// Debug-level messages
    Debug = 4,
}

impl Level {
    /// Equivalent `tracing` filter
    #[must_use]
    pub const fn as_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
        }
    }

    /// Lower-case name used in config files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" | "trace" => Ok(Self::Debug),
            _ => Err(format!("Unknown log level: {s}")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything [`init`] needs to know
#[derive(Debug, Clone, Default)]
pub struct LoggerSettings {
    /// Most verbose level emitted by this crate
    pub level: Level,
    /// Include targets and source locations on stderr
    pub verbose: bool,
    /// Also append plain-text logs to this file
    pub file: Option<PathBuf>,
}

impl LoggerSettings {
    /// Directive string used when `RUST_LOG` is not set
    #[must_use]
    pub fn directives(&self) -> String {
        format!("academic_progress={},warn", self.level.as_filter())
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `settings.level` when set.
///
/// # Errors
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed
pub fn init(settings: &LoggerSettings) -> Result<(), Box<dyn Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(settings.directives()));

    let stderr_layer = tracing_fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(settings.verbose)
        .with_file(settings.verbose)
        .with_line_number(settings.verbose)
        .compact();

    let file_layer = match &settings.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;
    Ok(())
}
