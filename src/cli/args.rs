//! CLI argument definitions for `academic-progress`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use academic_progress::config::ConfigOverrides;
use academic_progress::core::models::{EnrollmentStatus, GradeScale};
use academic_progress::core::report::{ReportFormat, TranscriptGrouping};
use academic_progress::logger::Level;

/// CLI log level argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Grade scale argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ScaleArg {
    /// A+ through F with minus grades
    Full,
    /// A, B+, B, C+, C, D+, D, F
    Compact,
}

impl From<ScaleArg> for GradeScale {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::Full => Self::Full,
            ScaleArg::Compact => Self::Compact,
        }
    }
}

/// Transcript output format argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum FormatArg {
    /// Plain text
    Text,
    /// Printable HTML
    Html,
    /// CSV of every enrollment
    Csv,
    /// JSON data export
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Html => Self::Html,
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Text transcript grouping argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum GroupingArg {
    /// Sections per course level
    Level,
    /// Sections per term
    Semester,
}

impl From<GroupingArg> for TranscriptGrouping {
    fn from(arg: GroupingArg) -> Self {
        match arg {
            GroupingArg::Level => Self::Level,
            GroupingArg::Semester => Self::Semester,
        }
    }
}

/// Enrollment status argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StatusArg {
    /// Not started
    NotStarted,
    /// In progress
    InProgress,
    /// Completed (requires --grade)
    Completed,
    /// Dropped (terminal)
    Dropped,
}

impl From<StatusArg> for EnrollmentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::NotStarted => Self::NotStarted,
            StatusArg::InProgress => Self::InProgress,
            StatusArg::Completed => Self::Completed,
            StatusArg::Dropped => Self::Dropped,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key (e.g., `level`, `scale`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Reset one configuration value to its default.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show GPA, credits and grouped statistics for a roster.
    Stats {
        /// Roster JSON file
        #[arg(value_name = "ROSTER")]
        roster: PathBuf,

        /// Course catalog JSON file
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Grade scale (defaults to config `scale`)
        #[arg(long, value_enum)]
        scale: Option<ScaleArg>,
    },
    /// Generate a transcript or data export.
    Transcript {
        /// Roster JSON file
        #[arg(value_name = "ROSTER")]
        roster: PathBuf,

        /// Course catalog JSON file
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: FormatArg,

        /// Section grouping for text output (defaults to config `grouping`)
        #[arg(long, value_enum)]
        group_by: Option<GroupingArg>,

        /// Grade scale (defaults to config `scale`)
        #[arg(long, value_enum)]
        scale: Option<ScaleArg>,

        /// Output file (defaults to the reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        print: bool,
    },
    /// Change the status of one enrollment.
    Transition {
        /// Roster JSON file
        #[arg(value_name = "ROSTER")]
        roster: PathBuf,

        /// Catalog id of the course, or its code (e.g. "CSC 201") with --catalog
        #[arg(long, value_name = "ID")]
        course: String,

        /// New status
        #[arg(long, value_enum)]
        status: StatusArg,

        /// Grade to record when completing
        #[arg(long)]
        grade: Option<String>,

        /// Semester (e.g., Fall)
        #[arg(long)]
        semester: Option<String>,

        /// Year (e.g., 2024)
        #[arg(long)]
        year: Option<String>,

        /// Progress percentage
        #[arg(long)]
        progress: Option<u32>,

        /// Course catalog, used to warn about unmet prerequisites
        #[arg(short, long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Save the updated roster back to ROSTER
        #[arg(long)]
        write: bool,
    },
    /// List catalog courses not yet on the roster, with prerequisite status.
    Courses {
        /// Roster JSON file
        #[arg(value_name = "ROSTER")]
        roster: PathBuf,

        /// Course catalog JSON file
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,
    },
    /// Convert a JSON data export back into a roster file.
    Import {
        /// Export produced by `transcript --format json`
        #[arg(value_name = "EXPORT")]
        input: PathBuf,

        /// Roster file to write
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "academic-progress",
    about = "Student academic progress: GPA, credits, completion and transcripts",
    version = academic_progress::get_version()
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override config grade scale
    #[arg(long = "config-scale", value_enum)]
    pub config_scale: Option<ScaleArg>,

    /// Override config institution name
    #[arg(long = "institution", value_name = "NAME")]
    pub institution: Option<String>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--reports-dir`) take precedence over
    /// long-form flags (e.g., `--config-reports-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            reports_dir: self
                .reports_dir
                .as_ref()
                .or(self.config_reports_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
            scale: self
                .config_scale
                .map(|scale| GradeScale::from(scale).to_string()),
            institution: self.institution.clone(),
        }
    }
}
