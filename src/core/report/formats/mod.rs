//! Transcript format implementations
//!
//! Plain text, CSV table, HTML document and JSON data export.

pub mod html;
pub mod json;
pub mod table;
pub mod text;

use super::TranscriptRenderer;
use std::fmt;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain-text transcript
    #[default]
    Text,
    /// Printable HTML transcript of completed coursework
    Html,
    /// CSV table of every enrollment
    Csv,
    /// JSON data export
    Json,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Html => "html",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Renderer producing this format
    #[must_use]
    pub fn renderer(self) -> Box<dyn TranscriptRenderer> {
        match self {
            Self::Text => Box::new(text::TextRenderer),
            Self::Html => Box::new(html::HtmlRenderer),
            Self::Csv => Box::new(table::CsvRenderer),
            Self::Json => Box::new(json::JsonRenderer),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "html" | "htm" => Ok(Self::Html),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Html => write!(f, "html"),
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}
