//! Tabular transcript rows and CSV export

use crate::core::models::{Catalog, Enrollment};
use crate::core::report::{TranscriptContext, TranscriptRenderer};
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use std::error::Error;

/// One transcript row; every field is already formatted for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranscriptRow {
    /// Course code (e.g., "CSC 301")
    #[serde(rename = "Course Code")]
    pub code: String,
    /// Course title
    #[serde(rename = "Course Title")]
    pub title: String,
    /// Credit hours
    #[serde(rename = "Credits")]
    pub credits: String,
    /// Semester, or empty
    #[serde(rename = "Semester")]
    pub semester: String,
    /// Year, or empty
    #[serde(rename = "Year")]
    pub year: String,
    /// Status name (`completed`, `in_progress`, ...)
    #[serde(rename = "Status")]
    pub status: String,
    /// Letter grade, or empty
    #[serde(rename = "Grade")]
    pub grade: String,
    /// Progress as `N%`
    #[serde(rename = "Progress")]
    pub progress: String,
}

impl TranscriptRow {
    /// Column headers in output order
    pub const HEADERS: [&'static str; 8] = [
        "Course Code",
        "Course Title",
        "Credits",
        "Semester",
        "Year",
        "Status",
        "Grade",
        "Progress",
    ];

    fn from_enrollment(enrollment: &Enrollment, catalog: &Catalog) -> Self {
        let course = catalog.get_course(&enrollment.course_id);
        Self {
            code: course.map_or_else(|| enrollment.course_id.clone(), |c| c.code.clone()),
            title: course.map(|c| c.title.clone()).unwrap_or_default(),
            credits: enrollment.credits.to_string(),
            semester: enrollment.semester.clone().unwrap_or_default(),
            year: enrollment.year.clone().unwrap_or_default(),
            status: enrollment.status.as_str().to_string(),
            grade: enrollment
                .grade
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            progress: format!("{}%", enrollment.progress),
        }
    }
}

/// One row per completed enrollment, in input order
#[must_use]
pub fn render_transcript_table(
    enrollments: &[Enrollment],
    catalog: &Catalog,
) -> Vec<TranscriptRow> {
    enrollments
        .iter()
        .filter(|e| e.is_completed())
        .map(|e| TranscriptRow::from_enrollment(e, catalog))
        .collect()
}

/// One row per enrollment regardless of status, in input order
#[must_use]
pub fn render_course_table(enrollments: &[Enrollment], catalog: &Catalog) -> Vec<TranscriptRow> {
    enrollments
        .iter()
        .map(|e| TranscriptRow::from_enrollment(e, catalog))
        .collect()
}

/// Write rows as CSV with a header line and every field quoted
///
/// # Errors
/// Returns an error if CSV serialization fails
pub fn render_rows_csv(rows: &[TranscriptRow]) -> Result<String, Box<dyn Error>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(TranscriptRow::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    Ok(String::from_utf8(bytes)?)
}

/// CSV export of every enrollment
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl TranscriptRenderer for CsvRenderer {
    fn render(&self, ctx: &TranscriptContext) -> Result<String, Box<dyn Error>> {
        render_rows_csv(&render_course_table(ctx.enrollments, ctx.catalog))
    }
}
