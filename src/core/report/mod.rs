//! Transcript and export generation
//!
//! Every renderer reads from one [`TranscriptContext`], built once from the
//! aggregator outputs, so the text, table, HTML and JSON outputs always agree
//! on credits and GPA.

pub mod formats;

use crate::core::gpa::{academic_progress, dashboard_stats, AcademicProgress, DashboardStats};
use crate::core::models::{Catalog, Enrollment, GradeScale, StudentInfo};
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use formats::html::{render_transcript_document, HtmlRenderer};
pub use formats::json::{
    export_data, import_export_data, ExportData, ExportedCourse, ImportError, JsonRenderer,
};
pub use formats::table::{
    render_course_table, render_rows_csv, render_transcript_table, CsvRenderer, TranscriptRow,
};
pub use formats::text::{render_transcript_text, TextRenderer};
pub use formats::ReportFormat;

/// How plain-text transcripts split their course listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TranscriptGrouping {
    /// One section per course level (100-400)
    #[default]
    Level,
    /// One section per term, newest first
    Semester,
}

impl TranscriptGrouping {
    /// Config name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Semester => "semester",
        }
    }
}

impl FromStr for TranscriptGrouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "level" | "levels" => Ok(Self::Level),
            "semester" | "term" | "semesters" => Ok(Self::Semester),
            _ => Err(format!("Unknown transcript grouping: {s}")),
        }
    }
}

impl fmt::Display for TranscriptGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering choices shared by all formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptOptions {
    /// Grade scale used for every GPA on the transcript
    pub scale: GradeScale,
    /// Section layout for plain-text output
    pub grouping: TranscriptGrouping,
    /// Institution printed in document headers
    pub institution: String,
    /// Generation timestamp printed on the transcript
    pub generated_at: DateTime<Utc>,
}

impl TranscriptOptions {
    /// Full scale, level grouping, no institution
    #[must_use]
    pub const fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            scale: GradeScale::Full,
            grouping: TranscriptGrouping::Level,
            institution: String::new(),
            generated_at,
        }
    }

    /// Generation date as `YYYY-MM-DD`
    #[must_use]
    pub fn generated_date(&self) -> String {
        self.generated_at.format("%Y-%m-%d").to_string()
    }
}

/// Data context for transcript generation
///
/// Holds the inputs together with the aggregates computed from them.
#[derive(Debug, Clone)]
pub struct TranscriptContext<'a> {
    /// Whose transcript this is
    pub student: &'a StudentInfo,
    /// Catalog used to resolve course codes, titles and levels
    pub catalog: &'a Catalog,
    /// Enrollments in input order
    pub enrollments: &'a [Enrollment],
    /// Rendering options
    pub options: &'a TranscriptOptions,
    /// Credit totals, GPA and credit-weighted completion
    pub progress: AcademicProgress,
    /// Per-status counts
    pub stats: DashboardStats,
}

impl<'a> TranscriptContext<'a> {
    /// Compute aggregates and build the context
    #[must_use]
    pub fn new(
        student: &'a StudentInfo,
        catalog: &'a Catalog,
        enrollments: &'a [Enrollment],
        options: &'a TranscriptOptions,
    ) -> Self {
        Self {
            student,
            catalog,
            enrollments,
            options,
            progress: academic_progress(enrollments, options.scale),
            stats: dashboard_stats(enrollments, options.scale),
        }
    }

    /// Display code for an enrollment; the course id when not in the catalog
    #[must_use]
    pub fn course_code<'e>(&'e self, enrollment: &'e Enrollment) -> &'e str {
        self.catalog
            .get_course(&enrollment.course_id)
            .map_or(enrollment.course_id.as_str(), |c| c.code.as_str())
    }

    /// Course title; empty when not in the catalog
    #[must_use]
    pub fn course_title(&self, enrollment: &Enrollment) -> &str {
        self.catalog
            .get_course(&enrollment.course_id)
            .map_or("", |c| c.title.as_str())
    }

    /// Course level from the catalog
    #[must_use]
    pub fn course_level(&self, enrollment: &Enrollment) -> Option<u32> {
        self.catalog
            .get_course(&enrollment.course_id)
            .and_then(|c| c.level())
    }

    /// Completed enrollments that carry a grade, in input order
    #[must_use]
    pub fn graded(&self) -> Vec<&'a Enrollment> {
        self.enrollments.iter().filter(|e| e.is_graded()).collect()
    }
}

/// Trait for transcript renderers
pub trait TranscriptRenderer {
    /// Render the transcript as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &TranscriptContext) -> Result<String, Box<dyn Error>>;

    /// Render the transcript and write it to `output_path`
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, ctx: &TranscriptContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        fs::write(output_path, content)?;
        tracing::info!("Transcript written to {}", output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseMetadata, EnrollmentStatus, Grade};
    use chrono::TimeZone;

    #[test]
    fn test_grouping_parse() {
        assert_eq!(
            "Semester".parse::<TranscriptGrouping>(),
            Ok(TranscriptGrouping::Semester)
        );
        assert_eq!(
            "level".parse::<TranscriptGrouping>(),
            Ok(TranscriptGrouping::Level)
        );
        assert!("weekly".parse::<TranscriptGrouping>().is_err());
        assert_eq!(TranscriptGrouping::Semester.to_string(), "semester");
    }

    #[test]
    fn test_context_resolves_catalog_fields() {
        let catalog = Catalog::from_courses(
            "AUN".to_string(),
            vec![CourseMetadata::new(
                "cs-301".to_string(),
                "CSC 301".to_string(),
                "Database Systems".to_string(),
                3,
            )],
        );
        let enrollments = vec![
            Enrollment::new("cs-301".to_string(), 3)
                .with_status(EnrollmentStatus::Completed)
                .with_grade(Grade::A),
            Enrollment::new("xx-999".to_string(), 2),
        ];
        let student = StudentInfo::new("Ada".to_string());
        let options =
            TranscriptOptions::new(Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        let ctx = TranscriptContext::new(&student, &catalog, &enrollments, &options);

        assert_eq!(ctx.course_code(&enrollments[0]), "CSC 301");
        assert_eq!(ctx.course_level(&enrollments[0]), Some(300));
        assert_eq!(ctx.course_code(&enrollments[1]), "xx-999");
        assert_eq!(ctx.course_title(&enrollments[1]), "");
        assert_eq!(ctx.graded().len(), 1);
        assert_eq!(ctx.progress.total_credits, 5);
        assert_eq!(options.generated_date(), "2024-12-01");
    }
}
