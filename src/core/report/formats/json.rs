//! JSON data export and import

use crate::core::gpa::{dashboard_stats, DashboardStats};
use crate::core::models::{Catalog, Enrollment, GradeScale, StudentInfo};
use crate::core::report::{TranscriptContext, TranscriptRenderer};
use crate::core::roster::Roster;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Export format version written by this crate
pub const EXPORT_VERSION: &str = "1.0.0";

/// Enrollment joined with its catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedCourse {
    /// Display code
    #[serde(default)]
    pub code: String,
    /// Course title
    #[serde(default)]
    pub title: String,
    /// Requirement category
    #[serde(default)]
    pub category: String,
    /// Owning department
    #[serde(default)]
    pub department: String,
    /// The enrollment record
    #[serde(flatten)]
    pub enrollment: Enrollment,
}

/// Full data export for one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    /// Student identity
    pub student: StudentInfo,
    /// Enrollments known to the catalog
    pub courses: Vec<ExportedCourse>,
    /// Dashboard counters at export time
    pub stats: DashboardStats,
    /// RFC 3339 export timestamp
    pub export_date: String,
    /// Export format version
    pub version: String,
}

impl ExportData {
    /// Student and enrollments as a roster
    #[must_use]
    pub fn into_roster(self) -> Roster {
        Roster {
            student: self.student,
            enrollments: self.courses.into_iter().map(|c| c.enrollment).collect(),
        }
    }
}

/// Why an export file was rejected
#[derive(Error, Debug)]
pub enum ImportError {
    /// Not valid export JSON
    #[error("Malformed export data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Written by an incompatible version
    #[error("Unsupported export version '{version}' (expected 1.x)")]
    UnsupportedVersion {
        /// Version found in the file
        version: String,
    },

    /// A course record breaks a basic rule
    #[error("Course record {index}: {reason}")]
    InvalidRecord {
        /// Position in the `courses` list
        index: usize,
        /// What is wrong
        reason: String,
    },
}

/// Build the data export.
///
/// Enrollments whose course is missing from the catalog are left out of
/// `courses`, while `stats` is computed over every enrollment.
#[must_use]
pub fn export_data(
    enrollments: &[Enrollment],
    catalog: &Catalog,
    student: &StudentInfo,
    scale: GradeScale,
    exported_at: DateTime<Utc>,
) -> ExportData {
    let courses = enrollments
        .iter()
        .filter_map(|enrollment| {
            let Some(course) = catalog.get_course(&enrollment.course_id) else {
                tracing::debug!("Skipping {} in export: not in catalog", enrollment.course_id);
                return None;
            };
            Some(ExportedCourse {
                code: course.code.clone(),
                title: course.title.clone(),
                category: course.category.clone(),
                department: course.department.clone(),
                enrollment: enrollment.clone(),
            })
        })
        .collect();

    ExportData {
        student: student.clone(),
        courses,
        stats: dashboard_stats(enrollments, scale),
        export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        version: EXPORT_VERSION.to_string(),
    }
}

/// Parse and validate an export produced by [`export_data`].
///
/// Accepts any `1.x` version. Every course record needs a course id and a
/// progress value of at most 100.
///
/// # Errors
/// Returns an [`ImportError`] describing the first problem found
pub fn import_export_data(json: &str) -> Result<Roster, ImportError> {
    let data: ExportData = serde_json::from_str(json)?;

    if data.version.split('.').next() != EXPORT_VERSION.split('.').next() {
        return Err(ImportError::UnsupportedVersion {
            version: data.version,
        });
    }

    for (index, course) in data.courses.iter().enumerate() {
        let enrollment = &course.enrollment;
        if enrollment.course_id.trim().is_empty() {
            return Err(ImportError::InvalidRecord {
                index,
                reason: "missing course id".to_string(),
            });
        }
        if enrollment.progress > 100 {
            return Err(ImportError::InvalidRecord {
                index,
                reason: format!("progress {} exceeds 100", enrollment.progress),
            });
        }
    }

    Ok(data.into_roster())
}

/// JSON data export renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl TranscriptRenderer for JsonRenderer {
    fn render(&self, ctx: &TranscriptContext) -> Result<String, Box<dyn std::error::Error>> {
        let data = export_data(
            ctx.enrollments,
            ctx.catalog,
            ctx.student,
            ctx.options.scale,
            ctx.options.generated_at,
        );
        Ok(serde_json::to_string_pretty(&data)?)
    }
}
