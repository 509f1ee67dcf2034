//! Enrollment model: one student's registration in one course

use super::grade::Grade;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Enrolled, no work started
    #[default]
    NotStarted,
    /// Currently taking the course
    InProgress,
    /// Finished (normally with a grade)
    Completed,
    /// Withdrawn; terminal
    Dropped,
}

impl EnrollmentStatus {
    /// Wire/config name (`not_started`, `in_progress`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }

    /// Upper-case label used on plain-text transcripts
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT STARTED",
            Self::InProgress => "IN PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Dropped => "DROPPED",
        }
    }
}

impl FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "dropped" => Ok(Self::Dropped),
            _ => Err(format!("Unknown enrollment status: {s}")),
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student's registration record for one course.
///
/// `grade` is expected only on completed enrollments and `progress == 100`
/// only when completed, but records loaded from storage may violate both.
/// Aggregations read `status` and `grade`, never `progress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Catalog id of the course (e.g., "CSC301")
    pub course_id: String,

    /// Lifecycle status
    #[serde(default)]
    pub status: EnrollmentStatus,

    /// Self-reported progress percentage (0-100)
    #[serde(default)]
    pub progress: u8,

    /// Letter grade, if recorded
    #[serde(
        default,
        deserialize_with = "deserialize_optional_grade",
        skip_serializing_if = "Option::is_none"
    )]
    pub grade: Option<Grade>,

    /// Term name (e.g., "Fall")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,

    /// Academic year (e.g., "2024")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    /// Credit hours carried by this enrollment
    pub credits: u32,

    /// When work on the course began
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// When the course was completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Enrollment {
    /// Create a not-started enrollment with no term, grade or notes
    #[must_use]
    pub const fn new(course_id: String, credits: u32) -> Self {
        Self {
            course_id,
            status: EnrollmentStatus::NotStarted,
            progress: 0,
            grade: None,
            semester: None,
            year: None,
            credits,
            started_at: None,
            completed_at: None,
            notes: None,
        }
    }

    /// Set the status (builder style)
    #[must_use]
    pub fn with_status(mut self, status: EnrollmentStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the grade (builder style)
    #[must_use]
    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = Some(grade);
        self
    }

    /// Set the term (builder style)
    #[must_use]
    pub fn with_term(mut self, semester: &str, year: &str) -> Self {
        self.semester = Some(semester.to_string());
        self.year = Some(year.to_string());
        self
    }

    /// Set the progress percentage (builder style)
    #[must_use]
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }

    /// `true` when the status is completed
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == EnrollmentStatus::Completed
    }

    /// `true` when completed and carrying a grade; only these count toward GPA
    #[must_use]
    pub fn is_graded(&self) -> bool {
        self.is_completed() && self.grade.is_some()
    }
}

/// Empty or whitespace-only grade strings mean "no grade".
fn deserialize_optional_grade<'de, D>(deserializer: D) -> Result<Option<Grade>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Grade::parse_input))
}
