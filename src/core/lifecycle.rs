//! Enrollment status transitions
//!
//! [`apply_transition`] validates a requested status change against the
//! current record and returns a new record. The input is never mutated; on
//! failure the caller still holds the untouched original.

use crate::core::models::{Enrollment, EnrollmentStatus, Grade};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Why a status change was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// Starting needs a semester and year
    #[error("Course {course_id}: semester and year are required to start a course")]
    MissingTerm {
        /// Course being changed
        course_id: String,
    },

    /// Completing needs a grade
    #[error("Course {course_id}: a grade is required to complete a course")]
    MissingGrade {
        /// Course being changed
        course_id: String,
    },

    /// Dropped enrollments stay dropped
    #[error("Course {course_id}: dropped enrollments cannot change status")]
    TerminalState {
        /// Course being changed
        course_id: String,
    },

    /// Progress outside 0-100
    #[error("Progress must be between 0 and 100, got {value}")]
    ProgressOutOfRange {
        /// Rejected value
        value: u32,
    },
}

/// A requested status change and the data supplied with it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusChange {
    /// Status to move to
    pub target: EnrollmentStatus,
    /// Grade recorded on completion
    pub grade: Option<Grade>,
    /// Semester to record (replaces the existing one)
    pub semester: Option<String>,
    /// Year to record (replaces the existing one)
    pub year: Option<String>,
    /// Progress percentage to record
    pub progress: Option<u32>,
}

impl StatusChange {
    /// Change to `target` with nothing else supplied
    #[must_use]
    pub fn to(target: EnrollmentStatus) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Supply a grade
    #[must_use]
    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = Some(grade);
        self
    }

    /// Supply a term
    #[must_use]
    pub fn with_term(mut self, semester: &str, year: &str) -> Self {
        self.semester = Some(semester.to_string());
        self.year = Some(year.to_string());
        self
    }

    /// Supply a progress percentage
    #[must_use]
    pub fn with_progress(mut self, progress: u32) -> Self {
        self.progress = Some(progress);
        self
    }
}

/// Result of a permitted transition
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    /// The updated record
    pub enrollment: Enrollment,
    /// Caller should record a start timestamp
    pub stamp_started: bool,
    /// Caller should record a completion timestamp
    pub stamp_completed: bool,
}

impl TransitionOutcome {
    /// Apply the requested timestamps and return the record
    #[must_use]
    pub fn stamped(self, now: DateTime<Utc>) -> Enrollment {
        let mut enrollment = self.enrollment;
        if self.stamp_started {
            enrollment.started_at = Some(now);
        }
        if self.stamp_completed {
            enrollment.completed_at = Some(now);
        }
        enrollment
    }
}

fn has_value(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Validate `change` against `current` and build the updated record.
///
/// Dropped is terminal. Completing requires a supplied grade and sets
/// progress to 100. Starting requires a term, either supplied or already on
/// the record. Leaving the completed state clears the grade, and progress of
/// a non-completed record never exceeds 99.
///
/// # Errors
/// Returns the first rule the change violates.
pub fn apply_transition(
    current: &Enrollment,
    change: &StatusChange,
) -> Result<TransitionOutcome, ValidationFailure> {
    use EnrollmentStatus::{Completed, Dropped, InProgress, NotStarted};

    let from = current.status;
    let to = change.target;
    let course_id = || current.course_id.clone();

    if from == Dropped && to != Dropped {
        return Err(ValidationFailure::TerminalState {
            course_id: course_id(),
        });
    }

    if let Some(value) = change.progress.filter(|p| *p > 100) {
        return Err(ValidationFailure::ProgressOutOfRange { value });
    }

    let semester = change.semester.as_ref().or(current.semester.as_ref());
    let year = change.year.as_ref().or(current.year.as_ref());
    let starting = from == NotStarted && matches!(to, InProgress | Completed);
    if starting && !(has_value(semester) && has_value(year)) {
        return Err(ValidationFailure::MissingTerm {
            course_id: course_id(),
        });
    }

    let grade = change.grade.as_ref().filter(|g| !g.is_blank());
    let completing = to == Completed && from != Completed;
    if completing && grade.is_none() {
        return Err(ValidationFailure::MissingGrade {
            course_id: course_id(),
        });
    }

    let mut next = current.clone();
    next.status = to;
    next.semester = semester.cloned();
    next.year = year.cloned();

    #[allow(clippy::cast_possible_truncation)]
    let requested = change.progress.map(|p| p as u8);

    match to {
        Completed => {
            if let Some(grade) = grade {
                next.grade = Some(grade.clone());
            }
            next.progress = 100;
        }
        Dropped => {
            next.grade = None;
            next.progress = requested.unwrap_or(current.progress).min(99);
        }
        InProgress => {
            next.grade = None;
            next.progress = requested.unwrap_or(current.progress).min(99);
        }
        NotStarted => {
            next.grade = None;
            next.progress = 0;
        }
    }

    if from == Completed && to != Completed {
        next.completed_at = None;
    }

    tracing::debug!(
        course = %current.course_id,
        from = %from,
        to = %to,
        "Enrollment transition accepted"
    );

    Ok(TransitionOutcome {
        enrollment: next,
        stamp_started: starting,
        stamp_completed: completing,
    })
}
