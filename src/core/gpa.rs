//! GPA, credit and completion aggregation
//!
//! Every function here is a pure projection over a slice (or iterator) of
//! enrollments. Empty input produces zero-valued results, never `NaN`.

use crate::core::models::{grade_point, Enrollment, EnrollmentStatus, GradeScale};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credits required for a degree
pub const REQUIRED_DEGREE_CREDITS: u32 = 120;

/// GPA at or above which a student makes the Dean's List
pub const DEANS_LIST_GPA: f64 = 3.5;

/// Credit totals over a set of enrollments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CreditTotals {
    /// Credits across every enrollment regardless of status
    pub total: u32,
    /// Credits of completed enrollments
    pub earned: u32,
}

/// Round to two decimal places, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Credit-weighted GPA over completed, graded enrollments.
///
/// Returns `0.0` when nothing qualifies. The result is rounded to two
/// decimals and always lies in `[0.0, 4.0]`.
#[must_use]
pub fn compute_gpa<'a, I>(enrollments: I, scale: GradeScale) -> f64
where
    I: IntoIterator<Item = &'a Enrollment>,
{
    let (points, credits) = enrollments
        .into_iter()
        .filter(|e| e.is_graded())
        .fold((0.0_f64, 0_u32), |(points, credits), e| {
            (
                points + grade_point(e.grade.as_ref(), scale) * f64::from(e.credits),
                credits.saturating_add(e.credits),
            )
        });

    if credits == 0 {
        return 0.0;
    }
    round2(points / f64::from(credits))
}

/// Total and earned credits
#[must_use]
pub fn compute_credit_totals<'a, I>(enrollments: I) -> CreditTotals
where
    I: IntoIterator<Item = &'a Enrollment>,
{
    enrollments
        .into_iter()
        .fold(CreditTotals::default(), |mut totals, e| {
            totals.total = totals.total.saturating_add(e.credits);
            if e.is_completed() {
                totals.earned = totals.earned.saturating_add(e.credits);
            }
            totals
        })
}

/// Percentage of enrollments completed, rounded to an integer; `0` for empty input
#[must_use]
pub fn compute_completion_rate<'a, I>(enrollments: I) -> u32
where
    I: IntoIterator<Item = &'a Enrollment>,
{
    let (completed, total) = enrollments
        .into_iter()
        .fold((0_usize, 0_usize), |(completed, total), e| {
            (completed + usize::from(e.is_completed()), total + 1)
        });
    percentage(completed, total)
}

/// `round(100 * part / whole)`, or `0` when `whole` is zero
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 * 100.0) / whole as f64).round() as u32
}

/// Overall degree progress: credits, GPA and credit-based completion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcademicProgress {
    /// Credits across every enrollment
    pub total_credits: u32,
    /// Credits of completed enrollments
    pub completed_credits: u32,
    /// Overall GPA
    pub gpa: f64,
    /// `round(100 * completed_credits / total_credits)`
    pub completion_percentage: u32,
}

/// Compute overall degree progress.
///
/// Unlike [`compute_completion_rate`], the percentage here is weighted by
/// credits rather than counted per course.
#[must_use]
pub fn academic_progress(enrollments: &[Enrollment], scale: GradeScale) -> AcademicProgress {
    let credits = compute_credit_totals(enrollments);
    AcademicProgress {
        total_credits: credits.total,
        completed_credits: credits.earned,
        gpa: compute_gpa(enrollments, scale),
        completion_percentage: percentage(credits.earned as usize, credits.total as usize),
    }
}

/// Percentage of [`REQUIRED_DEGREE_CREDITS`] earned, capped at 100
#[must_use]
pub fn degree_progress(credits_earned: u32) -> u32 {
    percentage(credits_earned as usize, REQUIRED_DEGREE_CREDITS as usize).min(100)
}

/// Standing derived from the overall GPA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AcademicStanding {
    /// GPA of at least [`DEANS_LIST_GPA`]
    DeansList,
    /// Anything below
    GoodStanding,
}

impl fmt::Display for AcademicStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeansList => write!(f, "Dean's List"),
            Self::GoodStanding => write!(f, "Good Standing"),
        }
    }
}

/// Classify a GPA as computed by [`compute_gpa`]
#[must_use]
pub fn academic_standing(gpa: f64) -> AcademicStanding {
    if gpa >= DEANS_LIST_GPA {
        AcademicStanding::DeansList
    } else {
        AcademicStanding::GoodStanding
    }
}

/// Headline numbers for a student's dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of enrollments
    pub total_courses: usize,
    /// Completed enrollments
    pub completed_courses: usize,
    /// In-progress enrollments
    pub in_progress_courses: usize,
    /// Not-started enrollments
    pub not_started_courses: usize,
    /// Dropped enrollments
    pub dropped_courses: usize,
    /// Credits of completed enrollments
    pub credits_earned: u32,
    /// Overall GPA
    pub gpa: f64,
    /// Percentage of enrollments completed
    pub completion_rate: u32,
}

/// Compute dashboard counters
#[must_use]
pub fn dashboard_stats(enrollments: &[Enrollment], scale: GradeScale) -> DashboardStats {
    let count = |status: EnrollmentStatus| {
        enrollments
            .iter()
            .filter(|e| e.status == status)
            .count()
    };

    DashboardStats {
        total_courses: enrollments.len(),
        completed_courses: count(EnrollmentStatus::Completed),
        in_progress_courses: count(EnrollmentStatus::InProgress),
        not_started_courses: count(EnrollmentStatus::NotStarted),
        dropped_courses: count(EnrollmentStatus::Dropped),
        credits_earned: compute_credit_totals(enrollments).earned,
        gpa: compute_gpa(enrollments, scale),
        completion_rate: compute_completion_rate(enrollments),
    }
}
