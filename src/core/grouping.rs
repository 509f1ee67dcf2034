//! Grouped statistics: by level, category and term

use crate::core::gpa::{compute_completion_rate, compute_credit_totals, compute_gpa};
use crate::core::models::{Catalog, Enrollment, GradeScale};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Academic levels reported on statistics pages and transcripts
pub const LEVELS: [u32; 4] = [100, 200, 300, 400];

/// Requirement categories used by the catalog
pub const CATEGORIES: [&str; 4] = ["Core", "Major", "Elective", "General"];

/// Semester assumed for enrollments without one
pub const DEFAULT_SEMESTER: &str = "Fall";

/// Year assumed for enrollments without one
pub const DEFAULT_YEAR: &str = "2024";

/// Aggregates for one group of enrollments
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GroupStats {
    /// Credit-weighted GPA of completed, graded members
    pub gpa: f64,
    /// Completed members
    pub completed_count: usize,
    /// All members
    pub total_count: usize,
    /// Credits across all members
    pub total_credits: u32,
    /// Credits of completed members
    pub earned_credits: u32,
    /// Percentage of members completed
    pub completion_rate: u32,
}

impl GroupStats {
    /// Aggregate a group of enrollments
    #[must_use]
    pub fn from_members(members: &[&Enrollment], scale: GradeScale) -> Self {
        let credits = compute_credit_totals(members.iter().copied());
        Self {
            gpa: compute_gpa(members.iter().copied(), scale),
            completed_count: members.iter().filter(|e| e.is_completed()).count(),
            total_count: members.len(),
            total_credits: credits.total,
            earned_credits: credits.earned,
            completion_rate: compute_completion_rate(members.iter().copied()),
        }
    }
}

/// Partition enrollments by `key_fn` and aggregate each expected key.
///
/// Every key in `expected_keys` appears in the result, with zeroed stats when
/// no enrollment maps to it. Enrollments whose key is `None` or falls outside
/// `expected_keys` are not counted anywhere.
#[must_use]
pub fn group_stats<K, F>(
    enrollments: &[Enrollment],
    key_fn: F,
    expected_keys: &[K],
    scale: GradeScale,
) -> BTreeMap<K, GroupStats>
where
    K: Ord + Clone,
    F: Fn(&Enrollment) -> Option<K>,
{
    let mut members: BTreeMap<K, Vec<&Enrollment>> = expected_keys
        .iter()
        .map(|key| (key.clone(), Vec::new()))
        .collect();

    for enrollment in enrollments {
        if let Some(bucket) = key_fn(enrollment).and_then(|key| members.get_mut(&key)) {
            bucket.push(enrollment);
        }
    }

    members
        .into_iter()
        .map(|(key, group)| (key, GroupStats::from_members(&group, scale)))
        .collect()
}

/// Stats per level (100-400); the level comes from the catalog entry
#[must_use]
pub fn level_stats(
    enrollments: &[Enrollment],
    catalog: &Catalog,
    scale: GradeScale,
) -> BTreeMap<u32, GroupStats> {
    group_stats(
        enrollments,
        |e| catalog.get_course(&e.course_id).and_then(|c| c.level()),
        &LEVELS,
        scale,
    )
}

/// Stats per requirement category
#[must_use]
pub fn category_stats(
    enrollments: &[Enrollment],
    catalog: &Catalog,
    scale: GradeScale,
) -> BTreeMap<String, GroupStats> {
    let expected: Vec<String> = CATEGORIES.iter().map(ToString::to_string).collect();
    group_stats(
        enrollments,
        |e| catalog.get_course(&e.course_id).map(|c| c.category.clone()),
        &expected,
        scale,
    )
}

/// Course counts plus per-level aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcademicStats {
    /// Number of enrollments
    pub total_courses: usize,
    /// Completed enrollments
    pub completed_courses: usize,
    /// Aggregates keyed by level
    pub by_level: BTreeMap<u32, GroupStats>,
}

/// Compute course counts and level breakdown
#[must_use]
pub fn academic_stats(
    enrollments: &[Enrollment],
    catalog: &Catalog,
    scale: GradeScale,
) -> AcademicStats {
    AcademicStats {
        total_courses: enrollments.len(),
        completed_courses: enrollments.iter().filter(|e| e.is_completed()).count(),
        by_level: level_stats(enrollments, catalog, scale),
    }
}

/// A (semester, year) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Term {
    /// Semester name (e.g., "Fall")
    pub semester: String,
    /// Year as written (e.g., "2024")
    pub year: String,
}

impl Term {
    /// Term of an enrollment, defaulting missing parts to Fall / 2024
    #[must_use]
    pub fn of(enrollment: &Enrollment) -> Self {
        Self {
            semester: enrollment
                .semester
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SEMESTER.to_string()),
            year: enrollment
                .year
                .clone()
                .filter(|y| !y.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_YEAR.to_string()),
        }
    }

    /// Rank within a year: Spring 1, Summer 2, Fall 3, anything else 0
    #[must_use]
    pub fn semester_rank(&self) -> u8 {
        match self.semester.as_str() {
            "Spring" => 1,
            "Summer" => 2,
            "Fall" => 3,
            _ => 0,
        }
    }

    fn numeric_year(&self) -> Option<i64> {
        self.year.trim().parse().ok()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.semester, self.year)
    }
}

/// Display ordering for terms: year descending, then semester rank descending.
///
/// Within one year this puts Fall before Summer before Spring. Years that do
/// not parse as numbers sort after every numeric year.
#[must_use]
pub fn compare_terms(a: &Term, b: &Term) -> Ordering {
    let year_order = match (a.numeric_year(), b.numeric_year()) {
        (Some(ya), Some(yb)) => yb.cmp(&ya),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    year_order.then_with(|| b.semester_rank().cmp(&a.semester_rank()))
}

/// Enrollments sharing a term, with their aggregates
#[derive(Debug, Clone)]
pub struct TermGroup<'a> {
    /// The shared term
    pub term: Term,
    /// Members in input order
    pub enrollments: Vec<&'a Enrollment>,
    /// Aggregates over the members
    pub stats: GroupStats,
}

/// Group enrollments by term and sort the groups with [`compare_terms`].
///
/// Groups comparing equal keep the order in which their term was first seen.
#[must_use]
pub fn semester_groups<'a, I>(enrollments: I, scale: GradeScale) -> Vec<TermGroup<'a>>
where
    I: IntoIterator<Item = &'a Enrollment>,
{
    let mut order: Vec<Term> = Vec::new();
    let mut members: Vec<Vec<&'a Enrollment>> = Vec::new();

    for enrollment in enrollments {
        let term = Term::of(enrollment);
        if let Some(index) = order.iter().position(|t| *t == term) {
            members[index].push(enrollment);
        } else {
            order.push(term);
            members.push(vec![enrollment]);
        }
    }

    let mut groups: Vec<TermGroup<'a>> = order
        .into_iter()
        .zip(members)
        .map(|(term, enrollments)| {
            let stats = GroupStats::from_members(&enrollments, scale);
            TermGroup {
                term,
                enrollments,
                stats,
            }
        })
        .collect();

    groups.sort_by(|a, b| compare_terms(&a.term, &b.term));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseMetadata, EnrollmentStatus, Grade};

    fn catalog() -> Catalog {
        let course = |id: &str, code: &str, category: &str| {
            CourseMetadata::new(id.to_string(), code.to_string(), format!("{code} title"), 3)
                .with_category(category)
        };
        Catalog::from_courses(
            "test".to_string(),
            vec![
                course("CSC101", "CSC 101", "Core"),
                course("CSC201", "CSC 201", "Core"),
                course("CSC301", "CSC 301", "Major"),
                course("ENG501", "ENG 501", "General"),
            ],
        )
    }

    fn enrollment(id: &str, status: EnrollmentStatus, grade: Option<Grade>) -> Enrollment {
        let mut e = Enrollment::new(id.to_string(), 3).with_status(status);
        e.grade = grade;
        e
    }

    fn termed(semester: &str, year: &str) -> Enrollment {
        Enrollment::new(format!("{semester}{year}"), 3).with_term(semester, year)
    }

    #[test]
    fn test_group_stats_contains_every_expected_key() {
        let enrollments = vec![enrollment(
            "CSC101",
            EnrollmentStatus::Completed,
            Some(Grade::A),
        )];
        let stats = group_stats(
            &enrollments,
            |e| Some(e.course_id.len() as u32),
            &[1_u32, 2, 6],
            GradeScale::Full,
        );

        assert_eq!(stats.keys().copied().collect::<Vec<_>>(), vec![1, 2, 6]);
        assert_eq!(stats[&1], GroupStats::default());
        assert_eq!(stats[&6].total_count, 1);
    }

    #[test]
    fn test_level_stats_zero_defaults_for_empty_levels() {
        let enrollments = vec![
            enrollment("CSC101", EnrollmentStatus::Completed, Some(Grade::A)),
            enrollment("CSC201", EnrollmentStatus::InProgress, None),
            // level 500 is not reported
            enrollment("ENG501", EnrollmentStatus::Completed, Some(Grade::F)),
            // not in catalog
            enrollment("XYZ999", EnrollmentStatus::Completed, Some(Grade::F)),
        ];
        let stats = level_stats(&enrollments, &catalog(), GradeScale::Full);

        assert_eq!(stats.len(), 4);
        assert!((stats[&100].gpa - 4.0).abs() < f64::EPSILON);
        assert_eq!(stats[&100].completion_rate, 100);
        assert_eq!(stats[&200].completion_rate, 0);
        assert_eq!(stats[&200].total_credits, 3);
        assert_eq!(stats[&300], GroupStats::default());
        assert_eq!(stats[&400], GroupStats::default());
    }

    #[test]
    fn test_category_stats() {
        let enrollments = vec![
            enrollment("CSC101", EnrollmentStatus::Completed, Some(Grade::B)),
            enrollment("CSC301", EnrollmentStatus::NotStarted, None),
        ];
        let stats = category_stats(&enrollments, &catalog(), GradeScale::Full);

        assert_eq!(stats.len(), CATEGORIES.len());
        assert_eq!(stats["Core"].completed_count, 1);
        assert_eq!(stats["Major"].total_count, 1);
        assert_eq!(stats["Elective"], GroupStats::default());
    }

    #[test]
    fn test_semester_groups_sorted_year_desc_then_rank_desc() {
        let enrollments = vec![
            termed("Fall", "2024"),
            termed("Spring", "2024"),
            termed("Fall", "2023"),
        ];
        let groups = semester_groups(&enrollments, GradeScale::Full);
        let labels: Vec<String> = groups.iter().map(|g| g.term.to_string()).collect();
        assert_eq!(labels, vec!["Fall 2024", "Spring 2024", "Fall 2023"]);
    }

    #[test]
    fn test_semester_rank_orders_within_year() {
        let enrollments = vec![
            termed("Spring", "2025"),
            termed("Summer", "2025"),
            termed("Fall", "2025"),
        ];
        let groups = semester_groups(&enrollments, GradeScale::Full);
        let labels: Vec<String> = groups.iter().map(|g| g.term.to_string()).collect();
        assert_eq!(labels, vec!["Fall 2025", "Summer 2025", "Spring 2025"]);
    }

    #[test]
    fn test_missing_term_defaults_to_fall_2024() {
        let enrollments = vec![
            Enrollment::new("CSC101".to_string(), 3),
            termed("Fall", "2024"),
        ];
        let groups = semester_groups(&enrollments, GradeScale::Full);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].enrollments.len(), 2);
        assert_eq!(groups[0].stats.total_credits, 6);
    }

    #[test]
    fn test_unparsable_year_sorts_last() {
        let a = Term {
            semester: "Fall".to_string(),
            year: "TBD".to_string(),
        };
        let b = Term {
            semester: "Spring".to_string(),
            year: "2020".to_string(),
        };
        assert_eq!(compare_terms(&a, &b), Ordering::Greater);
        assert_eq!(compare_terms(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let enrollments = vec![
            enrollment("CSC101", EnrollmentStatus::Completed, Some(Grade::A)),
            enrollment("CSC301", EnrollmentStatus::Completed, Some(Grade::CPlus)),
        ];
        let first = level_stats(&enrollments, &catalog(), GradeScale::Compact);
        let second = level_stats(&enrollments, &catalog(), GradeScale::Compact);
        assert_eq!(first, second);
    }
}
