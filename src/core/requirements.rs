//! Degree requirement tracking and enrollment eligibility

use crate::core::models::{Catalog, CourseMetadata, Enrollment};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A number of completed courses required from one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRequirement {
    /// Catalog category the requirement draws from
    pub category: String,
    /// Display title (e.g., "Computer Science Core")
    pub title: String,
    /// Completed courses needed
    pub required: usize,
}

impl CategoryRequirement {
    /// Create a requirement
    #[must_use]
    pub fn new(category: &str, title: &str, required: usize) -> Self {
        Self {
            category: category.to_string(),
            title: title.to_string(),
            required,
        }
    }
}

/// The standard computer science checksheet
#[must_use]
pub fn default_requirements() -> Vec<CategoryRequirement> {
    vec![
        CategoryRequirement::new("Core", "Computer Science Core", 8),
        CategoryRequirement::new("Major", "Mathematics Requirements", 4),
        CategoryRequirement::new("Elective", "Technical Electives", 6),
    ]
}

/// Progress toward one requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementProgress {
    /// The requirement measured
    pub requirement: CategoryRequirement,
    /// Completed courses in the category
    pub completed: usize,
    /// `round(100 * completed / required)`, capped at 100
    pub percent: u32,
}

impl RequirementProgress {
    /// `true` once enough courses are completed
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        self.completed >= self.requirement.required
    }
}

/// Measure each requirement against the completed enrollments.
///
/// A requirement of zero courses is always 100% satisfied. Enrollments for
/// courses missing from the catalog count toward nothing.
#[must_use]
pub fn requirement_progress(
    requirements: &[CategoryRequirement],
    enrollments: &[Enrollment],
    catalog: &Catalog,
) -> Vec<RequirementProgress> {
    requirements
        .iter()
        .map(|requirement| {
            let completed = enrollments
                .iter()
                .filter(|e| e.is_completed())
                .filter_map(|e| catalog.get_course(&e.course_id))
                .filter(|c| c.category == requirement.category)
                .count();
            let percent = if requirement.required == 0 {
                100
            } else {
                crate::core::gpa::percentage(completed, requirement.required).min(100)
            };
            RequirementProgress {
                requirement: requirement.clone(),
                completed,
                percent,
            }
        })
        .collect()
}

/// Codes of every course the student has completed
fn completed_codes<'a>(enrollments: &[Enrollment], catalog: &'a Catalog) -> HashSet<&'a str> {
    enrollments
        .iter()
        .filter(|e| e.is_completed())
        .filter_map(|e| catalog.get_course(&e.course_id))
        .map(|c| c.code.as_str())
        .collect()
}

/// Whether every prerequisite of `course_id` has been completed.
///
/// Prerequisites are stored as course codes. A course with no prerequisites,
/// or one missing from the catalog, is always eligible.
#[must_use]
pub fn prerequisites_met(course_id: &str, enrollments: &[Enrollment], catalog: &Catalog) -> bool {
    let Some(course) = catalog.get_course(course_id) else {
        tracing::debug!("Course {course_id} not in catalog; treating prerequisites as met");
        return true;
    };
    if course.prerequisites.is_empty() {
        return true;
    }
    let done = completed_codes(enrollments, catalog);
    course
        .prerequisites
        .iter()
        .all(|code| done.contains(code.as_str()))
}

/// Prerequisite codes of `course_id` not yet completed, in catalog order
#[must_use]
pub fn missing_prerequisites(
    course_id: &str,
    enrollments: &[Enrollment],
    catalog: &Catalog,
) -> Vec<String> {
    let Some(course) = catalog.get_course(course_id) else {
        return Vec::new();
    };
    let done = completed_codes(enrollments, catalog);
    course
        .prerequisites
        .iter()
        .filter(|code| !done.contains(code.as_str()))
        .cloned()
        .collect()
}

/// Catalog courses the student has no enrollment for, sorted by code
#[must_use]
pub fn available_courses<'a>(
    catalog: &'a Catalog,
    enrollments: &[Enrollment],
) -> Vec<&'a CourseMetadata> {
    let enrolled: HashSet<&str> = enrollments.iter().map(|e| e.course_id.as_str()).collect();
    catalog
        .courses()
        .into_iter()
        .filter(|c| !enrolled.contains(c.id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{EnrollmentStatus, Grade};

    fn catalog() -> Catalog {
        let mut data_structures = CourseMetadata::new(
            "cs-102".to_string(),
            "CSC 102".to_string(),
            "Data Structures and Algorithms".to_string(),
            4,
        )
        .with_category("Core");
        data_structures.add_prerequisite("CSC 101".to_string());

        let mut ml = CourseMetadata::new(
            "cs-401".to_string(),
            "CSC 401".to_string(),
            "Machine Learning".to_string(),
            3,
        )
        .with_category("Elective");
        ml.add_prerequisite("CSC 102".to_string());
        ml.add_prerequisite("MTH 201".to_string());

        Catalog::from_courses(
            "AUN".to_string(),
            vec![
                CourseMetadata::new(
                    "cs-101".to_string(),
                    "CSC 101".to_string(),
                    "Introduction to Computer Science".to_string(),
                    3,
                )
                .with_category("Core"),
                data_structures,
                ml,
                CourseMetadata::new(
                    "mth-201".to_string(),
                    "MTH 201".to_string(),
                    "Calculus II".to_string(),
                    3,
                )
                .with_category("Major"),
            ],
        )
    }

    fn done(id: &str) -> Enrollment {
        Enrollment::new(id.to_string(), 3)
            .with_status(EnrollmentStatus::Completed)
            .with_grade(Grade::A)
    }

    #[test]
    fn test_prerequisites_met() {
        let catalog = catalog();
        let enrollments = vec![done("cs-101")];

        assert!(prerequisites_met("cs-101", &enrollments, &catalog));
        assert!(prerequisites_met("cs-102", &enrollments, &catalog));
        assert!(!prerequisites_met("cs-401", &enrollments, &catalog));
        assert!(prerequisites_met("unknown", &enrollments, &catalog));
    }

    #[test]
    fn test_in_progress_does_not_satisfy_prerequisite() {
        let catalog = catalog();
        let enrollments = vec![Enrollment::new("cs-101".to_string(), 3)
            .with_status(EnrollmentStatus::InProgress)
            .with_term("Fall", "2024")];
        assert!(!prerequisites_met("cs-102", &enrollments, &catalog));
        assert_eq!(
            missing_prerequisites("cs-102", &enrollments, &catalog),
            vec!["CSC 101".to_string()]
        );
    }

    #[test]
    fn test_available_courses_excludes_enrolled() {
        let catalog = catalog();
        let enrollments = vec![done("cs-101"), Enrollment::new("mth-201".to_string(), 3)];
        let codes: Vec<&str> = available_courses(&catalog, &enrollments)
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(codes, vec!["CSC 102", "CSC 401"]);
    }

    #[test]
    fn test_requirement_progress() {
        let catalog = catalog();
        let enrollments = vec![done("cs-101"), done("cs-102"), done("mth-201")];
        let requirements = vec![
            CategoryRequirement::new("Core", "Core", 2),
            CategoryRequirement::new("Major", "Math", 4),
            CategoryRequirement::new("Elective", "Electives", 0),
        ];
        let progress = requirement_progress(&requirements, &enrollments, &catalog);

        assert_eq!(progress[0].completed, 2);
        assert_eq!(progress[0].percent, 100);
        assert!(progress[0].is_satisfied());
        assert_eq!(progress[1].percent, 25);
        assert!(!progress[1].is_satisfied());
        assert_eq!(progress[2].percent, 100);
    }

    #[test]
    fn test_default_requirements_cover_checksheet() {
        let requirements = default_requirements();
        assert_eq!(requirements.len(), 3);
        assert_eq!(requirements[0].required, 8);
    }
}
