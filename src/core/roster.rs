//! Roster and catalog files
//!
//! A roster is one student's identity plus their enrollments, stored as
//! JSON. The catalog is a JSON list of courses, optionally wrapped with a
//! name. These loaders are the only place the engine touches the filesystem.

use crate::core::models::{Catalog, Enrollment, StudentInfo};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::Path;

/// A student and their enrollments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Who the enrollments belong to
    pub student: StudentInfo,
    /// Enrollment records in the order they were added
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
}

impl Roster {
    /// Create an empty roster
    #[must_use]
    pub const fn new(student: StudentInfo) -> Self {
        Self {
            student,
            enrollments: Vec::new(),
        }
    }

    /// Find an enrollment by course id
    #[must_use]
    pub fn find(&self, course_id: &str) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.course_id == course_id)
    }

    /// Replace the enrollment with the same course id, or append it
    pub fn upsert(&mut self, enrollment: Enrollment) {
        match self
            .enrollments
            .iter_mut()
            .find(|e| e.course_id == enrollment.course_id)
        {
            Some(existing) => *existing = enrollment,
            None => self.enrollments.push(enrollment),
        }
    }

    /// Take credits from the catalog for enrollments recorded with zero credits.
    ///
    /// # Returns
    /// The number of enrollments updated
    pub fn fill_missing_credits(&mut self, catalog: &Catalog) -> usize {
        let mut updated = 0;
        for enrollment in self.enrollments.iter_mut().filter(|e| e.credits == 0) {
            if let Some(course) = catalog.get_course(&enrollment.course_id) {
                enrollment.credits = course.credits;
                updated += 1;
            }
        }
        updated
    }

    /// Problems worth reporting before computing anything.
    ///
    /// Flags duplicate course ids, zero-credit enrollments and course ids
    /// missing from the catalog. None of these stop computation.
    #[must_use]
    pub fn warnings(&self, catalog: &Catalog) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for enrollment in &self.enrollments {
            let id = enrollment.course_id.as_str();
            if !seen.insert(id) {
                warnings.push(format!("Duplicate enrollment for {id}"));
            }
            if enrollment.credits == 0 {
                warnings.push(format!("Enrollment for {id} has no credits"));
            }
            if catalog.get_course(id).is_none() {
                warnings.push(format!("Course {id} is not in the catalog"));
            }
        }
        warnings
    }
}

/// Load a roster from a JSON file
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid roster
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Roster, Box<dyn Error>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read roster {}: {e}", path.display()))?;
    let roster: Roster = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid roster {}: {e}", path.display()))?;
    tracing::debug!(
        "Loaded {} enrollments for {} from {}",
        roster.enrollments.len(),
        roster.student.display_name(),
        path.display()
    );
    Ok(roster)
}

/// Write a roster as pretty-printed JSON
///
/// # Errors
/// Returns an error if serialization or writing fails
pub fn save_roster<P: AsRef<Path>>(roster: &Roster, path: P) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(roster)?;
    fs::write(path.as_ref(), json)?;
    tracing::info!("Roster saved to {}", path.as_ref().display());
    Ok(())
}

/// Load a catalog from a JSON file
///
/// Accepts either `{ "name": ..., "courses": [...] }` or a bare list of
/// courses.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, Box<dyn Error>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read catalog {}: {e}", path.display()))?;

    let catalog = match serde_json::from_str::<Catalog>(&content) {
        Ok(catalog) => catalog,
        Err(first) => {
            let courses = serde_json::from_str(&content)
                .map_err(|_| format!("Invalid catalog {}: {first}", path.display()))?;
            let name = path
                .file_stem()
                .map_or_else(String::new, |s| s.to_string_lossy().to_string());
            Catalog::from_courses(name, courses)
        }
    };

    tracing::debug!("Loaded {} catalog courses from {}", catalog.len(), path.display());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseMetadata, EnrollmentStatus};
    use tempfile::TempDir;

    fn catalog() -> Catalog {
        Catalog::from_courses(
            "AUN".to_string(),
            vec![CourseMetadata::new(
                "cs-101".to_string(),
                "CSC 101".to_string(),
                "Introduction to Computer Science".to_string(),
                3,
            )],
        )
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let mut roster = Roster::new(StudentInfo::new("Ada".to_string()));
        roster.upsert(Enrollment::new("cs-101".to_string(), 3));
        roster.upsert(
            Enrollment::new("cs-101".to_string(), 3).with_status(EnrollmentStatus::Dropped),
        );
        assert_eq!(roster.enrollments.len(), 1);
        assert_eq!(
            roster.find("cs-101").map(|e| e.status),
            Some(EnrollmentStatus::Dropped)
        );
    }

    #[test]
    fn test_fill_missing_credits() {
        let mut roster = Roster::default();
        roster.enrollments.push(Enrollment::new("cs-101".to_string(), 0));
        roster.enrollments.push(Enrollment::new("cs-999".to_string(), 0));
        assert_eq!(roster.fill_missing_credits(&catalog()), 1);
        assert_eq!(roster.enrollments[0].credits, 3);
        assert_eq!(roster.enrollments[1].credits, 0);
    }

    #[test]
    fn test_warnings() {
        let mut roster = Roster::default();
        roster.enrollments.push(Enrollment::new("cs-101".to_string(), 3));
        roster.enrollments.push(Enrollment::new("cs-101".to_string(), 3));
        roster.enrollments.push(Enrollment::new("cs-999".to_string(), 0));
        let warnings = roster.warnings(&catalog());
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("Duplicate"));
    }

    #[test]
    fn test_roster_file_roundtrip() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("roster.json");
        let mut roster = Roster::new(StudentInfo::new("Ada Lovelace".to_string()));
        roster.upsert(Enrollment::new("cs-101".to_string(), 3).with_term("Fall", "2024"));

        save_roster(&roster, &path).expect("save");
        let loaded = load_roster(&path).expect("load");
        assert_eq!(loaded, roster);
    }

    #[test]
    fn test_load_catalog_accepts_bare_list() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("courses.json");
        fs::write(
            &path,
            r#"[{"id": "cs-101", "code": "CSC 101", "title": "Intro", "credits": 3}]"#,
        )
        .expect("write");

        let catalog = load_catalog(&path).expect("load");
        assert_eq!(catalog.name, "courses");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_roster_missing_file() {
        let err = load_roster("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read roster"));
    }
}
