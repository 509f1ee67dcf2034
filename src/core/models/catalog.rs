//! Course catalog: id -> metadata lookup

use super::course::CourseMetadata;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All courses a student can enroll in, keyed by catalog id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog name (e.g., "2022 Catalog")
    #[serde(default)]
    pub name: String,

    /// Courses keyed by id
    #[serde(
        serialize_with = "serialize_courses",
        deserialize_with = "deserialize_courses"
    )]
    courses: HashMap<String, CourseMetadata>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            courses: HashMap::new(),
        }
    }

    /// Build a catalog from a list of courses; later duplicates replace earlier ones
    #[must_use]
    pub fn from_courses(name: String, courses: Vec<CourseMetadata>) -> Self {
        let mut catalog = Self::new(name);
        for course in courses {
            catalog.add_course(course);
        }
        catalog
    }

    /// Add or replace a course
    pub fn add_course(&mut self, course: CourseMetadata) {
        self.courses.insert(course.id.clone(), course);
    }

    /// Look up a course by id
    #[must_use]
    pub fn get_course(&self, id: &str) -> Option<&CourseMetadata> {
        self.courses.get(id)
    }

    /// Look up a course by display code (e.g., "CSC 201")
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<&CourseMetadata> {
        self.courses.values().find(|c| c.code == code)
    }

    /// All courses sorted by code
    #[must_use]
    pub fn courses(&self) -> Vec<&CourseMetadata> {
        let mut courses: Vec<_> = self.courses.values().collect();
        courses.sort_by(|a, b| a.code.cmp(&b.code));
        courses
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// `true` when the catalog has no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

// On disk the catalog is a plain list of courses.
fn serialize_courses<S>(
    courses: &HashMap<String, CourseMetadata>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let mut list: Vec<_> = courses.values().collect();
    list.sort_by(|a, b| a.id.cmp(&b.id));
    list.serialize(serializer)
}

fn deserialize_courses<'de, D>(deserializer: D) -> Result<HashMap<String, CourseMetadata>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let list: Vec<CourseMetadata> = Vec::deserialize(deserializer)?;
    Ok(list.into_iter().map(|c| (c.id.clone(), c)).collect())
}
