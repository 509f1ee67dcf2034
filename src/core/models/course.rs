//! Course catalog metadata

use serde::{Deserialize, Serialize};

/// Read-only catalog entry describing a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseMetadata {
    /// Catalog id referenced by enrollments (e.g., "CSC301")
    pub id: String,

    /// Display code (e.g., "CSC 301")
    pub code: String,

    /// Course title (e.g., "Database Systems")
    pub title: String,

    /// Catalog credit hours
    #[serde(default)]
    pub credits: u32,

    /// Requirement category (e.g., "Core", "Major", "Elective")
    #[serde(default)]
    pub category: String,

    /// Owning department
    #[serde(default)]
    pub department: String,

    /// Explicit level (100, 200, ...); derived from the code when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    /// Prerequisites stored as course codes (e.g., "CSC 201")
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl CourseMetadata {
    /// Create a new catalog entry
    ///
    /// # Arguments
    /// * `id` - Catalog id
    /// * `code` - Display code
    /// * `title` - Course title
    /// * `credits` - Credit hours
    #[must_use]
    pub const fn new(id: String, code: String, title: String, credits: u32) -> Self {
        Self {
            id,
            code,
            title,
            credits,
            category: String::new(),
            department: String::new(),
            level: None,
            prerequisites: Vec::new(),
        }
    }

    /// Set the category (builder style)
    #[must_use]
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Add a prerequisite by course code
    pub fn add_prerequisite(&mut self, code: String) {
        if !self.prerequisites.contains(&code) {
            self.prerequisites.push(code);
        }
    }

    /// Academic level of the course.
    ///
    /// Uses the explicit `level` when set, otherwise the first number in the
    /// code rounded down to the hundred (`"CSC 301"` -> 300).
    #[must_use]
    pub fn level(&self) -> Option<u32> {
        if self.level.is_some() {
            return self.level;
        }
        let digits: String = self
            .code
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();
        let number: u32 = digits.parse().ok()?;
        if number < 100 {
            return None;
        }
        Some(number / 100 * 100)
    }
}
