//! Student identity shown on transcripts

use serde::{Deserialize, Serialize};

/// Student details printed in transcript headers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    /// Full display name
    pub name: String,

    /// Institutional student id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,

    /// Department (e.g., "Computer Science")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    /// Degree being pursued (e.g., "BSc Computer Science")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
}

impl StudentInfo {
    /// Student with only a name
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            name,
            student_id: None,
            department: None,
            degree: None,
        }
    }

    /// Name to print, falling back to "Student" when blank
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Student"
        } else {
            &self.name
        }
    }
}
