//! Data models for `academic-progress`

pub mod catalog;
pub mod course;
pub mod enrollment;
pub mod grade;
pub mod student;

pub use catalog::Catalog;
pub use course::CourseMetadata;
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use grade::{grade_point, grade_point_str, Grade, GradeScale};
pub use student::StudentInfo;
