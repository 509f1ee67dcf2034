//! HTML transcript document
//!
//! Renders completed, graded coursework grouped by term through the
//! `transcript.html` askama template. Values are HTML-escaped by the
//! template engine.

use crate::core::grouping::semester_groups;
use crate::core::models::{Catalog, Enrollment, StudentInfo};
use crate::core::report::{TranscriptContext, TranscriptOptions, TranscriptRenderer};
use askama::Template;
use std::error::Error;

const NOT_AVAILABLE: &str = "N/A";

struct DocumentRow {
    code: String,
    title: String,
    credits: u32,
    grade: String,
}

struct SemesterSection {
    label: String,
    rows: Vec<DocumentRow>,
    credits: u32,
    gpa: String,
}

#[derive(Template)]
#[template(path = "transcript.html")]
struct TranscriptDocument<'a> {
    institution: String,
    student_name: &'a str,
    student_id: &'a str,
    department: &'a str,
    degree: &'a str,
    generated: String,
    semesters: Vec<SemesterSection>,
    total_credits: u32,
    overall_gpa: String,
    total_courses: usize,
}

impl<'a> TranscriptDocument<'a> {
    fn build(ctx: &TranscriptContext<'a>) -> Self {
        let graded = ctx.graded();
        let scale = ctx.options.scale;

        let semesters = semester_groups(graded.iter().copied(), scale)
            .into_iter()
            .map(|group| SemesterSection {
                label: group.term.to_string(),
                rows: group
                    .enrollments
                    .iter()
                    .map(|e| DocumentRow {
                        code: ctx.course_code(e).to_string(),
                        title: ctx.course_title(e).to_string(),
                        credits: e.credits,
                        grade: e.grade.as_ref().map(ToString::to_string).unwrap_or_default(),
                    })
                    .collect(),
                credits: group.stats.total_credits,
                gpa: format!("{:.2}", group.stats.gpa),
            })
            .collect();

        let student = ctx.student;
        let field = |value: &'a Option<String>| value.as_deref().unwrap_or(NOT_AVAILABLE);

        Self {
            institution: ctx.options.institution.to_uppercase(),
            student_name: student.display_name(),
            student_id: field(&student.student_id),
            department: field(&student.department),
            degree: field(&student.degree),
            generated: ctx.options.generated_at.format("%B %-d, %Y").to_string(),
            semesters,
            total_credits: ctx.progress.completed_credits,
            overall_gpa: format!("{:.2}", ctx.progress.gpa),
            total_courses: ctx.stats.completed_courses,
        }
    }
}

/// HTML transcript renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl TranscriptRenderer for HtmlRenderer {
    fn render(&self, ctx: &TranscriptContext) -> Result<String, Box<dyn Error>> {
        Ok(TranscriptDocument::build(ctx).render()?)
    }
}

/// Render the printable HTML transcript of completed, graded coursework.
///
/// # Errors
/// Returns an error if template rendering fails
pub fn render_transcript_document(
    enrollments: &[Enrollment],
    catalog: &Catalog,
    student: &StudentInfo,
    options: &TranscriptOptions,
) -> Result<String, askama::Error> {
    let ctx = TranscriptContext::new(student, catalog, enrollments, options);
    TranscriptDocument::build(&ctx).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseMetadata, EnrollmentStatus, Grade};
    use crate::core::report::formats::text::TextRenderer;
    use chrono::{TimeZone, Utc};

    fn options() -> TranscriptOptions {
        let mut options =
            TranscriptOptions::new(Utc.with_ymd_and_hms(2024, 12, 15, 9, 0, 0).unwrap());
        options.institution = "American University of Nigeria".to_string();
        options
    }

    fn catalog() -> Catalog {
        Catalog::from_courses(
            "AUN".to_string(),
            vec![
                CourseMetadata::new(
                    "cs-101".to_string(),
                    "CSC 101".to_string(),
                    "Intro <Programming>".to_string(),
                    3,
                ),
                CourseMetadata::new(
                    "cs-201".to_string(),
                    "CSC 201".to_string(),
                    "Web Development".to_string(),
                    3,
                ),
            ],
        )
    }

    fn completed(id: &str, grade: Grade, semester: &str, year: &str) -> Enrollment {
        Enrollment::new(id.to_string(), 3)
            .with_status(EnrollmentStatus::Completed)
            .with_grade(grade)
            .with_term(semester, year)
    }

    #[test]
    fn test_document_sections_and_summary() {
        let mut student = StudentInfo::new("Ada Lovelace".to_string());
        student.student_id = Some("A00012345".to_string());
        let enrollments = vec![
            completed("cs-101", Grade::A, "Fall", "2023"),
            completed("cs-201", Grade::B, "Spring", "2024"),
            Enrollment::new("cs-301".to_string(), 3)
                .with_status(EnrollmentStatus::InProgress)
                .with_term("Fall", "2024"),
        ];

        let html = render_transcript_document(&enrollments, &catalog(), &student, &options())
            .expect("render");

        assert!(html.contains("AMERICAN UNIVERSITY OF NIGERIA"));
        assert!(html.contains("A00012345"));
        assert!(html.contains("<strong>Department:</strong> N/A"));
        assert!(html.contains("December 15, 2024"));
        assert!(!html.contains("Fall 2024"));

        let spring = html.find("Spring 2024").expect("spring section");
        let fall = html.find("Fall 2023").expect("fall section");
        assert!(spring < fall);

        assert!(html.contains("<strong>Total Credits Completed:</strong> 6"));
        assert!(html.contains("<strong>Overall GPA:</strong> 3.50"));
        assert!(html.contains("<strong>Total Courses:</strong> 2"));
    }

    #[test]
    fn test_summary_counts_completed_without_grade() {
        let enrollments = vec![
            completed("cs-101", Grade::A, "Fall", "2023"),
            Enrollment::new("cs-201".to_string(), 3)
                .with_status(EnrollmentStatus::Completed)
                .with_term("Spring", "2024"),
        ];
        let options = options();
        let student = StudentInfo::default();
        let catalog = catalog();
        let ctx = TranscriptContext::new(&student, &catalog, &enrollments, &options);

        let html = HtmlRenderer.render(&ctx).expect("html");
        let text = TextRenderer.render(&ctx).expect("text");

        assert!(html.contains("<strong>Total Credits Completed:</strong> 6"));
        assert!(html.contains("<strong>Overall GPA:</strong> 4.00"));
        assert!(html.contains("<strong>Total Courses:</strong> 2"));
        assert!(text.contains("Completed Credits: 6"));
        assert!(text.contains("Current GPA: 4.00"));
        // the ungraded course has no row in the document
        assert!(!html.contains("Web Development"));
    }

    #[test]
    fn test_document_escapes_text() {
        let enrollments = vec![completed("cs-101", Grade::A, "Fall", "2023")];
        let html = render_transcript_document(
            &enrollments,
            &catalog(),
            &StudentInfo::default(),
            &options(),
        )
        .expect("render");
        assert!(html.contains("Intro &lt;Programming&gt;"));
    }

    #[test]
    fn test_document_empty_input() {
        let html = render_transcript_document(
            &[],
            &Catalog::default(),
            &StudentInfo::default(),
            &options(),
        )
        .expect("render");
        assert!(html.contains("No completed coursework on record."));
        assert!(html.contains("<strong>Overall GPA:</strong> 0.00"));
    }
}
