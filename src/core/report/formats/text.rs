//! Plain-text transcript

use crate::core::grouping::{semester_groups, LEVELS};
use crate::core::models::{Catalog, Enrollment, StudentInfo};
use crate::core::report::{
    TranscriptContext, TranscriptGrouping, TranscriptOptions, TranscriptRenderer,
};
use std::error::Error;
use std::fmt::Write;

const RULE_WIDTH: usize = 50;

/// Plain-text transcript renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    /// Render header, summary and course sections
    #[must_use]
    pub fn render_text(ctx: &TranscriptContext) -> String {
        let mut out = String::new();
        Self::write_header(&mut out, ctx);
        match ctx.options.grouping {
            TranscriptGrouping::Level => Self::write_level_sections(&mut out, ctx),
            TranscriptGrouping::Semester => Self::write_semester_sections(&mut out, ctx),
        }
        out
    }

    fn write_header(out: &mut String, ctx: &TranscriptContext) {
        let _ = writeln!(out, "ACADEMIC TRANSCRIPT");
        let _ = writeln!(out, "Student: {}", ctx.student.display_name());
        let _ = writeln!(out, "Generated: {}", ctx.options.generated_date());
        let _ = writeln!(out);
        let _ = writeln!(out, "SUMMARY");
        let _ = writeln!(out, "Total Credits: {}", ctx.progress.total_credits);
        let _ = writeln!(out, "Completed Credits: {}", ctx.progress.completed_credits);
        let _ = writeln!(out, "Current GPA: {:.2}", ctx.progress.gpa);
        let _ = writeln!(out, "Progress: {}%", ctx.progress.completion_percentage);
        let _ = writeln!(out);
    }

    fn write_section(
        out: &mut String,
        ctx: &TranscriptContext,
        heading: &str,
        members: &[&Enrollment],
    ) {
        let _ = writeln!(out, "{heading}");
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        for enrollment in members {
            let _ = writeln!(out, "{}", Self::course_line(ctx, enrollment));
        }
    }

    fn course_line(ctx: &TranscriptContext, enrollment: &Enrollment) -> String {
        let code = ctx.course_code(enrollment);
        let title = ctx.course_title(enrollment);
        let mut line = if title.is_empty() {
            format!("{code} ({} credits)", enrollment.credits)
        } else {
            format!("{code} - {title} ({} credits)", enrollment.credits)
        };
        let _ = write!(line, " - {}", enrollment.status.label());
        if let Some(grade) = &enrollment.grade {
            let _ = write!(line, " - Grade: {grade}");
        }
        line
    }

    fn write_level_sections(out: &mut String, ctx: &TranscriptContext) {
        for level in LEVELS {
            let members: Vec<&Enrollment> = ctx
                .enrollments
                .iter()
                .filter(|e| ctx.course_level(e) == Some(level))
                .collect();
            if members.is_empty() {
                continue;
            }
            Self::write_section(out, ctx, &format!("{level} LEVEL COURSES"), &members);
            let _ = writeln!(out);
        }

        let other: Vec<&Enrollment> = ctx
            .enrollments
            .iter()
            .filter(|e| ctx.course_level(e).map_or(true, |l| !LEVELS.contains(&l)))
            .collect();
        if !other.is_empty() {
            Self::write_section(out, ctx, "OTHER COURSES", &other);
            let _ = writeln!(out);
        }
    }

    fn write_semester_sections(out: &mut String, ctx: &TranscriptContext) {
        for group in semester_groups(ctx.enrollments, ctx.options.scale) {
            let heading = group.term.to_string().to_uppercase();
            Self::write_section(out, ctx, &heading, &group.enrollments);
            let _ = writeln!(
                out,
                "Semester Credits: {} | Semester GPA: {:.2}",
                group.stats.total_credits, group.stats.gpa
            );
            let _ = writeln!(out);
        }
    }
}

impl TranscriptRenderer for TextRenderer {
    fn render(&self, ctx: &TranscriptContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::render_text(ctx))
    }
}

/// Render a plain-text transcript.
///
/// Lists every enrollment with its status label; the summary GPA is printed
/// with two decimals. Empty input yields the header and a zeroed summary.
#[must_use]
pub fn render_transcript_text(
    enrollments: &[Enrollment],
    catalog: &Catalog,
    student: &StudentInfo,
    options: &TranscriptOptions,
) -> String {
    let ctx = TranscriptContext::new(student, catalog, enrollments, options);
    TextRenderer::render_text(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseMetadata, EnrollmentStatus, Grade};
    use chrono::{TimeZone, Utc};

    fn catalog() -> Catalog {
        let course = |id: &str, code: &str, title: &str| {
            CourseMetadata::new(id.to_string(), code.to_string(), title.to_string(), 3)
        };
        Catalog::from_courses(
            "AUN".to_string(),
            vec![
                course("cs-101", "CSC 101", "Introduction to Computer Science"),
                course("cs-301", "CSC 301", "Database Systems"),
                course("gen-001", "GEN 001", "Orientation"),
            ],
        )
    }

    fn options(grouping: TranscriptGrouping) -> TranscriptOptions {
        let mut options =
            TranscriptOptions::new(Utc.with_ymd_and_hms(2024, 12, 15, 9, 0, 0).unwrap());
        options.grouping = grouping;
        options
    }

    fn enrollments() -> Vec<Enrollment> {
        vec![
            Enrollment::new("cs-101".to_string(), 3)
                .with_status(EnrollmentStatus::Completed)
                .with_grade(Grade::A)
                .with_term("Fall", "2023"),
            Enrollment::new("cs-301".to_string(), 3)
                .with_status(EnrollmentStatus::InProgress)
                .with_term("Fall", "2024"),
            Enrollment::new("gen-001".to_string(), 1),
        ]
    }

    #[test]
    fn test_header_and_summary() {
        let student = StudentInfo::new("Ada Lovelace".to_string());
        let text = render_transcript_text(
            &enrollments(),
            &catalog(),
            &student,
            &options(TranscriptGrouping::Level),
        );

        assert!(text.starts_with(
            "ACADEMIC TRANSCRIPT\nStudent: Ada Lovelace\nGenerated: 2024-12-15\n\nSUMMARY\n"
        ));
        assert!(text.contains("Total Credits: 7\n"));
        assert!(text.contains("Completed Credits: 3\n"));
        assert!(text.contains("Current GPA: 4.00\n"));
        assert!(text.contains("Progress: 43%\n"));
    }

    #[test]
    fn test_level_sections_skip_empty_levels() {
        let text = render_transcript_text(
            &enrollments(),
            &catalog(),
            &StudentInfo::default(),
            &options(TranscriptGrouping::Level),
        );

        assert!(text.contains(&format!("100 LEVEL COURSES\n{}", "=".repeat(RULE_WIDTH))));
        assert!(text.contains(
            "CSC 101 - Introduction to Computer Science (3 credits) - COMPLETED - Grade: A\n"
        ));
        assert!(text.contains("CSC 301 - Database Systems (3 credits) - IN PROGRESS\n"));
        assert!(!text.contains("200 LEVEL COURSES"));
        assert!(text.contains("OTHER COURSES"));
        assert!(text.contains("Student: Student\n"));
    }

    #[test]
    fn test_semester_sections_newest_first() {
        let text = render_transcript_text(
            &enrollments(),
            &catalog(),
            &StudentInfo::default(),
            &options(TranscriptGrouping::Semester),
        );
        let fall_2024 = text.find("FALL 2024").expect("fall 2024 section");
        let fall_2023 = text.find("FALL 2023").expect("fall 2023 section");
        assert!(fall_2024 < fall_2023);
        assert!(text.contains("Semester Credits: 3 | Semester GPA: 4.00"));
    }

    #[test]
    fn test_empty_input() {
        let text = render_transcript_text(
            &[],
            &Catalog::default(),
            &StudentInfo::default(),
            &options(TranscriptGrouping::Level),
        );
        assert!(text.contains("Current GPA: 0.00\n"));
        assert!(text.contains("Progress: 0%\n"));
        assert!(!text.contains("LEVEL COURSES"));
    }
}
