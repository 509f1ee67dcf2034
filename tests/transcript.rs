//! Transcript rendering against the bundled sample roster and catalog

use academic_progress::core::models::{Catalog, GradeScale};
use academic_progress::core::report::{
    import_export_data, render_transcript_table, ReportFormat, TranscriptContext,
    TranscriptGrouping, TranscriptOptions,
};
use academic_progress::core::roster::{load_catalog, load_roster, Roster};
use chrono::{TimeZone, Utc};
use std::path::PathBuf;
use tempfile::TempDir;

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

fn inputs() -> (Roster, Catalog) {
    let roster = load_roster(sample("roster.json")).expect("sample roster loads");
    let catalog = load_catalog(sample("catalog.json")).expect("sample catalog loads");
    (roster, catalog)
}

fn options(grouping: TranscriptGrouping) -> TranscriptOptions {
    let generated = Utc
        .with_ymd_and_hms(2024, 12, 15, 9, 30, 0)
        .single()
        .expect("valid date");
    let mut options = TranscriptOptions::new(generated);
    options.scale = GradeScale::Full;
    options.grouping = grouping;
    options.institution = "American University of Nigeria".to_string();
    options
}

fn render(format: ReportFormat, grouping: TranscriptGrouping) -> String {
    let (roster, catalog) = inputs();
    let options = options(grouping);
    let ctx = TranscriptContext::new(&roster.student, &catalog, &roster.enrollments, &options);
    format.renderer().render(&ctx).expect("render succeeds")
}

#[test]
fn test_sample_inputs_load() {
    let (roster, catalog) = inputs();
    assert_eq!(roster.student.name, "Amina Bello");
    assert_eq!(roster.enrollments.len(), 8);
    assert_eq!(catalog.len(), 14);
    assert!(roster.warnings(&catalog).is_empty());
}

#[test]
fn test_table_has_one_row_per_completed_course() {
    let (roster, catalog) = inputs();
    let completed = roster.enrollments.iter().filter(|e| e.is_completed()).count();
    let rows = render_transcript_table(&roster.enrollments, &catalog);
    assert_eq!(rows.len(), completed);
    assert_eq!(rows[0].code, "CSC 101");
    assert_eq!(rows[0].progress, "100%");
}

#[test]
fn test_text_by_level() {
    let text = render(ReportFormat::Text, TranscriptGrouping::Level);
    assert!(text.starts_with("ACADEMIC TRANSCRIPT\n"));
    assert!(text.contains("Student: Amina Bello"));
    assert!(text.contains("Generated: 2024-12-15"));
    assert!(text.contains("Total Credits: 22"));
    assert!(text.contains("Completed Credits: 14"));
    assert!(text.contains("100 LEVEL COURSES"));
    assert!(text.contains("200 LEVEL COURSES"));
    assert!(text.contains("400 LEVEL COURSES"));
    assert!(!text.contains("300 LEVEL COURSES"));
    assert!(text.contains(
        "CSC 101 - Introduction to Computer Science (3 credits) - COMPLETED - Grade: A"
    ));
}

#[test]
fn test_text_by_semester_orders_newest_first() {
    let text = render(ReportFormat::Text, TranscriptGrouping::Semester);
    let fall_2024 = text.find("FALL 2024").expect("fall 2024 section");
    let spring_2024 = text.find("SPRING 2024").expect("spring 2024 section");
    let fall_2023 = text.find("FALL 2023").expect("fall 2023 section");
    assert!(fall_2024 < spring_2024);
    assert!(spring_2024 < fall_2023);
    assert!(text.contains("Semester GPA:"));
}

#[test]
fn test_csv_lists_every_enrollment() {
    let csv = render(ReportFormat::Csv, TranscriptGrouping::Level);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 9);
    assert!(lines[0].starts_with("\"Course Code\",\"Course Title\""));
    assert!(csv.contains("\"dropped\""));
    assert!(csv.contains("\"60%\""));
}

#[test]
fn test_html_contains_only_graded_coursework() {
    let html = render(ReportFormat::Html, TranscriptGrouping::Level);
    assert!(html.contains("AMERICAN UNIVERSITY OF NIGERIA"));
    assert!(html.contains("Amina Bello"));
    assert!(html.contains("CSC 101"));
    assert!(!html.contains("CSC 202"));
    assert!(!html.contains("CSC 402"));
    let fall_2024 = html.find("Fall 2024").expect("fall 2024");
    let fall_2023 = html.find("Fall 2023").expect("fall 2023");
    assert!(fall_2024 < fall_2023);
}

#[test]
fn test_json_export_round_trips_through_import() {
    let json = render(ReportFormat::Json, TranscriptGrouping::Level);
    assert!(json.contains("\"version\": \"1.0.0\""));
    assert!(json.contains("\"exportDate\": \"2024-12-15T09:30:00.000Z\""));

    let (original, _) = inputs();
    let imported = import_export_data(&json).expect("export imports");
    assert_eq!(imported.student, original.student);
    assert_eq!(imported.enrollments, original.enrollments);
}

#[test]
fn test_generate_writes_file() {
    let dir = TempDir::new().expect("temp dir");
    let (roster, catalog) = inputs();
    let options = options(TranscriptGrouping::Level);
    let ctx = TranscriptContext::new(&roster.student, &catalog, &roster.enrollments, &options);

    for format in [
        ReportFormat::Text,
        ReportFormat::Html,
        ReportFormat::Csv,
        ReportFormat::Json,
    ] {
        let path = dir.path().join(format!("transcript.{}", format.extension()));
        format
            .renderer()
            .generate(&ctx, &path)
            .expect("generate succeeds");
        let written = std::fs::read_to_string(&path).expect("output exists");
        assert_eq!(written, format.renderer().render(&ctx).expect("render succeeds"));
    }
}
