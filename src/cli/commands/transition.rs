//! Transition command handler

use academic_progress::core::lifecycle::{apply_transition, StatusChange};
use academic_progress::core::models::{EnrollmentStatus, Grade};
use academic_progress::core::requirements::missing_prerequisites;
use academic_progress::core::roster::{load_catalog, load_roster, save_roster};
use chrono::Utc;
use std::path::Path;

/// Requested change as parsed from the command line
pub struct TransitionRequest<'a> {
    /// Roster file
    pub roster: &'a Path,
    /// Course id, or a catalog course code when a catalog is given
    pub course: &'a str,
    /// Target status
    pub status: EnrollmentStatus,
    /// Grade text
    pub grade: Option<&'a str>,
    /// Semester
    pub semester: Option<&'a str>,
    /// Year
    pub year: Option<&'a str>,
    /// Progress percentage
    pub progress: Option<u32>,
    /// Optional catalog for prerequisite warnings
    pub catalog: Option<&'a Path>,
    /// Persist the result
    pub write: bool,
}

/// Run the transition command
pub fn run(request: &TransitionRequest) {
    if let Err(err) = transition(request) {
        tracing::error!("Transition of {} failed: {err}", request.course);
        eprintln!("✗ {err}");
        std::process::exit(1);
    }
}

fn transition(request: &TransitionRequest) -> Result<(), String> {
    let mut roster = load_roster(request.roster).map_err(|e| e.to_string())?;
    let catalog = request
        .catalog
        .map(load_catalog)
        .transpose()
        .map_err(|e| e.to_string())?;

    let course_id = catalog
        .as_ref()
        .and_then(|c| c.find_by_code(request.course))
        .map_or(request.course, |course| course.id.as_str());
    let current = roster
        .find(course_id)
        .cloned()
        .ok_or_else(|| format!("No enrollment for course '{}' in roster", request.course))?;

    let change = StatusChange {
        target: request.status,
        grade: request.grade.and_then(Grade::parse_input),
        semester: request.semester.map(str::to_string),
        year: request.year.map(str::to_string),
        progress: request.progress,
    };

    if let Some(grade) = change.grade.as_ref().filter(|g| g.is_unrecognized()) {
        eprintln!("⚠️  Grade '{grade}' is not a recognized letter grade; counted as 0.0 points");
    }

    let outcome = apply_transition(&current, &change).map_err(|e| e.to_string())?;

    if let Some(catalog) = &catalog {
        let missing = missing_prerequisites(course_id, &roster.enrollments, catalog);
        if !missing.is_empty() && request.status != EnrollmentStatus::Dropped {
            eprintln!("⚠️  Prerequisites not completed: {}", missing.join(", "));
        }
    }

    let updated = outcome.stamped(Utc::now());
    println!(
        "✓ {}: {} -> {} (progress {}%{})",
        updated.course_id,
        current.status,
        updated.status,
        updated.progress,
        updated
            .grade
            .as_ref()
            .map_or_else(String::new, |g| format!(", grade {g}"))
    );

    roster.upsert(updated);
    if request.write {
        save_roster(&roster, request.roster).map_err(|e| e.to_string())?;
        println!("✓ Roster updated: {}", request.roster.display());
    } else {
        println!("  (dry run; pass --write to save)");
    }
    Ok(())
}
