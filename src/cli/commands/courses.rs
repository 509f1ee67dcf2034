//! Courses command handler: what can the student enroll in next

use super::load_inputs;
use academic_progress::core::requirements::{available_courses, missing_prerequisites};
use std::path::Path;

/// Run the courses command
pub fn run(roster_path: &Path, catalog_path: &Path, verbose: bool) {
    let (roster, catalog) = match load_inputs(roster_path, catalog_path, verbose) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let available = available_courses(&catalog, &roster.enrollments);
    if available.is_empty() {
        println!("✓ Every catalog course is already on the roster");
        return;
    }

    println!("\n=== Available Courses ({}) ===", available.len());
    for course in available {
        let missing = missing_prerequisites(&course.id, &roster.enrollments, &catalog);
        if missing.is_empty() {
            println!(
                "✓ {:<8} {} ({} credits)",
                course.code, course.title, course.credits
            );
        } else {
            println!(
                "✗ {:<8} {} ({} credits) - needs {}",
                course.code,
                course.title,
                course.credits,
                missing.join(", ")
            );
        }
    }
}
