//! Stats command handler
//!
//! Prints overall progress, status counts, level and category breakdowns
//! and degree requirement progress for one roster.

use super::load_inputs;
use academic_progress::core::gpa::{
    academic_progress, academic_standing, dashboard_stats, degree_progress,
    REQUIRED_DEGREE_CREDITS,
};
use academic_progress::core::grouping::{category_stats, level_stats, GroupStats};
use academic_progress::core::models::GradeScale;
use academic_progress::core::requirements::{default_requirements, requirement_progress};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;

/// Run the stats command
pub fn run(roster_path: &Path, catalog_path: &Path, scale: GradeScale, verbose: bool) {
    let (roster, catalog) = match load_inputs(roster_path, catalog_path, verbose) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let enrollments = &roster.enrollments;

    let progress = academic_progress(enrollments, scale);
    let counts = dashboard_stats(enrollments, scale);

    println!("\n=== {} ===", roster.student.display_name());
    println!("Grade scale: {scale}");
    println!("GPA: {:.2}", progress.gpa);
    println!(
        "Credits: {} earned of {} ({}%)",
        progress.completed_credits, progress.total_credits, progress.completion_percentage
    );
    println!(
        "Courses: {} total | {} completed | {} in progress | {} not started | {} dropped",
        counts.total_courses,
        counts.completed_courses,
        counts.in_progress_courses,
        counts.not_started_courses,
        counts.dropped_courses
    );
    println!("Completion rate: {}%", counts.completion_rate);
    println!(
        "Degree progress: {}% of {REQUIRED_DEGREE_CREDITS} credits",
        degree_progress(progress.completed_credits)
    );
    println!("Standing: {}", academic_standing(progress.gpa));

    print_groups("By Level", &level_stats(enrollments, &catalog, scale));
    print_groups("By Category", &category_stats(enrollments, &catalog, scale));

    println!("\n=== Requirements ===");
    for item in requirement_progress(&default_requirements(), enrollments, &catalog) {
        let mark = if item.is_satisfied() { "✓" } else { " " };
        println!(
            "{mark} {:<28} {:>2}/{:<2} ({}%)",
            item.requirement.title, item.completed, item.requirement.required, item.percent
        );
    }
}

fn print_groups<K: Display>(title: &str, groups: &BTreeMap<K, GroupStats>) {
    println!("\n=== {title} ===");
    println!(
        "{:<10} {:>7} {:>9} {:>8} {:>6}",
        "Group", "Courses", "Completed", "Credits", "GPA"
    );
    for (key, stats) in groups {
        println!(
            "{:<10} {:>7} {:>9} {:>8} {:>6.2}",
            key.to_string(),
            stats.total_count,
            stats.completed_count,
            format!("{}/{}", stats.earned_credits, stats.total_credits),
            stats.gpa
        );
    }
}
