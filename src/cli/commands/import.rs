//! Import command handler

use academic_progress::core::report::import_export_data;
use academic_progress::core::roster::save_roster;
use std::path::Path;

/// Validate a JSON export and write it out as a roster
pub fn run(input: &Path, output: &Path) {
    let result = std::fs::read_to_string(input)
        .map_err(|e| format!("Failed to read {}: {e}", input.display()))
        .and_then(|json| import_export_data(&json).map_err(|e| e.to_string()))
        .and_then(|roster| {
            save_roster(&roster, output)
                .map(|()| roster.enrollments.len())
                .map_err(|e| e.to_string())
        });

    match result {
        Ok(count) => println!("✓ Imported {count} enrollments into {}", output.display()),
        Err(e) => {
            tracing::error!("Import of {} failed: {e}", input.display());
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}
