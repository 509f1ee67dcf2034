//! CLI command handlers for `academic-progress`.
//!
//! Each command is implemented in its own submodule. Handlers print `✓`/`✗`
//! status lines and log failures through `tracing`.

pub mod config;
pub mod courses;
pub mod import;
pub mod stats;
pub mod transcript;
pub mod transition;

use academic_progress::core::models::Catalog;
use academic_progress::core::roster::{load_catalog, load_roster, Roster};
use std::path::Path;

/// Load a roster and catalog, filling zero credits from the catalog and
/// printing roster warnings when `verbose` is set
pub fn load_inputs(
    roster_path: &Path,
    catalog_path: &Path,
    verbose: bool,
) -> Result<(Roster, Catalog), String> {
    let catalog = load_catalog(catalog_path).map_err(|e| {
        tracing::error!("{e}");
        format!("✗ {e}")
    })?;
    let mut roster = load_roster(roster_path).map_err(|e| {
        tracing::error!("{e}");
        format!("✗ {e}")
    })?;

    let filled = roster.fill_missing_credits(&catalog);
    if filled > 0 {
        tracing::info!("Filled credits for {filled} enrollments from the catalog");
    }

    for warning in roster.warnings(&catalog) {
        tracing::warn!("{warning}");
        if verbose {
            eprintln!("⚠️  {warning}");
        }
    }

    Ok((roster, catalog))
}
