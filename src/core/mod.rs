//! Core module: models, aggregation, lifecycle rules and reports

pub mod config;
pub mod gpa;
pub mod grouping;
pub mod lifecycle;
pub mod models;
pub mod report;
pub mod requirements;
pub mod roster;

/// Returns the current version of the `academic-progress` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
