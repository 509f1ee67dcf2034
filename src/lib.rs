//! Academic progress engine
//!
//! Computes GPA, credit totals, completion rates and grouped statistics from
//! a student's enrollment records, validates enrollment status changes, and
//! renders transcripts and data exports.

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::get_version;
