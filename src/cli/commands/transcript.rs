//! Transcript command handler
//!
//! Renders a roster in one of the transcript formats and writes it to a
//! file (by default under the configured reports directory) or stdout.

use super::load_inputs;
use academic_progress::config::Config;
use academic_progress::core::models::GradeScale;
use academic_progress::core::report::{
    ReportFormat, TranscriptContext, TranscriptGrouping, TranscriptOptions,
};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Options collected from the command line
pub struct TranscriptRequest<'a> {
    /// Roster file
    pub roster: &'a Path,
    /// Catalog file
    pub catalog: &'a Path,
    /// Output format
    pub format: ReportFormat,
    /// Text section grouping
    pub grouping: TranscriptGrouping,
    /// Grade scale
    pub scale: GradeScale,
    /// Explicit output path
    pub output: Option<&'a Path>,
    /// Print instead of writing
    pub print: bool,
}

/// Run the transcript command
pub fn run(request: &TranscriptRequest, config: &Config, verbose: bool) {
    if let Err(err) = generate(request, config, verbose) {
        tracing::error!(
            "Transcript generation failed for {}: {err}",
            request.roster.display()
        );
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn generate(request: &TranscriptRequest, config: &Config, verbose: bool) -> Result<(), String> {
    let (roster, catalog) = load_inputs(request.roster, request.catalog, verbose)?;

    let mut options = TranscriptOptions::new(Utc::now());
    options.scale = request.scale;
    options.grouping = request.grouping;
    options.institution.clone_from(&config.transcript.institution);

    let ctx = TranscriptContext::new(&roster.student, &catalog, &roster.enrollments, &options);
    let renderer = request.format.renderer();

    if request.print {
        let content = renderer
            .render(&ctx)
            .map_err(|e| format!("✗ Failed to render {} transcript: {e}", request.format))?;
        print!("{content}");
        return Ok(());
    }

    let output_path = match request.output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(request.roster, request.format, config)?,
    };

    renderer
        .generate(&ctx, &output_path)
        .map_err(|e| format!("✗ Failed to write {}: {e}", output_path.display()))?;

    println!("✓ Transcript generated: {}", output_path.display());
    if verbose {
        println!(
            "  {} courses, {} credits earned, GPA {:.2}",
            ctx.stats.total_courses, ctx.progress.completed_credits, ctx.progress.gpa
        );
    }
    Ok(())
}

/// `<reports_dir>/<roster stem>_transcript.<ext>`, creating the directory
fn default_output_path(
    roster: &Path,
    format: ReportFormat,
    config: &Config,
) -> Result<PathBuf, String> {
    let reports_dir = PathBuf::from(&config.paths.reports_dir);
    std::fs::create_dir_all(&reports_dir).map_err(|e| {
        format!(
            "✗ Failed to create reports directory {}: {e}",
            reports_dir.display()
        )
    })?;

    let stem = roster
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("roster");
    Ok(reports_dir.join(format!("{stem}_transcript.{}", format.extension())))
}
