//! Command-line interface entry point for `academic-progress`

mod args;
mod commands;

use academic_progress::config::Config;
use academic_progress::logger::{self, Level, LoggerSettings};
use args::{Cli, Command};
use clap::Parser;
use commands::transcript::TranscriptRequest;
use commands::transition::TransitionRequest;
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // The config command edits the stored file, so it gets the config
    // without CLI overrides applied
    let stored = Config::load();
    let defaults = Config::from_defaults();
    let mut config = stored.clone();
    config.apply_overrides(&args.to_config_overrides());

    let mut level = args
        .log_level
        .map(Into::into)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);
    if args.debug_flag {
        level = Level::Debug;
    }

    let verbose = args.verbose || config.logging.verbose;

    let config_log_path = if config.logging.file.is_empty() {
        None
    } else {
        Some(PathBuf::from(&config.logging.file))
    };
    let settings = LoggerSettings {
        level,
        verbose,
        file: args.log_file.clone().or(config_log_path),
    };
    if let Err(e) = logger::init(&settings) {
        eprintln!("✗ Failed to initialize logging: {e}");
    } else if let Some(path) = settings.file.as_ref() {
        if verbose {
            eprintln!("✓ File logging initialized at: {}", path.display());
        }
        tracing::info!("File logging initialized at: {}", path.display());
    }

    match args.command {
        Command::Config { subcommand } => {
            let mut stored = stored;
            commands::config::run(subcommand, &mut stored, &defaults);
        }
        Command::Stats {
            roster,
            catalog,
            scale,
        } => {
            let scale = scale.map_or_else(|| config.grade_scale(), Into::into);
            commands::stats::run(&roster, &catalog, scale, verbose);
        }
        Command::Transcript {
            roster,
            catalog,
            format,
            group_by,
            scale,
            output,
            print,
        } => {
            let request = TranscriptRequest {
                roster: &roster,
                catalog: &catalog,
                format: format.into(),
                grouping: group_by.map_or_else(|| config.transcript_grouping(), Into::into),
                scale: scale.map_or_else(|| config.grade_scale(), Into::into),
                output: output.as_deref(),
                print,
            };
            commands::transcript::run(&request, &config, verbose);
        }
        Command::Transition {
            roster,
            course,
            status,
            grade,
            semester,
            year,
            progress,
            catalog,
            write,
        } => {
            let request = TransitionRequest {
                roster: &roster,
                course: &course,
                status: status.into(),
                grade: grade.as_deref(),
                semester: semester.as_deref(),
                year: year.as_deref(),
                progress,
                catalog: catalog.as_deref(),
                write,
            };
            commands::transition::run(&request);
        }
        Command::Courses { roster, catalog } => {
            commands::courses::run(&roster, &catalog, verbose);
        }
        Command::Import { input, output } => {
            commands::import::run(&input, &output);
        }
    }
}
