//! Configuration module for `academic-progress`

use crate::core::models::GradeScale;
use crate::core::report::TranscriptGrouping;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the configuration directory
const DIR_VARIABLE: &str = "$ACADEMIC_PROGRESS";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for generated transcripts and exports
    #[serde(default)]
    pub reports_dir: String,
}

/// Transcript rendering defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Grade scale name (`full` or `compact`)
    #[serde(default)]
    pub scale: String,
    /// Section grouping for text transcripts (`level` or `semester`)
    #[serde(default)]
    pub grouping: String,
    /// Institution printed on transcript documents
    #[serde(default)]
    pub institution: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Transcript settings
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override grade scale
    pub scale: Option<String>,
    /// Override institution name
    pub institution: Option<String>,
}

/// Copy `default` into `field` when `field` is empty and `default` is not
fn fill_empty(field: &mut String, default: &str) -> bool {
    if field.is_empty() && !default.is_empty() {
        default.clone_into(field);
        return true;
    }
    false
}

impl Config {
    /// Get the `$ACADEMIC_PROGRESS` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/academic-progress`
    /// - macOS: `~/Library/Application Support/academic-progress`
    /// - Windows: `%APPDATA%\academic-progress`
    #[must_use]
    pub fn get_app_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("academic-progress")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are
    /// updated, so upgrading picks up new settings without clobbering user
    /// values.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let updates = [
            fill_empty(&mut self.logging.level, &defaults.logging.level),
            fill_empty(&mut self.logging.file, &defaults.logging.file),
            fill_empty(&mut self.paths.reports_dir, &defaults.paths.reports_dir),
            fill_empty(&mut self.transcript.scale, &defaults.transcript.scale),
            fill_empty(&mut self.transcript.grouping, &defaults.transcript.grouping),
            fill_empty(
                &mut self.transcript.institution,
                &defaults.transcript.institution,
            ),
        ];
        updates.contains(&true)
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; nothing is written to disk.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
        if let Some(scale) = &overrides.scale {
            self.transcript.scale.clone_from(scale);
        }
        if let Some(institution) = &overrides.institution {
            self.transcript.institution.clone_from(institution);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds.
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_app_dir().join(CONFIG_FILE_NAME)
    }

    /// Replace `$ACADEMIC_PROGRESS` with the configuration directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let app_dir = Self::get_app_dir();
            value.replace(DIR_VARIABLE, app_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults. `$ACADEMIC_PROGRESS` is
    /// expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from the compiled-in defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).unwrap_or_else(|e| {
            tracing::error!("Compiled-in default configuration is invalid: {e}");
            Self::default()
        })
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file is merged with defaults and re-saved when new fields
    /// appear. On first run the directory and file are created. Any read or
    /// parse failure falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Err(e) = defaults.save() {
                tracing::warn!("Could not write default config: {e}");
            }
            return defaults;
        }

        match fs::read_to_string(&config_file)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::from_toml(&content).map_err(|e| e.to_string()))
        {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable config {}: {e}",
                    config_file.display()
                );
                defaults
            }
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if serialization fails, the directory cannot be
    /// created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `reports_dir`, `scale`,
    /// `grouping`, `institution`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "scale" => Some(self.transcript.scale.clone()),
            "grouping" => Some(self.transcript.grouping.clone()),
            "institution" => Some(self.transcript.institution.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// `verbose` must be a boolean, `scale` a known grade scale and
    /// `grouping` a known transcript grouping. Call [`save()`](Config::save)
    /// to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "scale" => {
                let scale: GradeScale = value.parse()?;
                self.transcript.scale = scale.to_string();
            }
            "grouping" => {
                let grouping: TranscriptGrouping = value.parse()?;
                self.transcript.grouping = grouping.to_string();
            }
            "institution" => self.transcript.institution = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset a single key to its value in `defaults`
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "scale" => self.transcript.scale.clone_from(&defaults.transcript.scale),
            "grouping" => self
                .transcript
                .grouping
                .clone_from(&defaults.transcript.grouping),
            "institution" => self
                .transcript
                .institution
                .clone_from(&defaults.transcript.institution),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the configuration file; the next [`load()`](Config::load)
    /// recreates it from defaults
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Configured grade scale, falling back to `full` when unset or invalid
    #[must_use]
    pub fn grade_scale(&self) -> GradeScale {
        self.transcript.scale.parse().unwrap_or_else(|e| {
            if !self.transcript.scale.is_empty() {
                tracing::warn!("{e}; using the full scale");
            }
            GradeScale::default()
        })
    }

    /// Configured transcript grouping, falling back to `level`
    #[must_use]
    pub fn transcript_grouping(&self) -> TranscriptGrouping {
        self.transcript.grouping.parse().unwrap_or_default()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[transcript]")?;
        writeln!(f, "  scale = \"{}\"", self.transcript.scale)?;
        writeln!(f, "  grouping = \"{}\"", self.transcript.grouping)?;
        writeln!(f, "  institution = \"{}\"", self.transcript.institution)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let config = Config::from_defaults();
        assert!(!config.logging.level.is_empty());
        assert_eq!(config.transcript.scale, "full");
        assert_eq!(config.transcript.grouping, "level");
        assert!(!config.transcript.institution.is_empty());
    }

    #[test]
    fn test_set_validates_scale_and_grouping() {
        let mut config = Config::from_defaults();
        assert!(config.set("scale", "compact").is_ok());
        assert_eq!(config.grade_scale(), GradeScale::Compact);
        assert!(config.set("scale", "percent").is_err());
        assert_eq!(config.transcript.scale, "compact");

        assert!(config.set("grouping", "semester").is_ok());
        assert_eq!(config.transcript_grouping(), TranscriptGrouping::Semester);
        assert!(config.set("grouping", "weekly").is_err());
    }

    #[test]
    fn test_invalid_scale_falls_back_to_full() {
        let mut config = Config::default();
        config.transcript.scale = "percent".to_string();
        assert_eq!(config.grade_scale(), GradeScale::Full);
    }

    #[test]
    fn test_expand_variables() {
        let expanded = Config::expand_variables("$ACADEMIC_PROGRESS/reports");
        assert!(!expanded.contains(DIR_VARIABLE));
        assert!(expanded.ends_with("reports"));
        assert_eq!(Config::expand_variables("/tmp/out"), "/tmp/out");
    }

    #[test]
    fn test_merge_defaults_only_fills_empty() {
        let defaults = Config::from_defaults();
        let mut config = Config::default();
        config.transcript.institution = "Elsewhere".to_string();

        assert!(config.merge_defaults(&defaults));
        assert_eq!(config.transcript.institution, "Elsewhere");
        assert_eq!(config.transcript.scale, defaults.transcript.scale);
        assert!(!config.merge_defaults(&defaults));
    }
}
