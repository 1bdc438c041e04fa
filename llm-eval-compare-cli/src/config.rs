//! CLI settings management

use anyhow::{Context as _, Result};
use config::{Config as ConfigLoader, Environment, File};
use directories::ProjectDirs;
use llm_eval_compare_view::DEFAULT_MAX_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Prefix for environment overrides, e.g. `LLM_EVAL_COMPARE_COLOR=false`
pub const ENV_PREFIX: &str = "LLM_EVAL_COMPARE";

const SETTINGS_FILE: &str = "llm-eval-compare.toml";

/// Global settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Default output format
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Characters kept in content previews before the ellipsis
    #[serde(default = "default_preview_max_length")]
    pub preview_max_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            color: true,
            preview_max_length: default_preview_max_length(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_preview_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

impl Settings {
    /// Load settings from the user config directory, an explicit file and the environment,
    /// later sources overriding earlier ones.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigLoader::builder();

        if let Some(path) = Self::settings_path() {
            builder = builder.add_source(File::from(path).required(false));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Settings file not found: {}", path.display());
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to load settings")?;

        settings
            .try_deserialize()
            .context("Failed to parse settings")
    }

    /// Location of the per-user settings file
    pub fn settings_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "llm-eval-compare", "llm-eval-compare")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output_format, OutputFormat::Table);
        assert!(settings.color);
        assert_eq!(settings.preview_max_length, 30);
    }

    #[test]
    fn test_settings_from_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "output_format = \"json\"\npreview_max_length = 12").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert_eq!(settings.preview_max_length, 12);
        assert!(settings.color);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Settings::load(Some(&missing)).is_err());
    }
}
