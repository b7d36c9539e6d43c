//! Settings for the `roster` binary, layered file → environment → flags.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// File name used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "student_data.csv";

/// Shape of the optional TOML config file (and `ROSTER_*` variables).
#[derive(Debug, Deserialize)]
pub struct Settings {
  /// CSV file holding the roster table.
  pub data_file: PathBuf,
}

impl Settings {
  /// Read `config_path` (if it exists), then `ROSTER_*` environment
  /// variables; `data_file` overrides both when given.
  pub fn load(config_path: &Path, data_file: Option<PathBuf>) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("data_file", DEFAULT_DATA_FILE)
      .context("setting defaults")?
      .add_source(config::File::from(config_path).required(false))
      .add_source(config::Environment::with_prefix("ROSTER"))
      .build()
      .with_context(|| format!("failed to read config file {}", config_path.display()))?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;
    if let Some(path) = data_file {
      settings.data_file = path;
    }
    Ok(settings)
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn missing_config_file_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load(&dir.path().join("absent.toml"), None).unwrap();
    assert_eq!(settings.data_file, PathBuf::from(DEFAULT_DATA_FILE));
  }

  #[test]
  fn config_file_then_flag() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("roster.toml");
    fs::write(&config_path, "data_file = \"class-7b.csv\"\n").unwrap();

    let settings = Settings::load(&config_path, None).unwrap();
    assert_eq!(settings.data_file, PathBuf::from("class-7b.csv"));

    let settings = Settings::load(&config_path, Some("override.csv".into())).unwrap();
    assert_eq!(settings.data_file, PathBuf::from("override.csv"));
  }
}
