use std::path::{Path, PathBuf};

use anyhow::Context;
use neo_query::DEFAULT_NUMBER;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "neo.toml";

/// Settings for the `neo` binary. Command-line flags take precedence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeoConfig {
    /// CSV dataset to load.
    pub data_path: PathBuf,
    /// Where `--output csv_file` writes.
    pub output_path: PathBuf,
    /// Result count used when `--number` is not given.
    pub default_number: usize,
}

impl Default for NeoConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/neo_data.csv"),
            output_path: PathBuf::from("output.csv"),
            default_number: DEFAULT_NUMBER,
        }
    }
}

impl NeoConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists, or
    /// fall back to defaults.
    ///
    /// An explicitly named file that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}
