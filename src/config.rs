//! Configuration file, `~/.config/old-core-files/config.toml` by default.
//!
//! Every key is optional; command-line flags override whatever is set here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OcfError;
use crate::known::SourceKind;
use crate::report::OutputFormat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Installation root. `~/` is expanded.
    pub root: Option<String>,
    #[serde(default)]
    pub source: SourceKind,
    /// List file used when `source = "file"`.
    pub list: Option<PathBuf>,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    pub max_paths: Option<usize>,
    #[serde(default = "default_time_budget_secs")]
    pub time_budget_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_paths: None,
            time_budget_secs: default_time_budget_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: default_color(),
        }
    }
}

fn default_time_budget_secs() -> u64 {
    300
}

fn default_color() -> bool {
    true
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("old-core-files").join("config.toml"))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, OcfError> {
        let contents = fs::read_to_string(path).map_err(|e| OcfError::io(path, e))?;
        toml::from_str(&contents).map_err(|source| OcfError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An explicit path must exist. Without one, the default location is
    /// used if present, otherwise built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, OcfError> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!("Loading configuration from {}", path.display());
                Self::load_from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}
