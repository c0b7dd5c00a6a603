//! Store configuration and factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use examtrack_core::traits::DataStore;

use crate::json::JsonFileStore;
use crate::memory::MemoryStore;

/// Which store backs the exam and field data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    Json {
        #[serde(default = "default_data_path")]
        path: String,
    },
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Json {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> String {
    "./exam-data.json".to_string()
}

/// Top-level examtrack configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamtrackConfig {
    /// Where exam data comes from.
    #[serde(default)]
    pub store: StoreConfig,
    /// Output format used when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Directory saved reports go to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_format() -> String {
    "text".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./examtrack-results")
}

impl Default for ExamtrackConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            default_format: default_format(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Expands in one left-to-right pass: substituted values are never rescanned.
/// References to unset variables are kept as written.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let reference = &rest[start..start + len + 1];
        let var_name = &reference[2..reference.len() - 1];
        match std::env::var(var_name) {
            Ok(value) => result.push_str(&value),
            Err(_) => {
                tracing::warn!(var = var_name, "environment variable not set, keeping {reference}");
                result.push_str(reference);
            }
        }
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `examtrack.toml` in the current directory
/// 2. `~/.config/examtrack/config.toml`
///
/// Environment variable override: `EXAMTRACK_DATA` (path to a JSON data file).
pub fn load_config() -> Result<ExamtrackConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamtrackConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examtrack.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ExamtrackConfig::default(),
    };

    if let Ok(data) = std::env::var("EXAMTRACK_DATA") {
        tracing::debug!(path = %data, "using data file from EXAMTRACK_DATA");
        config.store = StoreConfig::Json { path: data };
    }

    if let StoreConfig::Json { path } = &mut config.store {
        *path = resolve_env_vars(path);
    }

    Ok(config)
}

fn parse_config_str(content: &str) -> Result<ExamtrackConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examtrack"))
}

/// Create a store instance from its configuration.
pub fn create_store(config: &StoreConfig) -> Arc<dyn DataStore> {
    match config {
        StoreConfig::Json { path } => Arc::new(JsonFileStore::new(path)),
        StoreConfig::Memory => Arc::new(MemoryStore::default()),
    }
}
