//! Configuration file discovery and loading.

use crate::config::schema::ShipgateConfig;
use crate::config::validator::validate;
use crate::error::{Result, ShipgateError};
use std::fs;
use std::path::{Path, PathBuf};

/// Config locations relative to the project root, in lookup order.
pub const CONFIG_CANDIDATES: [&str; 2] = ["shipgate.yml", ".github/shipgate.yml"];

/// Find the config file under `project_root`.
///
/// Returns the first existing entry of [`CONFIG_CANDIDATES`].
pub fn discover_config(project_root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| project_root.join(candidate))
        .find(|path| path.is_file())
}

/// Load a single config file and parse it into ShipgateConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ShipgateConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShipgateError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ShipgateError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into ShipgateConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<ShipgateConfig> {
    if content.trim().is_empty() {
        return Ok(ShipgateConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ShipgateError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and validate config with optional path override.
///
/// If `config_override` is provided, that file must exist. Otherwise the
/// project root is searched, and built-in defaults apply when nothing is
/// found.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ShipgateConfig> {
    let config = match config_override {
        Some(path) => load_config_file(path)?,
        None => match discover_config(project_root) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                load_config_file(&path)?
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                ShipgateConfig::default()
            }
        },
    };

    validate(&config)?;
    Ok(config)
}
