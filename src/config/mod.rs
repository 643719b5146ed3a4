mod schema;
mod validation;

pub use schema::{Config, RankingConfig};
pub use validation::validate_ranking;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/fund-rank/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("fund-rank"))
}

/// Get the default config file path (~/.config/fund-rank/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/fund-rank/config.yaml) and falls back to defaults when that
///   file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(explicit) => {
            if !explicit.exists() {
                anyhow::bail!("Config file not found at {}", explicit.display());
            }
            read_config(&explicit)
        }
        None => match get_config_path() {
            Some(default_path) if default_path.exists() => read_config(&default_path),
            _ => {
                tracing::debug!("no config file, using defaults");
                Ok(Config::default())
            }
        },
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let mut config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    // A relative snapshot path is relative to the config file, not the cwd
    if let (Some(funds), Some(dir)) = (config.funds.as_mut(), path.parent()) {
        if funds.is_relative() {
            *funds = dir.join(&*funds);
        }
    }

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
