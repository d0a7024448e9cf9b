pub mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{ApiConfig, Config};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/slff/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("slff"))
}

/// Get the default config file path (~/.config/slff/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// With no explicit path, a missing default file yields the built-in defaults.
/// An explicit path that does not exist is an error.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)
        }
        None => {
            let path = get_config_path()?;
            if path.exists() {
                read_config(&path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    parse_config(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = serde_saphyr::from_str(content)?;
    Ok(config)
}
