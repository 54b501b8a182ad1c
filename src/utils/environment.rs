use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application directory name under the platform data/config directories
pub const APP_DIR_NAME: &str = "codebox-history";

/// Overrides the data directory holding the store document
pub const DATA_DIR_ENV: &str = "CODEBOX_HISTORY_DIR";
/// Overrides the configuration file path
pub const CONFIG_PATH_ENV: &str = "CODEBOX_HISTORY_CONFIG";
/// Overrides the configured page size
pub const PAGE_SIZE_ENV: &str = "CODEBOX_HISTORY_PAGE_SIZE";

/// Data directory: `$CODEBOX_HISTORY_DIR`, else the platform data dir
/// (`~/.local/share/codebox-history` on Linux)
pub fn get_data_dir() -> Result<PathBuf> {
    data_dir_from(env::var_os(DATA_DIR_ENV).map(PathBuf::from), dirs::data_dir())
}

/// Config file: `$CODEBOX_HISTORY_CONFIG`, else `config.toml` in the platform config dir
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(base.join(APP_DIR_NAME).join("config.toml"))
}

fn data_dir_from(explicit: Option<PathBuf>, platform: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    let base = platform.context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}
