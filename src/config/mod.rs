//! Runtime configuration
//!
//! Loaded from `config.toml` in the platform config directory (or
//! `$CODEBOX_HISTORY_CONFIG`). Every key is optional:
//!
//! ```toml
//! page_size = 20
//! has_more_policy = "last-slice-full"   # or "remaining-entries"
//! highlight_open = "<mark>"
//! highlight_close = "</mark>"
//! store_path = "/home/alice/.local/share/codebox-history/storage.json"
//! ```
//!
//! `$CODEBOX_HISTORY_DIR` and `$CODEBOX_HISTORY_PAGE_SIZE` override the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{DEFAULT_HIGHLIGHT_CLOSE, DEFAULT_HIGHLIGHT_OPEN};
use crate::pagination::{DEFAULT_PAGE_SIZE, HasMorePolicy, Paginator};
use crate::store::file::STORE_FILENAME;
use crate::utils::environment::{DATA_DIR_ENV, PAGE_SIZE_ENV};
use crate::utils::{get_config_path, get_data_dir};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub page_size: usize,
    pub has_more_policy: HasMorePolicy,
    pub highlight_open: String,
    pub highlight_close: String,
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            has_more_policy: HasMorePolicy::default(),
            highlight_open: DEFAULT_HIGHLIGHT_OPEN.to_string(),
            highlight_close: DEFAULT_HIGHLIGHT_CLOSE.to_string(),
            store_path: None,
        }
    }
}

impl Config {
    /// Config file (if present) with environment overrides applied
    pub fn load() -> Result<Self> {
        let path = get_config_path()?;
        let config = if path.exists() { Self::load_from(&path)? } else { Self::default() };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config");
        config.validated()
    }

    /// Apply environment overrides, reading variables through `lookup`
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            self.store_path = Some(PathBuf::from(dir).join(STORE_FILENAME));
        }

        if let Some(raw) = lookup(PAGE_SIZE_ENV) {
            self.page_size = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer, got {:?}", PAGE_SIZE_ENV, raw))?;
        }

        self.validated()
    }

    fn validated(self) -> Result<Self> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        Ok(self)
    }

    /// Location of the store document
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(get_data_dir()?.join(STORE_FILENAME)),
        }
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::with_policy(self.page_size, self.has_more_policy)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.has_more_policy, HasMorePolicy::LastSliceFull);
        assert_eq!(config.highlight_open, "<mark>");
        assert_eq!(config.highlight_close, "</mark>");
        assert!(config.store_path.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 5\nhas_more_policy = \"remaining-entries\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.page_size, 5);
        assert_eq!(config.has_more_policy, HasMorePolicy::RemainingEntries);
        assert_eq!(config.highlight_open, "<mark>");
        assert_eq!(config.paginator().page_size(), 5);
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "pagesize = 5\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_rejects_zero_page_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 0\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .with_overrides(lookup_from(&[
                ("CODEBOX_HISTORY_DIR", "/tmp/codebox"),
                ("CODEBOX_HISTORY_PAGE_SIZE", " 7 "),
            ]))
            .unwrap();

        assert_eq!(config.page_size, 7);
        assert_eq!(config.store_path().unwrap(), PathBuf::from("/tmp/codebox/storage.json"));
    }

    #[test]
    fn test_env_invalid_page_size() {
        let err = Config::default()
            .with_overrides(lookup_from(&[("CODEBOX_HISTORY_PAGE_SIZE", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("CODEBOX_HISTORY_PAGE_SIZE"));
    }

    #[test]
    fn test_explicit_store_path() {
        let config =
            Config { store_path: Some(PathBuf::from("/srv/history.json")), ..Config::default() };
        assert_eq!(config.store_path().unwrap(), PathBuf::from("/srv/history.json"));
    }
}
