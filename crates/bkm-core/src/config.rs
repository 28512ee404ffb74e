use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::bookmark::DEFAULT_CATEGORY;

/// Name of the bookmark file inside the XDG data dir.
pub const DEFAULT_STORE_FILE: &str = "bookmarks.json";

/// Global configuration loaded from `~/.config/bkm/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BkmConfig {
    /// Where the collection is persisted. None = `~/.local/share/bkm/bookmarks.json`.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
    /// Category given to bookmarks added without one.
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Sort key used by `list` when none is given ("newest", "oldest", "nameAsc", "nameDesc").
    #[serde(default = "default_sort")]
    pub default_sort: String,
    /// Ask before deleting a bookmark.
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_sort() -> String {
    "newest".to_string()
}

fn default_confirm_delete() -> bool {
    true
}

impl Default for BkmConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            default_category: default_category(),
            default_sort: default_sort(),
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl BkmConfig {
    /// Resolve the storage file: explicit setting, else the XDG data file.
    pub fn resolved_storage_path(&self) -> Result<PathBuf> {
        match &self.storage_path {
            Some(p) => Ok(p.clone()),
            None => default_storage_path(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bkm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Default location of the bookmark file; creates the parent directory.
pub fn default_storage_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bkm")?;
    Ok(xdg_dirs.place_data_file(DEFAULT_STORE_FILE)?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BkmConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BkmConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: BkmConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
