use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dataset::Catalog;
use crate::geo::validate_coordinates;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatasetConfig {
    /// JSON dataset to load instead of the embedded one. Relative paths
    /// resolve against the config file's directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    /// Initial view centre as `[lat, lng]`.
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
        }
    }
}

fn default_center() -> [f64; 2] {
    [20.0, 0.0]
}
fn default_zoom() -> u8 {
    2
}

const MAX_ZOOM: u8 = 20;

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Loads the configured dataset, or the embedded one.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.dataset.path {
            Some(path) => Catalog::load(path),
            None => Catalog::embedded(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate server
    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    // Validate map
    let [lat, lng] = config.map.center;
    if !validate_coordinates(lat, lng) {
        anyhow::bail!(
            "map.center must be [lat, lng] with lat in [-90, 90] and lng in [-180, 180], got [{}, {}]",
            lat,
            lng
        );
    }
    if config.map.zoom > MAX_ZOOM {
        anyhow::bail!("map.zoom must be <= {}", MAX_ZOOM);
    }

    if let Some(dataset) = config.dataset.path.as_mut() {
        if dataset.is_relative() {
            if let Some(dir) = path.parent() {
                *dataset = dir.join(&*dataset);
            }
        }
    }

    Ok(config)
}

/// Loads `path` if it exists. A missing file at the default location falls
/// back to [`Config::minimal`]; a missing file the user named is an error.
pub fn load_or_default(path: &Path, explicit: bool) -> Result<Config> {
    if !explicit && !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::minimal());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("cellar.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = load_config(&write_config(&tmp, "")).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:7340");
        assert_eq!(cfg.map.center, [20.0, 0.0]);
        assert_eq!(cfg.map.zoom, 2);
        assert!(cfg.dataset.path.is_none());
    }

    #[test]
    fn test_relative_dataset_resolves_against_config_dir() {
        let tmp = TempDir::new().unwrap();
        let cfg = load_config(&write_config(&tmp, "[dataset]\npath = \"wines.json\"\n")).unwrap();
        assert_eq!(cfg.dataset.path.unwrap(), tmp.path().join("wines.json"));
    }

    #[test]
    fn test_rejects_bad_center() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(&write_config(&tmp, "[map]\ncenter = [95.0, 0.0]\n")).unwrap_err();
        assert!(err.to_string().contains("map.center"));
    }

    #[test]
    fn test_rejects_bad_zoom() {
        let tmp = TempDir::new().unwrap();
        assert!(load_config(&write_config(&tmp, "[map]\nzoom = 25\n")).is_err());
    }

    #[test]
    fn test_rejects_empty_bind() {
        let tmp = TempDir::new().unwrap();
        assert!(load_config(&write_config(&tmp, "[server]\nbind = \"\"\n")).is_err());
    }

    #[test]
    fn test_missing_default_file_falls_back() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(load_or_default(&missing, false).is_ok());
        assert!(load_or_default(&missing, true).is_err());
    }
}
