use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    confirm::RuntimeTarget,
    model::{Coordinates, PermissionStatus},
};

pub const DEFAULT_BASE_URL: &str = "https://brightsky-api.fiberjw.now.sh";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// target = "native"
/// location_permission = "granted"
///
/// [location]
/// latitude = 37.5
/// longitude = -122.3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Overrides the BrightSky endpoint, e.g. for a mirror.
    pub base_url: Option<String>,

    #[serde(default)]
    pub target: RuntimeTarget,

    pub timeout_secs: Option<u64>,

    /// Host-side record of the location grant.
    pub location_permission: Option<String>,

    // Tables serialize after plain values, keep this last.
    pub location: Option<Coordinates>,
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn permission_status(&self) -> PermissionStatus {
        self.location_permission
            .as_deref()
            .map(PermissionStatus::from)
            .unwrap_or(PermissionStatus::Undetermined)
    }

    pub fn set_location(&mut self, latitude: f64, longitude: f64) -> Result<()> {
        let coords = Coordinates::new(latitude, longitude)?;
        self.location = Some(coords);
        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "brightsky", "brightsky")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_brightsky() {
        let cfg = Config::default();

        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.target, RuntimeTarget::Native);
        assert_eq!(cfg.permission_status(), PermissionStatus::Undetermined);
        assert!(cfg.timeout().is_none());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config {
            target: RuntimeTarget::Web,
            timeout_secs: Some(5),
            location_permission: Some("granted".into()),
            ..Config::default()
        };
        cfg.set_location(37.5, -122.3).unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.permission_status(), PermissionStatus::Granted);
        assert_eq!(loaded.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn set_location_rejects_invalid_coordinates() {
        let mut cfg = Config::default();
        let err = cfg.set_location(120.0, 0.0).unwrap_err();

        assert!(err.to_string().contains("Invalid coordinates"));
        assert!(cfg.location.is_none());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "target = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
