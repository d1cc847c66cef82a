use anyhow::Result;
use async_trait::async_trait;
use std::{fmt::Debug, path::PathBuf};

use crate::{
    config::Config,
    confirm::{ConfirmOptions, ConfirmPresenter},
    error::WeatherError,
    model::PermissionStatus,
};

const PROMPT_TITLE: &str = "Requesting Location Permissions";
const PROMPT_MESSAGE: &str =
    "BrightSky needs access to your location for accurate weather reporting.";

/// Host-owned location permission state. The client only reads and requests it.
#[async_trait]
pub trait PermissionSubsystem: Send + Sync + Debug {
    async fn get_status(&self) -> Result<PermissionStatus>;

    /// Ask the host to grant location access and report the resulting status.
    async fn request(&self) -> Result<PermissionStatus>;
}

/// Check, explain, then request location permission.
///
/// Returns early when the user declines the explanation: on iOS a second
/// system prompt after a refusal is denied without asking, so the host
/// request must only follow an explicit "Allow".
pub async fn ask_for_permissions(
    subsystem: &dyn PermissionSubsystem,
    presenter: &dyn ConfirmPresenter,
) -> Result<bool, WeatherError> {
    let current = subsystem.get_status().await.map_err(WeatherError::Permission)?;
    tracing::debug!(status = %current, "checked location permission");

    if current.is_granted() {
        return Ok(true);
    }

    let options =
        ConfirmOptions::new(PROMPT_TITLE, PROMPT_MESSAGE).with_labels("Don't Allow", "Allow");

    if !presenter.confirm(&options).await {
        tracing::info!("user declined location access");
        return Ok(false);
    }

    let requested = subsystem.request().await.map_err(WeatherError::Permission)?;
    tracing::info!(status = %requested, "location permission requested");

    Ok(requested.is_granted())
}

/// Permission grant persisted in the config file.
#[derive(Debug, Clone)]
pub struct ConfigPermissionStore {
    path: PathBuf,
}

impl ConfigPermissionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store backed by the default config file location.
    pub fn from_default_path() -> Result<Self> {
        Ok(Self::new(Config::config_file_path()?))
    }

    /// Forget any stored grant so the next fetch asks again.
    pub fn revoke(&self) -> Result<()> {
        let mut cfg = Config::load_from(&self.path)?;
        cfg.location_permission = None;
        cfg.save_to(&self.path)
    }
}

#[async_trait]
impl PermissionSubsystem for ConfigPermissionStore {
    async fn get_status(&self) -> Result<PermissionStatus> {
        let path = self.path.clone();
        let cfg = tokio::task::spawn_blocking(move || Config::load_from(&path)).await??;
        Ok(cfg.permission_status())
    }

    async fn request(&self) -> Result<PermissionStatus> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let mut cfg = Config::load_from(&path)?;
            cfg.location_permission = Some(PermissionStatus::Granted.to_string());
            cfg.save_to(&path)
        })
        .await??;
        Ok(PermissionStatus::Granted)
    }
}
