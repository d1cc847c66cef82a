use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};

use reqwest::Client;

use crate::{
    config::{Config, DEFAULT_BASE_URL},
    confirm::ConfirmPresenter,
    error::WeatherError,
    location::LocationProvider,
    model::{CurrentWeatherResult, DailyForecastResult},
    permission::{PermissionSubsystem, ask_for_permissions},
};

/// A BrightSky response body and the path it is served from.
pub trait WeatherResource: DeserializeOwned + Send {
    const PATH: &'static str;
}

impl WeatherResource for CurrentWeatherResult {
    const PATH: &'static str = "/current/";
}

impl WeatherResource for DailyForecastResult {
    const PATH: &'static str = "/forecast/";
}

/// Permission-gated, location-aware BrightSky client.
///
/// Every fetch runs the whole sequence again: permission check (and prompt),
/// one location fix, one GET. Nothing is cached between calls and concurrent
/// calls are not coordinated.
#[derive(Debug, Clone)]
pub struct BrightSkyClient {
    http: Client,
    base_url: String,
    permissions: Arc<dyn PermissionSubsystem>,
    presenter: Arc<dyn ConfirmPresenter>,
    location: Arc<dyn LocationProvider>,
}

impl BrightSkyClient {
    pub fn new(
        permissions: Arc<dyn PermissionSubsystem>,
        presenter: Arc<dyn ConfirmPresenter>,
        location: Arc<dyn LocationProvider>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            permissions,
            presenter,
            location,
        }
    }

    /// Client using the endpoint and timeout from `config`.
    pub fn from_config(
        config: &Config,
        permissions: Arc<dyn PermissionSubsystem>,
        presenter: Arc<dyn ConfirmPresenter>,
        location: Arc<dyn LocationProvider>,
    ) -> Result<Self, WeatherError> {
        let client = Self::new(permissions, presenter, location).with_base_url(config.base_url());

        match config.timeout() {
            Some(timeout) => client.with_timeout(timeout),
            None => Ok(client),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, WeatherError> {
        self.http = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_current_weather(&self) -> Result<CurrentWeatherResult, WeatherError> {
        self.fetch_resource().await
    }

    pub async fn fetch_forecast(&self) -> Result<DailyForecastResult, WeatherError> {
        self.fetch_resource().await
    }

    pub async fn fetch_resource<R: WeatherResource>(&self) -> Result<R, WeatherError> {
        let granted =
            ask_for_permissions(self.permissions.as_ref(), self.presenter.as_ref()).await?;
        if !granted {
            return Err(WeatherError::PermissionDenied);
        }

        let coords = self.location.current_position().await?;

        // f64 Display: shortest exact form, never rounded.
        let latitude = coords.latitude.to_string();
        let longitude = coords.longitude.to_string();
        let url = format!("{}{}", self.base_url, R::PATH);

        tracing::debug!(%url, %coords, "requesting weather");

        let res = self
            .http
            .get(&url)
            .query(&[("latitude", latitude.as_str()), ("longitude", longitude.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        serde_json::from_str(&body).map_err(|source| {
            tracing::debug!(%status, body = %truncate_body(&body), "undecodable weather response");
            WeatherError::Decode { status: status.as_u16(), source }
        })
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_paths() {
        assert_eq!(CurrentWeatherResult::PATH, "/current/");
        assert_eq!(DailyForecastResult::PATH, "/forecast/");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "☁".repeat(300);
        assert_eq!(truncate_body(&long).chars().count(), 200);
        assert_eq!(truncate_body("short"), "short");
    }
}
