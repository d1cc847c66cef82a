use thiserror::Error;

/// Failure to obtain a location fix.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("No location configured.\nHint: run `brightsky configure` or pass --lat/--lon.")]
    NotConfigured,

    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Everything a weather fetch can fail with. Nothing is retried.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Location permission not granted")]
    PermissionDenied,

    #[error("Failed to query location permission: {0}")]
    Permission(#[source] anyhow::Error),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode weather response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}
