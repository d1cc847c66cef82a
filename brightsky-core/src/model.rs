use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

use crate::error::LocationError;

/// Weather condition code as used by the BrightSky API.
///
/// Codes outside the known vocabulary are kept verbatim in
/// [`ForecastIcon::Unrecognized`] so newer API responses still decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ForecastIcon {
    ClearDay,
    ClearNight,
    Rain,
    Snow,
    Sleet,
    Wind,
    Fog,
    Cloudy,
    Error,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Unrecognized(String),
}

impl ForecastIcon {
    pub fn as_str(&self) -> &str {
        match self {
            ForecastIcon::ClearDay => "clear-day",
            ForecastIcon::ClearNight => "clear-night",
            ForecastIcon::Rain => "rain",
            ForecastIcon::Snow => "snow",
            ForecastIcon::Sleet => "sleet",
            ForecastIcon::Wind => "wind",
            ForecastIcon::Fog => "fog",
            ForecastIcon::Cloudy => "cloudy",
            ForecastIcon::Error => "error",
            ForecastIcon::PartlyCloudyDay => "partly-cloudy-day",
            ForecastIcon::PartlyCloudyNight => "partly-cloudy-night",
            ForecastIcon::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Every icon in the API vocabulary.
    pub const fn all() -> &'static [ForecastIcon] {
        &[
            ForecastIcon::ClearDay,
            ForecastIcon::ClearNight,
            ForecastIcon::Rain,
            ForecastIcon::Snow,
            ForecastIcon::Sleet,
            ForecastIcon::Wind,
            ForecastIcon::Fog,
            ForecastIcon::Cloudy,
            ForecastIcon::Error,
            ForecastIcon::PartlyCloudyDay,
            ForecastIcon::PartlyCloudyNight,
        ]
    }

    /// Display glyph for this icon, see [`crate::emoji::forecast_emoji`].
    pub fn emoji(&self) -> &'static str {
        crate::emoji::forecast_emoji(self)
    }
}

impl From<&str> for ForecastIcon {
    fn from(value: &str) -> Self {
        match value {
            "clear-day" => ForecastIcon::ClearDay,
            "clear-night" => ForecastIcon::ClearNight,
            "rain" => ForecastIcon::Rain,
            "snow" => ForecastIcon::Snow,
            "sleet" => ForecastIcon::Sleet,
            "wind" => ForecastIcon::Wind,
            "fog" => ForecastIcon::Fog,
            "cloudy" => ForecastIcon::Cloudy,
            "error" => ForecastIcon::Error,
            "partly-cloudy-day" => ForecastIcon::PartlyCloudyDay,
            "partly-cloudy-night" => ForecastIcon::PartlyCloudyNight,
            other => ForecastIcon::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for ForecastIcon {
    fn from(value: String) -> Self {
        match ForecastIcon::from(value.as_str()) {
            ForecastIcon::Unrecognized(_) => ForecastIcon::Unrecognized(value),
            known => known,
        }
    }
}

impl From<ForecastIcon> for String {
    fn from(icon: ForecastIcon) -> Self {
        match icon {
            ForecastIcon::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ForecastIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric reading exactly as the API sent it.
///
/// `60` stays an integer and `60.0` stays a float when re-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reading(Number);

impl Reading {
    /// `None` for NaN and infinities, which JSON cannot carry.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self)
    }

    pub fn value(&self) -> f64 {
        self.0.as_f64().unwrap_or(f64::NAN)
    }
}

impl From<i64> for Reading {
    fn from(value: i64) -> Self {
        Self(Number::from(value))
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of `GET /current/`.
///
/// Fields this client does not model are kept in `extra`, so a decoded
/// result re-encodes to the body it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResult {
    pub currently: Currently,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currently {
    pub summary: String,
    pub temperature: Reading,
    pub icon: ForecastIcon,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `GET /forecast/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastResult {
    pub daily: Daily,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Daily {
    pub summary: String,
    pub icon: ForecastIcon,
    pub data: Vec<DailyDataPoint>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One day of the forecast. Times are unix epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDataPoint {
    pub time: i64,
    pub summary: String,
    pub icon: ForecastIcon,
    pub temperature_high: Reading,
    pub temperature_high_time: i64,
    pub temperature_low: Reading,
    pub temperature_low_time: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DailyDataPoint {
    pub fn date(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.time)
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// A single location fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build coordinates from user input, rejecting values no device could report.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(LocationError::InvalidCoordinates { latitude, longitude });
        }

        Ok(Self { latitude, longitude })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Location permission state as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
    Other(String),
}

impl PermissionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PermissionStatus::Granted => "granted",
            PermissionStatus::Denied => "denied",
            PermissionStatus::Undetermined => "undetermined",
            PermissionStatus::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

impl From<&str> for PermissionStatus {
    fn from(value: &str) -> Self {
        match value {
            "granted" => PermissionStatus::Granted,
            "denied" => PermissionStatus::Denied,
            "undetermined" => PermissionStatus::Undetermined,
            other => PermissionStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
