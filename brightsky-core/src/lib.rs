//! Core library for the `brightsky` weather client.
//!
//! This crate defines:
//! - The BrightSky response models and the icon-to-emoji mapping
//! - The location permission flow (check, explain, request)
//! - Pluggable host capabilities: confirmation prompts, permission state, location fixes
//! - The permission-gated weather fetchers
//! - Configuration handling
//!
//! It is used by `brightsky-cli`, but any host can supply its own
//! [`PermissionSubsystem`], [`ConfirmPresenter`] and [`LocationProvider`].

pub mod client;
pub mod config;
pub mod confirm;
pub mod emoji;
pub mod error;
pub mod location;
pub mod model;
pub mod permission;

pub use client::{BrightSkyClient, WeatherResource};
pub use config::{Config, DEFAULT_BASE_URL};
pub use confirm::{
    AutoConfirm, ConfirmOptions, ConfirmPresenter, InlineConfirm, ModalConfirm, RuntimeTarget,
    presenter_for,
};
pub use emoji::forecast_emoji;
pub use error::{LocationError, WeatherError};
pub use location::{FixedLocation, LocationProvider};
pub use model::{
    Coordinates, CurrentWeatherResult, Currently, Daily, DailyDataPoint, DailyForecastResult,
    ForecastIcon, PermissionStatus, Reading,
};
pub use permission::{ConfigPermissionStore, PermissionSubsystem, ask_for_permissions};
