use std::sync::Arc;

use anyhow::Context;
use brightsky_core::{
    AutoConfirm, BrightSkyClient, Config, ConfigPermissionStore, ConfirmPresenter, Coordinates,
    FixedLocation, PermissionSubsystem, RuntimeTarget, presenter_for,
};
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, CustomUserError, Select, validator::Validation};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "brightsky", version, about = "Weather for where you are, from BrightSky")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print the decoded response as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Answer "Allow" to the location prompt without asking.
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions.
    Current(LocationArgs),

    /// Show the daily forecast.
    Forecast(LocationArgs),

    /// Interactively set the default location and runtime target.
    Configure,

    /// Inspect or reset the stored location permission.
    Permission {
        #[command(subcommand)]
        action: PermissionAction,
    },
}

#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Latitude to use instead of the configured location.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude to use instead of the configured location.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum PermissionAction {
    /// Print the stored permission status.
    Status,
    /// Forget the stored grant so the next fetch asks again.
    Reset,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Current(ref location) => {
                let client = build_client(location, self.yes)?;
                let result = client.fetch_current_weather().await?;

                if self.json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!("{}", render::current(&result));
                }
            }
            Command::Forecast(ref location) => {
                let client = build_client(location, self.yes)?;
                let result = client.fetch_forecast().await?;

                if self.json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!("{}", render::forecast(&result));
                }
            }
            Command::Configure => configure()?,
            Command::Permission { action } => {
                let store = ConfigPermissionStore::from_default_path()?;
                match action {
                    PermissionAction::Status => {
                        println!("Location permission: {}", store.get_status().await?);
                    }
                    PermissionAction::Reset => {
                        store.revoke()?;
                        println!("Location permission reset.");
                    }
                }
            }
        }

        Ok(())
    }
}

fn build_client(location: &LocationArgs, assume_yes: bool) -> anyhow::Result<BrightSkyClient> {
    let cfg = Config::load()?;

    let coords = match (location.lat, location.lon) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)?),
        _ => cfg.location,
    };

    let presenter: Arc<dyn ConfirmPresenter> = if assume_yes {
        Arc::new(AutoConfirm(true))
    } else {
        presenter_for(cfg.target)
    };

    let client = BrightSkyClient::from_config(
        &cfg,
        Arc::new(ConfigPermissionStore::from_default_path()?),
        presenter,
        Arc::new(FixedLocation::from_option(coords)),
    )?;
    tracing::debug!(runtime = %cfg.target, base_url = client.base_url(), "client ready");

    Ok(client)
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;
    let current = cfg.location;

    let mut lat_prompt = CustomType::<f64>::new("Latitude:")
        .with_error_message("Please enter a number")
        .with_validator(latitude_in_range);
    let mut lon_prompt = CustomType::<f64>::new("Longitude:")
        .with_error_message("Please enter a number")
        .with_validator(longitude_in_range);
    if let Some(coords) = current {
        lat_prompt = lat_prompt.with_default(coords.latitude);
        lon_prompt = lon_prompt.with_default(coords.longitude);
    }

    let latitude = lat_prompt.prompt().context("Failed to read latitude")?;
    let longitude = lon_prompt.prompt().context("Failed to read longitude")?;
    cfg.set_location(latitude, longitude)?;

    let targets = RuntimeTarget::all().to_vec();
    let start = targets.iter().position(|t| *t == cfg.target).unwrap_or(0);
    cfg.target = Select::new("Runtime target:", targets)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read runtime target")?;

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn latitude_in_range(value: &f64) -> Result<Validation, CustomUserError> {
    if Coordinates::new(*value, 0.0).is_ok() {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid("Latitude must be between -90 and 90".into()))
    }
}

fn longitude_in_range(value: &f64) -> Result<Validation, CustomUserError> {
    if Coordinates::new(0.0, *value).is_ok() {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid("Longitude must be between -180 and 180".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid(result: Result<Validation, CustomUserError>) -> bool {
        matches!(result, Ok(Validation::Valid))
    }

    #[test]
    fn latitude_prompt_rejects_out_of_range() {
        assert!(is_valid(latitude_in_range(&37.5)));
        assert!(is_valid(latitude_in_range(&-90.0)));
        assert!(!is_valid(latitude_in_range(&90.5)));
        assert!(!is_valid(latitude_in_range(&f64::NAN)));
    }

    #[test]
    fn longitude_prompt_rejects_out_of_range() {
        assert!(is_valid(longitude_in_range(&-122.3)));
        assert!(is_valid(longitude_in_range(&180.0)));
        assert!(!is_valid(longitude_in_range(&-181.0)));
    }
}
