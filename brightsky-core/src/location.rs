use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::LocationError, model::Coordinates};

/// One-shot source of the current position.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position supplied up front by the host, from config or the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation {
    coords: Option<Coordinates>,
}

impl FixedLocation {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords: Some(coords) }
    }

    /// A provider with no position; every fix fails with [`LocationError::NotConfigured`].
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn from_option(coords: Option<Coordinates>) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let coords = self.coords.ok_or(LocationError::NotConfigured)?;
        // Loaded values bypass Coordinates::new.
        Coordinates::new(coords.latitude, coords.longitude)
    }
}
