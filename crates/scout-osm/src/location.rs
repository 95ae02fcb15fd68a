//! Where an analysis is anchored: a typed address, explicit coordinates, or
//! the device's position.

use std::future::Future;
use std::time::Duration;

use scout_core::Coordinate;

use crate::error::GeolocationError;

/// Label given to a position reported by the device itself.
pub const DEVICE_LOCATION_LABEL: &str = "Mi Ubicación Actual";

/// How the user chose the site to analyse.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Free text to geocode.
    Address(String),
    /// Coordinates given directly, labelled with themselves.
    Coordinate(Coordinate),
    /// A position the device already reported.
    Device(Coordinate),
}

/// Source of the device's current position.
pub trait DeviceLocator {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send;
}

/// Ask `locator` for the current position, giving up after `timeout`.
///
/// The answer is a [`LocationInput::Device`].
///
/// # Errors
///
/// Returns the locator's own [`GeolocationError`], or
/// [`GeolocationError::Timeout`] when it does not answer in time.
pub async fn resolve_device<L: DeviceLocator>(
    locator: &L,
    timeout: Duration,
) -> Result<LocationInput, GeolocationError> {
    let coordinate = tokio::time::timeout(timeout, locator.current_position())
        .await
        .map_err(|_| GeolocationError::Timeout {
            secs: timeout.as_secs(),
        })??;

    Ok(LocationInput::Device(coordinate))
}
