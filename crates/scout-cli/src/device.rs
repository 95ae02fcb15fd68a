//! Device position for a terminal session.
//!
//! A terminal has no GPS, so the position is read from `SCOUT_DEVICE_COORDS`
//! (`"lat,lon"`). Unset means unsupported; the literal `denied` simulates a
//! refused permission prompt.

use scout_core::Coordinate;
use scout_osm::{DeviceLocator, GeolocationError};

pub(crate) const DEVICE_COORDS_VAR: &str = "SCOUT_DEVICE_COORDS";

#[derive(Debug, Clone)]
pub(crate) struct EnvDeviceLocator {
    raw: Option<String>,
}

impl EnvDeviceLocator {
    pub(crate) fn new(raw: Option<String>) -> Self {
        Self { raw }
    }

    pub(crate) fn from_env() -> Self {
        Self::new(std::env::var(DEVICE_COORDS_VAR).ok())
    }
}

impl DeviceLocator for EnvDeviceLocator {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        let raw = self
            .raw
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(GeolocationError::Unsupported)?;

        if raw.eq_ignore_ascii_case("denied") {
            return Err(GeolocationError::Denied);
        }

        raw.parse::<Coordinate>().map_err(|e| {
            tracing::warn!(var = DEVICE_COORDS_VAR, value = raw, error = %e, "unusable device position");
            GeolocationError::Unsupported
        })
    }
}
