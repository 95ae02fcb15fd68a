//! WGS-84 coordinates and resolved search targets.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A validated WGS-84 point in decimal degrees.
///
/// Construct through [`Coordinate::new`]; the fields are private so an
/// out-of-range point can never exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoreError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}

impl Coordinate {
    /// Builds a coordinate after checking both axes are finite and in range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] when latitude is outside
    /// `[-90, 90]`, longitude is outside `[-180, 180]`, or either is NaN/inf.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidCoordinate {
            lat,
            lon,
            reason: reason.to_string(),
        };

        if !lat.is_finite() || !lon.is_finite() {
            return Err(invalid("coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self { lat, lon })
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = CoreError;

    /// Parses `"lat,lon"` (whitespace around either number is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoreError::InvalidCoordinate {
            lat: f64::NAN,
            lon: f64::NAN,
            reason: format!("expected \"lat,lon\", got \"{s}\""),
        };

        let (lat, lon) = s.split_once(',').ok_or_else(malformed)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| malformed())?;
        let lon = lon.trim().parse::<f64>().map_err(|_| malformed())?;
        Self::new(lat, lon)
    }
}

/// The resolved target of one search action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub coordinate: Coordinate,
    /// Human-readable label, e.g. the geocoder's display name.
    pub label: String,
}

impl LocationQuery {
    #[must_use]
    pub fn new(coordinate: Coordinate, label: impl Into<String>) -> Self {
        Self {
            coordinate,
            label: label.into(),
        }
    }

    /// First comma-separated segment of the label, used as a short heading.
    #[must_use]
    pub fn short_label(&self) -> &str {
        self.label
            .split(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.label)
    }
}
