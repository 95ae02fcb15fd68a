use thiserror::Error;

/// Errors returned by the Nominatim and Overpass clients.
#[derive(Debug, Error)]
pub enum OsmError {
    /// Network or TLS failure, timeout, or non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A service returned a point outside WGS-84 bounds.
    #[error("invalid coordinate from service: {0}")]
    InvalidCoordinate(#[from] scout_core::CoreError),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Failures reported by a device position provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("permission to read the device location was denied")]
    Denied,

    #[error("device geolocation is not supported here")]
    Unsupported,

    #[error("device geolocation timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Errors that stop an analysis before the point-of-interest lookup.
///
/// Point-of-interest fetch failures are deliberately absent: they produce an
/// `inconclusive` verdict instead of an error.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no geocoding candidates for \"{query}\"")]
    GeocodeNotFound { query: String },

    #[error("geocoding failed: {0}")]
    GeocodeTransport(#[source] OsmError),

    #[error("device location unavailable: {0}")]
    Geolocation(#[from] GeolocationError),

    /// A newer analysis started on the same session before this one finished.
    #[error("analysis superseded by a newer request")]
    Superseded,
}

impl AnalysisError {
    /// Message shown to the user alongside a prompt to try again.
    #[must_use]
    pub fn retry_prompt(&self) -> &'static str {
        match self {
            AnalysisError::GeocodeNotFound { .. } => {
                "No encontramos esa dirección. Intenta ser más específico."
            }
            AnalysisError::GeocodeTransport(_) => {
                "No pudimos buscar esa dirección en este momento. Intenta de nuevo."
            }
            AnalysisError::Geolocation(_) => {
                "No se pudo obtener la ubicación. Intenta buscar manualmente."
            }
            AnalysisError::Superseded => "Se inició una búsqueda más reciente.",
        }
    }
}
