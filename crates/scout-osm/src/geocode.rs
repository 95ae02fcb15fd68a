//! HTTP client for the Nominatim search API.

use std::time::Duration;

use reqwest::{Client, Url};
use scout_core::{Coordinate, LocationQuery};

use crate::client::{build_http_client, parse_base_url};
use crate::error::OsmError;
use crate::types::NominatimCandidate;

/// Client for Nominatim free-text search.
///
/// Use [`NominatimClient::new`] for the public instance or
/// [`NominatimClient::with_base_url`] to point at a mirror or a mock server.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: Url,
}

impl NominatimClient {
    /// Creates a client pointed at `https://nominatim.openstreetmap.org/`.
    ///
    /// # Errors
    ///
    /// Returns [`OsmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, OsmError> {
        Self::with_base_url(
            scout_core::config::DEFAULT_NOMINATIM_URL,
            timeout_secs,
            user_agent,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`OsmError::Http`] if the client cannot be built, or
    /// [`OsmError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, OsmError> {
        Ok(Self {
            client: build_http_client(Duration::from_secs(timeout_secs), user_agent)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Resolve `query` to its best-ranked candidate.
    ///
    /// Returns `Ok(None)` for a blank query (no request is made) or when the
    /// service has no candidates.
    ///
    /// # Errors
    ///
    /// - [`OsmError::Http`] on network failure, timeout or non-2xx status.
    /// - [`OsmError::Deserialize`] if the body is not the expected JSON array.
    /// - [`OsmError::InvalidCoordinate`] if the top candidate's position is
    ///   unparseable or out of range.
    pub async fn search(&self, query: &str) -> Result<Option<LocationQuery>, OsmError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let url = self.search_url(query);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let candidates: Vec<NominatimCandidate> =
            serde_json::from_str(&body).map_err(|e| OsmError::Deserialize {
                context: format!("nominatim search(q={query})"),
                source: e,
            })?;

        let Some(first) = candidates.into_iter().next() else {
            tracing::info!(query, "nominatim returned no candidates");
            return Ok(None);
        };

        let coordinate = parse_candidate_coordinate(&first)?;
        tracing::debug!(query, %coordinate, label = %first.display_name, "geocoded");
        Ok(Some(LocationQuery::new(coordinate, first.display_name)))
    }

    fn search_url(&self, query: &str) -> Url {
        let mut url = self.base_url.join("search").unwrap_or_else(|_| self.base_url.clone());
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("limit", "1")
            .append_pair("q", query);
        url
    }
}

fn parse_candidate_coordinate(candidate: &NominatimCandidate) -> Result<Coordinate, OsmError> {
    let lat = candidate.lat.trim().parse::<f64>().unwrap_or(f64::NAN);
    let lon = candidate.lon.trim().parse::<f64>().unwrap_or(f64::NAN);
    Ok(Coordinate::new(lat, lon)?)
}
