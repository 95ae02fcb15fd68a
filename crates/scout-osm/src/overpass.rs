//! Point-of-interest fetcher backed by the Overpass API.
//!
//! One analysis sends exactly one query. Failures are reported as a
//! [`FetchOutcome::Failed`] value rather than an error so the pipeline can
//! still produce a verdict, but they are never confused with a genuine
//! zero-result answer.

use std::time::Duration;

use reqwest::{Client, Url};
use scout_core::Coordinate;
use thiserror::Error;

use crate::client::build_http_client;
use crate::error::OsmError;
use crate::query::CategoryFilterSpec;
use crate::types::{OverpassResponse, RawFeature};

/// Extra client-side wait on top of the server-side query timeout.
const CLIENT_GRACE_SECS: u64 = 5;

/// Why a point-of-interest lookup produced no usable data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Result of one point-of-interest lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The service answered; the list may legitimately be empty.
    Fetched(Vec<RawFeature>),
    /// The filter had no clauses, so nothing was asked.
    Skipped,
    Failed(FetchFailure),
}

impl FetchOutcome {
    /// Raw features, treating a skipped or failed lookup as none.
    #[must_use]
    pub fn features(&self) -> &[RawFeature] {
        match self {
            FetchOutcome::Fetched(features) => features,
            FetchOutcome::Skipped | FetchOutcome::Failed(_) => &[],
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

/// Client for an Overpass `interpreter` endpoint.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    interpreter_url: Url,
    query_timeout_secs: u64,
}

impl OverpassClient {
    /// Creates a client pointed at the public `overpass-api.de` instance.
    ///
    /// # Errors
    ///
    /// Returns [`OsmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(query_timeout_secs: u64, user_agent: &str) -> Result<Self, OsmError> {
        Self::with_url(
            scout_core::config::DEFAULT_OVERPASS_URL,
            query_timeout_secs,
            user_agent,
        )
    }

    /// Creates a client for the interpreter at `interpreter_url`.
    ///
    /// `query_timeout_secs` is sent as the server-side `[timeout:N]`; the HTTP
    /// client itself gives up a few seconds later.
    ///
    /// # Errors
    ///
    /// Returns [`OsmError::Http`] if the client cannot be built, or
    /// [`OsmError::InvalidBaseUrl`] if `interpreter_url` does not parse.
    pub fn with_url(
        interpreter_url: &str,
        query_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, OsmError> {
        let interpreter_url = Url::parse(interpreter_url).map_err(|e| OsmError::InvalidBaseUrl {
            url: interpreter_url.to_string(),
            reason: e.to_string(),
        })?;
        let timeout = Duration::from_secs(query_timeout_secs.saturating_add(CLIENT_GRACE_SECS));

        Ok(Self {
            client: build_http_client(timeout, user_agent)?,
            interpreter_url,
            query_timeout_secs,
        })
    }

    /// Run `spec` around `center` and return the raw elements.
    ///
    /// An empty spec returns [`FetchOutcome::Skipped`] without touching the
    /// network.
    pub async fn fetch_places(&self, center: Coordinate, spec: &CategoryFilterSpec) -> FetchOutcome {
        let Some(query) = spec.to_overpass_ql(center, self.query_timeout_secs) else {
            tracing::debug!(%center, "empty filter spec; skipping overpass query");
            return FetchOutcome::Skipped;
        };

        match self.post_query(query).await {
            Ok(features) => {
                tracing::info!(
                    %center,
                    radius_m = spec.radius_m,
                    count = features.len(),
                    "overpass query succeeded"
                );
                FetchOutcome::Fetched(features)
            }
            Err(failure) => {
                tracing::warn!(
                    %center,
                    radius_m = spec.radius_m,
                    error = %failure,
                    "overpass query failed; verdict will be inconclusive"
                );
                FetchOutcome::Failed(failure)
            }
        }
    }

    async fn post_query(&self, query: String) -> Result<Vec<RawFeature>, FetchFailure> {
        let response = self
            .client
            .post(self.interpreter_url.clone())
            .body(query)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(classify_transport)?;
        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| FetchFailure::Malformed(e.to_string()))?;
        Ok(parsed.elements)
    }
}

fn classify_transport(err: reqwest::Error) -> FetchFailure {
    if err.is_timeout() {
        FetchFailure::Timeout
    } else {
        FetchFailure::Transport(err.to_string())
    }
}
