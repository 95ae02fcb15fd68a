//! Shared `reqwest` client construction for the OSM services.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::OsmError;

pub(crate) fn build_http_client(timeout: Duration, user_agent: &str) -> Result<Client, OsmError> {
    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Parse `base_url`, forcing exactly one trailing slash so `Url::join`
/// appends to the path instead of replacing its last segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, OsmError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| OsmError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}
