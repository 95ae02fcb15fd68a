//! Wire types for the Nominatim and Overpass JSON responses.

use std::collections::BTreeMap;

use serde::Deserialize;

/// One element of an Overpass `elements` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawFeature {
    /// Element type: `"node"`, `"way"`, or `"relation"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    /// Only nodes carry a position; ways and relations come back without one.
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl RawFeature {
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    pub elements: Vec<RawFeature>,
}

/// One Nominatim search candidate. Coordinates arrive as decimal strings.
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimCandidate {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}
