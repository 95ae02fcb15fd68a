use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Fallback display name for a point with no `name` or `brand` tag.
pub const GENERIC_PLACE_NAME: &str = "Punto de Venta";
/// Fallback kind for a point with no `shop` or `amenity` tag.
pub const GENERIC_PLACE_KIND: &str = "Comercio";

/// A nearby point of interest after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// OpenStreetMap node id.
    pub id: i64,
    pub coordinate: Coordinate,
    pub name: String,
    /// Resolved category label, e.g. `"convenience"` or `"fuel"`.
    pub kind: String,
    /// Original tag bag, kept for map popups.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl Place {
    /// `kind` formatted for display: underscores become spaces.
    #[must_use]
    pub fn kind_label(&self) -> String {
        self.kind.replace('_', " ")
    }
}
