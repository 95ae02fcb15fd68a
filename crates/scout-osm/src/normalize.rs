//! Normalization of raw Overpass elements into [`Place`]s.

use scout_core::place::{GENERIC_PLACE_KIND, GENERIC_PLACE_NAME};
use scout_core::{Coordinate, Place};

use crate::types::RawFeature;

/// Two points closer than this in both axes (about 11 m) are the same storefront.
pub const DUPLICATE_EPSILON_DEG: f64 = 0.0001;

const IDENTITY_TAGS: [&str; 3] = ["name", "brand", "operator"];

/// Clean `features` into deduplicated places, preserving input order.
///
/// Anonymous elements (no `name`, `brand` or `operator` tag), non-nodes and
/// elements without a usable position are dropped first. A place is then
/// kept only when no earlier place shares its exact name or sits within
/// [`DUPLICATE_EPSILON_DEG`] of it.
#[must_use]
pub fn normalize(features: &[RawFeature]) -> Vec<Place> {
    let candidates: Vec<Place> = features.iter().filter_map(to_place).collect();

    candidates
        .iter()
        .enumerate()
        .filter(|(index, place)| {
            candidates[..*index]
                .iter()
                .all(|earlier| !is_duplicate(earlier, place))
        })
        .map(|(_, place)| place.clone())
        .collect()
}

/// Same exact (case-sensitive) name, or within the epsilon on both axes.
#[must_use]
pub fn is_duplicate(a: &Place, b: &Place) -> bool {
    a.name == b.name
        || ((a.coordinate.lat() - b.coordinate.lat()).abs() < DUPLICATE_EPSILON_DEG
            && (a.coordinate.lon() - b.coordinate.lon()).abs() < DUPLICATE_EPSILON_DEG)
}

fn to_place(feature: &RawFeature) -> Option<Place> {
    if feature.kind != "node" {
        return None;
    }
    if !IDENTITY_TAGS.iter().any(|key| feature.tag(key).is_some()) {
        return None;
    }

    let coordinate = Coordinate::new(feature.lat?, feature.lon?).ok()?;

    let name = feature
        .tag("name")
        .or_else(|| feature.tag("brand"))
        .unwrap_or(GENERIC_PLACE_NAME)
        .to_string();
    let kind = feature
        .tag("shop")
        .or_else(|| feature.tag("amenity"))
        .unwrap_or(GENERIC_PLACE_KIND)
        .to_string();

    Some(Place {
        id: feature.id,
        coordinate,
        name,
        kind,
        tags: feature.tags.clone(),
    })
}
