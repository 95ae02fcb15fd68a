//! Category query builder.
//!
//! Each market category maps to a fixed, ordered list of clauses: a
//! case-insensitive match on local chain and keyword names, followed by
//! structured tag matches from the standard OSM taxonomy. The order is part
//! of the contract so the rendered Overpass text is reproducible.

use std::fmt::Write as _;

use scout_core::{Coordinate, MarketCategory};

/// One predicate of a point-of-interest search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    /// Case-insensitive substring match on the `name` tag against any token.
    NamePattern(&'static [&'static str]),
    /// `key` equals one of `values` exactly.
    Tag {
        key: &'static str,
        values: &'static [&'static str],
    },
}

impl Clause {
    fn selector(&self) -> String {
        match self {
            Clause::NamePattern(tokens) => format!("[\"name\"~\"{}\",i]", tokens.join("|")),
            Clause::Tag { key, values: [value] } => format!("[\"{key}\"=\"{value}\"]"),
            Clause::Tag { key, values } => format!("[\"{key}\"~\"{}\"]", values.join("|")),
        }
    }
}

/// Ordered clause set plus the radius it is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilterSpec {
    pub clauses: Vec<Clause>,
    pub radius_m: u32,
}

impl CategoryFilterSpec {
    /// An empty spec means "search nothing", never "fetch everything".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Render as one Overpass QL union around `center`.
    ///
    /// Returns `None` for an empty spec so callers cannot accidentally send
    /// an unfiltered query.
    #[must_use]
    pub fn to_overpass_ql(&self, center: Coordinate, timeout_secs: u64) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let around = format!("(around:{},{},{})", self.radius_m, center.lat(), center.lon());
        let mut body = String::new();
        for clause in &self.clauses {
            // Writing to a String cannot fail.
            let _ = writeln!(body, "  node{}{around};", clause.selector());
        }

        Some(format!(
            "[out:json][timeout:{timeout_secs}];\n(\n{body});\nout body;\n>;\nout skel qt;\n"
        ))
    }
}

const ICE_NAMES: &[&str] = &[
    "Oxxo", "Seven", "Eleven", "Kiosko", "Extra", "Circle", "Super", "Vinos", "Licores", "Hielo",
    "Gasolinera",
];
const WATER_ICE_NAMES: &[&str] = &[
    "Oxxo",
    "Seven",
    "Eleven",
    "Kiosko",
    "Extra",
    "Purificadora",
    "Agua",
    "Water",
    "Llenado",
    "Hielo",
];
const WATER_NAMES: &[&str] = &["Purificadora", "Agua", "Water", "Llenado"];
const CLEANING_NAMES: &[&str] = &[
    "Bodega",
    "Aurrera",
    "Soriana",
    "Walmart",
    "Chedraui",
    "Super",
    "Abarrotes",
    "Lavanderia",
];
const PET_NAMES: &[&str] = &["Veterinaria", "Mascotas", "Pet", "Croquetas", "Alimento"];

fn category_clauses(category: MarketCategory) -> Vec<Clause> {
    match category {
        MarketCategory::IceMarket => vec![
            Clause::NamePattern(ICE_NAMES),
            Clause::Tag {
                key: "shop",
                values: &["convenience", "alcohol", "supermarket"],
            },
            Clause::Tag {
                key: "amenity",
                values: &["fuel"],
            },
        ],
        MarketCategory::WaterIceMix => vec![
            Clause::NamePattern(WATER_ICE_NAMES),
            Clause::Tag {
                key: "shop",
                values: &["convenience", "alcohol", "supermarket", "water"],
            },
            Clause::Tag {
                key: "amenity",
                values: &["drinking_water"],
            },
        ],
        MarketCategory::WaterOnly => vec![
            Clause::NamePattern(WATER_NAMES),
            Clause::Tag {
                key: "shop",
                values: &["water"],
            },
            Clause::Tag {
                key: "amenity",
                values: &["drinking_water"],
            },
        ],
        MarketCategory::CleaningMarket => vec![
            Clause::NamePattern(CLEANING_NAMES),
            Clause::Tag {
                key: "shop",
                values: &["supermarket", "laundry"],
            },
        ],
        MarketCategory::PetMarket => vec![
            Clause::NamePattern(PET_NAMES),
            Clause::Tag {
                key: "shop",
                values: &["pet"],
            },
            Clause::Tag {
                key: "healthcare",
                values: &["veterinary"],
            },
        ],
    }
}

/// Build the search filter for `category` within `radius_m` metres.
#[must_use]
pub fn build_filter_spec(category: MarketCategory, radius_m: u32) -> CategoryFilterSpec {
    CategoryFilterSpec {
        clauses: category_clauses(category),
        radius_m,
    }
}

/// Like [`build_filter_spec`] but from a raw category tag.
///
/// Unknown tags produce an empty spec rather than an error; downstream that
/// reads as a market with zero matches.
#[must_use]
pub fn filter_spec_for_tag(tag: &str, radius_m: u32) -> CategoryFilterSpec {
    match tag.parse::<MarketCategory>() {
        Ok(category) => build_filter_spec(category, radius_m),
        Err(_) => {
            tracing::debug!(tag, "no query rule for category tag");
            CategoryFilterSpec {
                clauses: Vec::new(),
                radius_m,
            }
        }
    }
}
