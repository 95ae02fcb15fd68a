//! OpenStreetMap plumbing for Market Scout: Nominatim geocoding, Overpass
//! point-of-interest queries, result normalization, and the analysis
//! pipeline that ties them to the verdict engine.

mod client;
pub mod error;
pub mod geocode;
pub mod location;
pub mod normalize;
pub mod overpass;
pub mod pipeline;
pub mod query;
pub mod types;

pub use error::{AnalysisError, GeolocationError, OsmError};
pub use geocode::NominatimClient;
pub use location::{resolve_device, DeviceLocator, LocationInput};
pub use normalize::normalize;
pub use overpass::{FetchFailure, FetchOutcome, OverpassClient};
pub use pipeline::{evaluate_outcome, AnalysisSession, MarketScout};
pub use query::{build_filter_spec, filter_spec_for_tag, CategoryFilterSpec, Clause};
pub use types::RawFeature;
