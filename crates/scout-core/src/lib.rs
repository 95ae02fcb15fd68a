//! Domain types, equipment catalog, verdict engine and configuration for
//! Market Scout.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod geo;
pub mod place;
pub mod verdict;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, Catalog, EquipmentProfile, MarketCategory};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{Coordinate, LocationQuery};
pub use place::Place;
pub use verdict::{evaluate, AnalysisResult, Classification};

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid coordinate ({lat}, {lon}): {reason}")]
    InvalidCoordinate { lat: f64, lon: f64, reason: String },

    #[error("unknown market category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation error: {0}")]
    Validation(String),
}
