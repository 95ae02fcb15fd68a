use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, CoreError};

const EMBEDDED_CATALOG: &str = include_str!("../config/machines.yaml");

/// Target market a piece of equipment is sold into.
///
/// This is a closed set: catalog files naming anything else fail to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketCategory {
    IceMarket,
    WaterIceMix,
    WaterOnly,
    CleaningMarket,
    PetMarket,
}

impl MarketCategory {
    pub const ALL: [MarketCategory; 5] = [
        MarketCategory::IceMarket,
        MarketCategory::WaterIceMix,
        MarketCategory::WaterOnly,
        MarketCategory::CleaningMarket,
        MarketCategory::PetMarket,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MarketCategory::IceMarket => "ice_market",
            MarketCategory::WaterIceMix => "water_ice_mix",
            MarketCategory::WaterOnly => "water_only",
            MarketCategory::CleaningMarket => "cleaning_market",
            MarketCategory::PetMarket => "pet_market",
        }
    }

    /// Markets where nearby sellers are direct competitors for bagged ice.
    #[must_use]
    pub fn is_competition_sensitive(self) -> bool {
        matches!(self, MarketCategory::IceMarket | MarketCategory::WaterIceMix)
    }
}

impl std::fmt::Display for MarketCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MarketCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarketCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentProfile {
    pub id: String,
    pub brand: String,
    pub name: String,
    pub description: String,
    pub characteristic: String,
    pub category: MarketCategory,
    /// Display colour hint for front-ends (e.g. `"sky"`).
    #[serde(default)]
    pub accent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    machines: Vec<EquipmentProfile>,
}

/// Immutable equipment table, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    machines: Vec<EquipmentProfile>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` only if the embedded YAML is itself invalid.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_yaml(EMBEDDED_CATALOG)
    }

    /// Parse and validate a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CatalogFileParse`] for malformed YAML or an
    /// unknown category, and [`ConfigError::Validation`] for empty or
    /// duplicate entries.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        validate_machines(&file.machines)?;
        Ok(Self {
            machines: file.machines,
        })
    }

    #[must_use]
    pub fn machines(&self) -> &[EquipmentProfile] {
        &self.machines
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EquipmentProfile> {
        self.machines.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.machines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

/// Load the catalog from `path`, or the embedded one when `path` is `None`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, ConfigError> {
    let Some(path) = path else {
        return Catalog::embedded();
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    Catalog::from_yaml(&content)
}

fn validate_machines(machines: &[EquipmentProfile]) -> Result<(), ConfigError> {
    if machines.is_empty() {
        return Err(ConfigError::Validation(
            "catalog must list at least one machine".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();

    for machine in machines {
        if machine.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "machine id must be non-empty".to_string(),
            ));
        }

        if machine.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "machine '{}' has an empty name",
                machine.id
            )));
        }

        if !seen_ids.insert(machine.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate machine id: '{}'",
                machine.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
