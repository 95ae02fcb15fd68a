//! Verdict engine: turns the set of nearby places into a qualitative market
//! reading.
//!
//! The decision is binary on purpose: any matching place at all validates the
//! market, none at all is an open field. Competition-sensitive categories
//! (bagged ice) read the two outcomes differently from the rest.

use serde::{Deserialize, Serialize};

use crate::catalog::MarketCategory;
use crate::place::Place;

/// Styling bucket the presentation layer keys its colours and icons off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    ValidatedHot,
    Opportunity,
    ValidatedGeneric,
    BlueOcean,
    /// The point-of-interest lookup failed, so no reading is possible.
    Inconclusive,
}

impl Classification {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::ValidatedHot => "validated-hot",
            Classification::Opportunity => "opportunity",
            Classification::ValidatedGeneric => "validated-generic",
            Classification::BlueOcean => "blue-ocean",
            Classification::Inconclusive => "inconclusive",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub title: String,
    pub message: String,
    pub classification: Classification,
    /// Every deduplicated place found; map markers and the competitor count
    /// both come from here.
    pub points: Vec<Place>,
}

impl AnalysisResult {
    #[must_use]
    pub fn competitor_count(&self) -> usize {
        self.points.len()
    }
}

/// Derive the verdict for `places` found around a site for `category`.
///
/// Pure and total. `points` in the result is always `places` unchanged.
#[must_use]
pub fn evaluate(places: Vec<Place>, category: MarketCategory) -> AnalysisResult {
    let count = places.len();
    let has_competition = count > 0;

    let (title, message, classification) =
        match (category.is_competition_sensitive(), has_competition) {
            (true, true) => (
                "🔥 Mercado Validado".to_string(),
                format!(
                    "Detectamos {count} puntos de venta de hielo cercanos (Oxxos/Tiendas). \
                     La demanda es alta. Tu ventaja será ofrecer hielo 24/7 sin filas."
                ),
                Classification::ValidatedHot,
            ),
            (true, false) => (
                "💎 Oportunidad de Oro".to_string(),
                "No hay competidores directos cerca. Serás la única opción de hielo en la zona."
                    .to_string(),
                Classification::Opportunity,
            ),
            (false, true) => (
                "✅ Zona Validada".to_string(),
                format!(
                    "El mercado ya existe ({count} puntos similares). La gente ya viene aquí a \
                     comprar. Tu ventaja es la automatización."
                ),
                Classification::ValidatedGeneric,
            ),
            (false, false) => (
                "🚀 Océano Azul".to_string(),
                "Serás el primero en ofrecer este servicio en la zona. ¡Captura todo el mercado!"
                    .to_string(),
                Classification::BlueOcean,
            ),
        };

    AnalysisResult {
        title,
        message,
        classification,
        points: places,
    }
}

/// Verdict used when the point-of-interest service could not be reached.
///
/// Kept separate from the zero-result branches so an outage never reads as
/// an untouched market.
#[must_use]
pub fn inconclusive(reason: &str) -> AnalysisResult {
    AnalysisResult {
        title: "⚠️ Análisis Incompleto".to_string(),
        message: format!(
            "No pudimos consultar los puntos de interés cercanos ({reason}). \
             Intenta de nuevo en unos minutos."
        ),
        classification: Classification::Inconclusive,
        points: Vec::new(),
    }
}
