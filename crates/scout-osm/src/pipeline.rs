//! Market analysis pipeline.
//!
//! 1. Resolve the site: geocode free text, or take the device position.
//! 2. Build the category filter and run it against Overpass.
//! 3. Normalize and deduplicate the raw elements.
//! 4. Hand the places to the verdict engine.
//!
//! Geocoding failures stop the run with an [`AnalysisError`]. A failed
//! point-of-interest lookup does not: it yields an `inconclusive` verdict.

use std::future::Future;
use std::time::Duration;

use scout_core::verdict::inconclusive;
use scout_core::{evaluate, AnalysisResult, AppConfig, Coordinate, LocationQuery, MarketCategory};
use tokio::sync::watch;

use crate::error::{AnalysisError, OsmError};
use crate::geocode::NominatimClient;
use crate::location::{resolve_device, DeviceLocator, LocationInput, DEVICE_LOCATION_LABEL};
use crate::normalize::normalize;
use crate::overpass::{FetchOutcome, OverpassClient};
use crate::query::build_filter_spec;

/// How long a device locator may take before the user is asked to type an
/// address instead.
const DEVICE_TIMEOUT: Duration = Duration::from_secs(10);

/// Turn a fetch outcome into a verdict.
///
/// A failed lookup gets its own `inconclusive` verdict instead of reading as
/// an empty market.
#[must_use]
pub fn evaluate_outcome(outcome: &FetchOutcome, category: MarketCategory) -> AnalysisResult {
    match outcome {
        FetchOutcome::Failed(failure) => inconclusive(&failure.to_string()),
        FetchOutcome::Fetched(_) | FetchOutcome::Skipped => {
            evaluate(normalize(outcome.features()), category)
        }
    }
}

/// The analysis entry point exposed to presentation layers.
#[derive(Debug, Clone)]
pub struct MarketScout {
    geocoder: NominatimClient,
    overpass: OverpassClient,
    radius_m: u32,
}

impl MarketScout {
    #[must_use]
    pub fn new(geocoder: NominatimClient, overpass: OverpassClient, radius_m: u32) -> Self {
        Self {
            geocoder,
            overpass,
            radius_m,
        }
    }

    /// Build both service clients from application config.
    ///
    /// # Errors
    ///
    /// Returns [`OsmError`] if either HTTP client cannot be built or a
    /// configured URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, OsmError> {
        let geocoder = NominatimClient::with_base_url(
            &config.nominatim_url,
            config.geocode_timeout_secs,
            &config.user_agent,
        )?;
        let overpass = OverpassClient::with_url(
            &config.overpass_url,
            config.overpass_timeout_secs,
            &config.user_agent,
        )?;
        Ok(Self::new(geocoder, overpass, config.search_radius_m))
    }

    #[must_use]
    pub fn radius_m(&self) -> u32 {
        self.radius_m
    }

    /// Same pipeline with a different search radius.
    #[must_use]
    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    /// Geocode `address` into a search target.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::GeocodeNotFound`] when there are no candidates.
    /// - [`AnalysisError::GeocodeTransport`] on any service failure.
    pub async fn geocode(&self, address: &str) -> Result<LocationQuery, AnalysisError> {
        match self.geocoder.search(address).await {
            Ok(Some(location)) => Ok(location),
            Ok(None) => Err(AnalysisError::GeocodeNotFound {
                query: address.to_string(),
            }),
            Err(e) => {
                tracing::warn!(query = address, error = %e, "geocoding failed");
                Err(AnalysisError::GeocodeTransport(e))
            }
        }
    }

    /// Resolve `input` into a search target.
    ///
    /// # Errors
    ///
    /// Propagates the geocoding errors from [`MarketScout::geocode`].
    pub async fn locate(&self, input: &LocationInput) -> Result<LocationQuery, AnalysisError> {
        match input {
            LocationInput::Address(address) => self.geocode(address).await,
            LocationInput::Coordinate(coordinate) => {
                Ok(LocationQuery::new(*coordinate, coordinate.to_string()))
            }
            LocationInput::Device(coordinate) => {
                Ok(LocationQuery::new(*coordinate, DEVICE_LOCATION_LABEL))
            }
        }
    }

    /// Ask a device locator for the current position, as input for
    /// [`MarketScout::locate`] or [`MarketScout::analyze`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Geolocation`] when the locator refuses, is
    /// unavailable, or times out.
    pub async fn locate_device<L: DeviceLocator>(
        &self,
        locator: &L,
    ) -> Result<LocationInput, AnalysisError> {
        resolve_device(locator, DEVICE_TIMEOUT).await.map_err(|e| {
            tracing::warn!(error = %e, "device geolocation failed");
            AnalysisError::from(e)
        })
    }

    /// Run the market analysis for `category` around `coordinate`.
    ///
    /// Never fails: a point-of-interest outage produces an `inconclusive`
    /// verdict.
    pub async fn run_analysis(
        &self,
        coordinate: Coordinate,
        category: MarketCategory,
    ) -> AnalysisResult {
        let spec = build_filter_spec(category, self.radius_m);
        let outcome = self.overpass.fetch_places(coordinate, &spec).await;
        let result = evaluate_outcome(&outcome, category);

        tracing::info!(
            %coordinate,
            %category,
            radius_m = self.radius_m,
            classification = %result.classification,
            count = result.competitor_count(),
            fetch_failed = outcome.is_failed(),
            "market analysis complete"
        );
        result
    }

    /// Resolve `input`, then analyse the resulting site.
    ///
    /// The point-of-interest service is never called when resolving fails.
    ///
    /// # Errors
    ///
    /// Propagates [`MarketScout::locate`] errors.
    pub async fn analyze(
        &self,
        input: &LocationInput,
        category: MarketCategory,
    ) -> Result<(LocationQuery, AnalysisResult), AnalysisError> {
        let location = self.locate(input).await?;
        let result = self.run_analysis(location.coordinate, category).await;
        Ok((location, result))
    }
}

/// One user's stream of analyses, where only the newest may finish.
///
/// Each [`AnalysisSession::run`] takes a new generation number. When a newer
/// run starts, older in-flight runs are dropped at their next await point
/// (cancelling any outstanding HTTP request) and return
/// [`AnalysisError::Superseded`].
#[derive(Debug)]
pub struct AnalysisSession {
    generation: watch::Sender<u64>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    #[must_use]
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self { generation }
    }

    /// Drive `work` to completion unless a newer run supersedes it.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Superseded`] when another `run` starts on
    /// this session first, or whatever error `work` itself returns.
    pub async fn run<F, T>(&self, work: F) -> Result<T, AnalysisError>
    where
        F: Future<Output = Result<T, AnalysisError>>,
    {
        // Subscribe before bumping so no later bump can be missed.
        let mut newer = self.generation.subscribe();
        let mut current = 0;
        self.generation.send_modify(|g| {
            *g += 1;
            current = *g;
        });

        tokio::select! {
            biased;
            _ = newer.wait_for(|g| *g > current) => {
                tracing::debug!(generation = current, "analysis superseded");
                Err(AnalysisError::Superseded)
            }
            result = work => result,
        }
    }
}
