//! `scout analyze`: one machine, one site, one verdict.

use scout_core::{AppConfig, Catalog, Coordinate};
use scout_osm::{AnalysisError, LocationInput, MarketScout};

use crate::device::EnvDeviceLocator;
use crate::render;

/// Where the user asked to look.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Site {
    Given(LocationInput),
    /// The device position, read when the analysis starts.
    Here,
}

impl Site {
    /// Pick the site from mutually exclusive CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error when the pair is out of range or no site was given.
    pub(crate) fn from_args(
        address: Option<String>,
        lat_lon: Option<(f64, f64)>,
        here: bool,
    ) -> anyhow::Result<Self> {
        match (address, lat_lon, here) {
            (Some(address), None, false) => Ok(Self::Given(LocationInput::Address(address))),
            (None, Some((lat, lon)), false) => Ok(Self::Given(LocationInput::Coordinate(
                Coordinate::new(lat, lon)?,
            ))),
            (None, None, true) => Ok(Self::Here),
            _ => anyhow::bail!("choose exactly one of --address, --lat/--lon or --here"),
        }
    }

    /// The pipeline input for this site, asking the device locator for
    /// [`Site::Here`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Geolocation`] when the device position is
    /// unavailable.
    pub(crate) async fn into_input(
        self,
        scout: &MarketScout,
    ) -> Result<LocationInput, AnalysisError> {
        match self {
            Site::Given(input) => Ok(input),
            Site::Here => scout.locate_device(&EnvDeviceLocator::from_env()).await,
        }
    }
}

#[derive(Debug)]
pub(crate) struct AnalyzeRequest {
    pub machine_id: String,
    pub site: Site,
    pub radius_m: Option<u32>,
    pub json: bool,
}

/// Run the analysis and print the verdict.
///
/// # Errors
///
/// Returns an error if the machine id is unknown, the HTTP clients cannot be
/// built, or the site cannot be resolved. A failed point-of-interest lookup
/// is not an error; it prints an inconclusive verdict.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    catalog: &Catalog,
    request: AnalyzeRequest,
) -> anyhow::Result<()> {
    let machine = catalog.get(&request.machine_id).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown machine '{}'; run `scout machines` for the list",
            request.machine_id
        )
    })?;

    let mut scout = MarketScout::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build OpenStreetMap clients: {e}"))?;
    if let Some(radius_m) = request.radius_m {
        scout = scout.with_radius(radius_m);
    }

    tracing::info!(
        machine = %machine.id,
        category = %machine.category,
        "running analysis"
    );
    let resolved = match request.site.into_input(&scout).await {
        Ok(input) => scout.analyze(&input, machine.category).await,
        Err(e) => Err(e),
    };
    let (location, result) = resolved.map_err(|e| {
        tracing::warn!(error = %e, "could not resolve site");
        anyhow::anyhow!("{} ({e})", e.retry_prompt())
    })?;

    if request.json {
        let payload = render::result_json(&location, machine, &result);
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        render::print_result(&location, machine, scout.radius_m(), &result);
    }

    Ok(())
}
